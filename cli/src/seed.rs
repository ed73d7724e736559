use anyhow::{Context, Result};
use tureen_core::types::{
    CreateCategoryRequest, CreateIngredientRequest, CreateMenuCategoryRequest,
    CreateRestaurantRequest,
};
use tureen_core::{
    suggest_categories, ApiClient, AuthoringSession, ClientPersist, DishDraft, SaveOutcome,
};

use crate::resolve::resolve_ingredient;

struct SeedIngredient {
    canonical_name: &'static str,
    family: &'static str,
    is_vegetarian: bool,
    is_vegan: bool,
    /// Explicit allergen codes; None lets the family default apply
    allergens: Option<&'static [&'static str]>,
    aliases: &'static [&'static str],
}

const CATALOG: &[SeedIngredient] = &[
    SeedIngredient {
        canonical_name: "egg",
        family: "egg",
        is_vegetarian: true,
        is_vegan: false,
        allergens: None,
        aliases: &["Egg", "Eggs"],
    },
    SeedIngredient {
        canonical_name: "romaine_lettuce",
        family: "produce",
        is_vegetarian: true,
        is_vegan: true,
        allergens: None,
        aliases: &["Romaine Lettuce", "Romaine"],
    },
    SeedIngredient {
        canonical_name: "parmesan",
        family: "dairy",
        is_vegetarian: true,
        is_vegan: false,
        allergens: None,
        aliases: &["Parmesan", "Parmigiano Reggiano"],
    },
    SeedIngredient {
        canonical_name: "crouton",
        family: "grain",
        is_vegetarian: true,
        is_vegan: true,
        allergens: Some(&["gluten"]),
        aliases: &["Croutons"],
    },
    SeedIngredient {
        canonical_name: "wheat_flour",
        family: "grain",
        is_vegetarian: true,
        is_vegan: true,
        allergens: Some(&["gluten"]),
        aliases: &["Wheat Flour", "Flour"],
    },
    SeedIngredient {
        canonical_name: "mozzarella",
        family: "dairy",
        is_vegetarian: true,
        is_vegan: false,
        allergens: None,
        aliases: &["Mozzarella", "Fior di Latte"],
    },
    SeedIngredient {
        canonical_name: "tomato",
        family: "produce",
        is_vegetarian: true,
        is_vegan: true,
        allergens: None,
        aliases: &["Tomato", "Tomatoes"],
    },
    SeedIngredient {
        canonical_name: "basil",
        family: "produce",
        is_vegetarian: true,
        is_vegan: true,
        allergens: None,
        aliases: &["Basil", "Fresh Basil"],
    },
    SeedIngredient {
        canonical_name: "olive_oil",
        family: "oil",
        is_vegetarian: true,
        is_vegan: true,
        allergens: None,
        aliases: &["Olive Oil", "Extra Virgin Olive Oil"],
    },
    SeedIngredient {
        canonical_name: "cucumber",
        family: "produce",
        is_vegetarian: true,
        is_vegan: true,
        allergens: None,
        aliases: &["Cucumber"],
    },
    SeedIngredient {
        canonical_name: "lemon",
        family: "produce",
        is_vegetarian: true,
        is_vegan: true,
        allergens: None,
        aliases: &["Lemon", "Lemon Juice"],
    },
    SeedIngredient {
        canonical_name: "salmon",
        family: "fish",
        is_vegetarian: false,
        is_vegan: false,
        allergens: None,
        aliases: &["Salmon", "Atlantic Salmon"],
    },
    SeedIngredient {
        canonical_name: "chicken_breast",
        family: "poultry",
        is_vegetarian: false,
        is_vegan: false,
        allergens: None,
        aliases: &["Chicken Breast", "Chicken"],
    },
    SeedIngredient {
        canonical_name: "black_pepper",
        family: "spice",
        is_vegetarian: true,
        is_vegan: true,
        allergens: None,
        aliases: &["Black Pepper"],
    },
];

/// Global dish categories, in listing order.
const CATEGORIES: &[&str] = &["Salads", "Pizza", "Pasta", "Burgers", "Seafood", "Desserts"];

struct SeedDish {
    name: &'static str,
    /// Menu section name, one of the italian suggestions
    section: &'static str,
    category: Option<&'static str>,
    description: Option<&'static str>,
    price_cents: i32,
    calories: Option<i32>,
    spice_level: Option<i32>,
    /// (alias search query, quantity)
    ingredients: &'static [(&'static str, Option<&'static str>)],
}

const SAMPLE_DISHES: &[SeedDish] = &[
    SeedDish {
        name: "Caesar Salad",
        section: "Antipasti",
        category: Some("Salads"),
        description: Some("Romaine, shaved parmesan, soft egg, and croutons."),
        price_cents: 1250,
        calories: Some(420),
        spice_level: None,
        ingredients: &[
            ("romaine", Some("1 head")),
            ("parmesan", Some("30 g")),
            ("egg", Some("1")),
            ("crouton", None),
            ("olive oil", Some("2 tbsp")),
        ],
    },
    SeedDish {
        name: "Margherita Pizza",
        section: "Pizza",
        category: Some("Pizza"),
        description: Some("Tomato, mozzarella, and basil on a wood-fired base."),
        price_cents: 1600,
        calories: Some(870),
        spice_level: Some(0),
        ingredients: &[
            ("wheat flour", Some("250 g")),
            ("tomato", Some("150 g")),
            ("mozzarella", Some("125 g")),
            ("basil", None),
            ("olive oil", Some("1 tbsp")),
        ],
    },
    SeedDish {
        name: "Grilled Salmon",
        section: "Secondi",
        category: Some("Seafood"),
        description: Some("Atlantic salmon with lemon and cracked pepper."),
        price_cents: 2400,
        calories: Some(560),
        spice_level: Some(1),
        ingredients: &[
            ("salmon", Some("200 g")),
            ("lemon", Some("1/2")),
            ("olive oil", Some("1 tbsp")),
            ("black pepper", None),
        ],
    },
    SeedDish {
        name: "Garden Salad",
        section: "Antipasti",
        category: Some("Salads"),
        description: Some("Romaine, tomato, and cucumber with a lemon dressing."),
        price_cents: 950,
        calories: Some(180),
        spice_level: None,
        ingredients: &[
            ("romaine", Some("1/2 head")),
            ("tomato", Some("1")),
            ("cucumber", Some("1/2")),
            ("olive oil", Some("1 tbsp")),
            ("lemon", Some("1/4")),
        ],
    },
];

pub async fn seed(server: &str, username: &str, password: &str) -> Result<()> {
    let mut client = ApiClient::new(server)?;

    // Try to login first - if user exists, we're done
    match client.login(username, password).await {
        Ok(_) => {
            println!("User '{}' already exists, skipping seed", username);
            return Ok(());
        }
        Err(_) => {
            client
                .signup(username, password)
                .await
                .context("Failed to create user")?;
            println!("Created new user: {}", username);
        }
    }

    println!("Creating {} catalog ingredients...", CATALOG.len());
    for entry in CATALOG {
        let ingredient = client
            .create_ingredient(&CreateIngredientRequest {
                canonical_name: entry.canonical_name.to_string(),
                ingredient_family: entry.family.to_string(),
                is_vegetarian: entry.is_vegetarian,
                is_vegan: entry.is_vegan,
                allergens: entry
                    .allergens
                    .map(|codes| codes.iter().map(|c| c.to_string()).collect()),
            })
            .await
            .with_context(|| format!("Failed to create ingredient: {}", entry.canonical_name))?;

        for alias in entry.aliases {
            client
                .create_alias(ingredient.id, alias)
                .await
                .with_context(|| format!("Failed to create alias: {}", alias))?;
        }

        println!(
            "  Created: {} (allergens: {})",
            ingredient.canonical_name,
            if ingredient.allergens.is_empty() {
                "none".to_string()
            } else {
                ingredient.allergens.join(", ")
            }
        );
    }

    println!("Creating {} dish categories...", CATEGORIES.len());
    let mut category_ids = std::collections::HashMap::new();
    for (position, name) in CATEGORIES.iter().enumerate() {
        let category = client
            .create_category(&CreateCategoryRequest {
                name: name.to_string(),
                sort_order: Some(position as i32 + 1),
            })
            .await
            .with_context(|| format!("Failed to create category: {}", name))?;
        category_ids.insert(*name, category.id);
        println!("  Created: {}", category.name);
    }

    let restaurant = client
        .create_restaurant(&CreateRestaurantRequest {
            name: "Trattoria Vesuvio".to_string(),
            description: Some("Neighborhood Italian kitchen.".to_string()),
            cuisine: "italian".to_string(),
            address: "12 Market Lane".to_string(),
            phone: Some("+1 555 0142".to_string()),
            latitude: 40.7128,
            longitude: -74.006,
            service_types: vec!["dine_in".to_string(), "takeaway".to_string()],
            currency: None,
        })
        .await
        .context("Failed to create demo restaurant")?;
    println!("Created restaurant: {} ({})", restaurant.name, restaurant.id);

    // Menu sections come from the cuisine suggestions, same as the wizard
    // would offer them.
    let sections = suggest_categories(&restaurant.cuisine);
    let mut section_ids = std::collections::HashMap::new();
    for (position, name) in sections.iter().enumerate() {
        let section = client
            .create_menu_category(
                restaurant.id,
                &CreateMenuCategoryRequest {
                    name: name.to_string(),
                    sort_order: Some(position as i32 + 1),
                },
            )
            .await
            .with_context(|| format!("Failed to create menu section: {}", name))?;
        section_ids.insert(name.as_str(), section.id);
        println!("  Created menu section: {}", section.name);
    }

    println!("Creating {} sample dishes...", SAMPLE_DISHES.len());
    for dish in SAMPLE_DISHES {
        let section_id = *section_ids
            .get(dish.section)
            .with_context(|| format!("No menu section named: {}", dish.section))?;

        let mut draft = DishDraft::new(dish.name, dish.price_cents);
        draft.restaurant_id = Some(restaurant.id);
        draft.menu_category_id = Some(section_id);
        draft.dish_category_id = dish.category.and_then(|name| category_ids.get(name)).copied();
        draft.description = dish.description.map(|d| d.to_string());
        draft.calories = dish.calories;
        draft.spice_level = dish.spice_level;

        let mut session = AuthoringSession::new(ClientPersist::new(&client), draft);
        for (query, quantity) in dish.ingredients {
            let hit = resolve_ingredient(&client, query)
                .await
                .with_context(|| format!("Resolving ingredients for dish: {}", dish.name))?;
            session.pick(&hit, quantity.map(|q| q.to_string()));
        }

        let dish_id = match session
            .submit()
            .await
            .with_context(|| format!("Failed to create dish: {}", dish.name))?
        {
            SaveOutcome::Saved { dish_id } => dish_id,
            SaveOutcome::SavedWithWarning { dish_id, warning } => {
                println!("  Warning for {}: {}", dish.name, warning);
                dish_id
            }
            SaveOutcome::Staged => unreachable!("direct-mode save cannot stage"),
        };

        // Read back the derived attributes so the seed output doubles as a
        // derivation smoke test.
        let detail = client
            .get_dish(dish_id)
            .await
            .with_context(|| format!("Failed to read back dish: {}", dish.name))?;
        println!(
            "  Created: {} (dietary: {}; allergens: {})",
            dish.name,
            if detail.dish.dietary_tags.is_empty() {
                "none".to_string()
            } else {
                detail.dish.dietary_tags.join(", ")
            },
            if detail.dish.allergens.is_empty() {
                "none".to_string()
            } else {
                detail.dish.allergens.join(", ")
            }
        );
    }

    println!();
    println!("{}", "=".repeat(50));
    println!("SEED DATA COMPLETE");
    println!("{}", "=".repeat(50));
    println!("Username: {}", username);
    println!("Password: {}", password);
    println!("Base URL: {}", server);
    println!("{}", "=".repeat(50));

    Ok(())
}
