use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tureen_core::types::{CreateMenuCategoryRequest, CreateRestaurantRequest};
use tureen_core::{
    suggest_categories, ApiClient, AuthoringSession, DishDraft, SaveOutcome, StagedPersist,
};
use uuid::Uuid;

use crate::resolve::resolve_ingredient;

/// Onboarding bundle format.
#[derive(Debug, Deserialize)]
struct OnboardBundle {
    restaurant: BundleRestaurant,
    /// Menu sections; when absent, sections are scaffolded from the
    /// cuisine's suggestions with no dishes
    #[serde(default)]
    menu: Vec<BundleSection>,
}

#[derive(Debug, Deserialize)]
struct BundleRestaurant {
    name: String,
    description: Option<String>,
    cuisine: String,
    address: String,
    phone: Option<String>,
    latitude: f64,
    longitude: f64,
    service_types: Vec<String>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BundleSection {
    section: String,
    sort_order: Option<i32>,
    #[serde(default)]
    dishes: Vec<BundleDish>,
}

#[derive(Debug, Deserialize)]
struct BundleDish {
    name: String,
    description: Option<String>,
    price_cents: i32,
    calories: Option<i32>,
    spice_level: Option<i32>,
    /// Global dish category name, matched case-insensitively
    category: Option<String>,
    photo_url: Option<String>,
    #[serde(default)]
    ingredients: Vec<BundleIngredient>,
}

#[derive(Debug, Deserialize)]
struct BundleIngredient {
    /// Alias search query, e.g. "romaine"
    query: String,
    quantity: Option<String>,
}

/// One menu section staged and ready to write.
struct StagedSection {
    name: String,
    sort_order: i32,
    buffer: StagedPersist,
}

pub async fn onboard(server: &str, username: &str, password: &str, bundle: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(bundle)
        .with_context(|| format!("Failed to read bundle: {}", bundle.display()))?;
    let bundle: OnboardBundle = serde_json::from_str(&raw)
        .with_context(|| "Failed to parse onboarding bundle".to_string())?;

    let mut client = ApiClient::new(server)?;
    client
        .login(username, password)
        .await
        .with_context(|| format!("Failed to log in as {}", username))?;

    let suggested = suggest_categories(&bundle.restaurant.cuisine);
    if !suggested.is_empty() {
        println!(
            "Suggested sections for {}: {}",
            bundle.restaurant.cuisine,
            suggested.join(", ")
        );
    }

    // Category names in the bundle resolve against the live catalog before
    // anything is staged, so typos fail while nothing exists yet.
    let category_ids = load_category_ids(&client).await?;

    // Wizard phase: author every dish into per-section staging buffers.
    // Ingredient search runs now, but no dish or link write happens until
    // the restaurant and its sections exist.
    let mut sections = Vec::new();
    for (position, section) in bundle.menu.iter().enumerate() {
        let mut buffer = StagedPersist::new();

        for dish in &section.dishes {
            let mut draft = DishDraft::new(&dish.name, dish.price_cents);
            draft.description = dish.description.clone();
            draft.calories = dish.calories;
            draft.spice_level = dish.spice_level;
            draft.photo_url = dish.photo_url.clone();
            draft.dish_category_id = match dish.category.as_deref() {
                None => None,
                Some(name) => Some(lookup_category(&category_ids, name, &dish.name)?),
            };

            let mut session = AuthoringSession::new(&mut buffer, draft);
            for ingredient in &dish.ingredients {
                let hit = resolve_ingredient(&client, &ingredient.query)
                    .await
                    .with_context(|| format!("Resolving ingredients for dish: {}", dish.name))?;
                session.pick(&hit, ingredient.quantity.clone());
            }

            match session.submit().await? {
                SaveOutcome::Staged => {}
                outcome => bail!("Expected a staged outcome, got {:?}", outcome),
            }
        }

        println!(
            "Staged {} dishes for section: {}",
            buffer.len(),
            section.section
        );
        sections.push(StagedSection {
            name: section.section.clone(),
            sort_order: section.sort_order.unwrap_or(position as i32 + 1),
            buffer,
        });
    }

    // Empty menu: scaffold the suggested sections so the owner starts from
    // a sensible menu skeleton.
    if sections.is_empty() {
        for (position, name) in suggested.iter().enumerate() {
            sections.push(StagedSection {
                name: name.clone(),
                sort_order: position as i32 + 1,
                buffer: StagedPersist::new(),
            });
        }
    }

    // Write phase: restaurant, then sections, then the staged dishes.
    let restaurant = client
        .create_restaurant(&CreateRestaurantRequest {
            name: bundle.restaurant.name.clone(),
            description: bundle.restaurant.description.clone(),
            cuisine: bundle.restaurant.cuisine.clone(),
            address: bundle.restaurant.address.clone(),
            phone: bundle.restaurant.phone.clone(),
            latitude: bundle.restaurant.latitude,
            longitude: bundle.restaurant.longitude,
            service_types: bundle.restaurant.service_types.clone(),
            currency: bundle.restaurant.currency.clone(),
        })
        .await
        .context("Failed to create restaurant")?;
    println!("Created restaurant: {} ({})", restaurant.name, restaurant.id);

    let mut saved = 0usize;
    let mut failed = 0usize;
    for section in sections {
        let menu_category = client
            .create_menu_category(
                restaurant.id,
                &CreateMenuCategoryRequest {
                    name: section.name.clone(),
                    sort_order: Some(section.sort_order),
                },
            )
            .await
            .with_context(|| format!("Failed to create menu section: {}", section.name))?;
        println!("Created menu section: {}", menu_category.name);

        for outcome in section
            .buffer
            .submit_staged(&client, restaurant.id, menu_category.id)
            .await
        {
            match outcome.outcome {
                Ok(SaveOutcome::Saved { .. }) => {
                    saved += 1;
                    println!("  Created: {}", outcome.dish_name);
                }
                Ok(SaveOutcome::SavedWithWarning { warning, .. }) => {
                    saved += 1;
                    println!("  Created with warning: {} ({})", outcome.dish_name, warning);
                }
                Ok(SaveOutcome::Staged) => {
                    failed += 1;
                    println!("  Still staged (not written): {}", outcome.dish_name);
                }
                Err(e) => {
                    failed += 1;
                    println!("  Failed: {} ({})", outcome.dish_name, e);
                }
            }
        }
    }

    println!();
    println!("{}", "=".repeat(50));
    println!("ONBOARDING COMPLETE");
    println!("{}", "=".repeat(50));
    println!("Restaurant: {}", restaurant.name);
    println!("Dishes written: {}", saved);
    if failed > 0 {
        println!("Dishes failed: {}", failed);
    }
    println!("{}", "=".repeat(50));

    Ok(())
}

async fn load_category_ids(client: &ApiClient) -> Result<HashMap<String, Uuid>> {
    let categories = client
        .list_categories()
        .await
        .context("Failed to list dish categories")?;
    Ok(categories
        .into_iter()
        .map(|c| (c.name.to_lowercase(), c.id))
        .collect())
}

fn lookup_category(
    category_ids: &HashMap<String, Uuid>,
    name: &str,
    dish_name: &str,
) -> Result<Uuid> {
    match category_ids.get(&name.trim().to_lowercase()) {
        Some(id) => Ok(*id),
        None => bail!("Dish '{}' names unknown category '{}'", dish_name, name),
    }
}
