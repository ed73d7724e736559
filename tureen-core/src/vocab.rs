//! Shared allergen, dietary-tag, and ingredient-family vocabularies.
//!
//! Dish `allergens` and `dietary_tags` columns hold codes from these lists;
//! the API rejects anything else at the boundary so the derivation never has
//! to reason about free text.

use serde::{Deserialize, Serialize};

/// Allergen codes, sorted. Modeled on the EU "14 major allergens" list minus
/// the two we have no ingredient families for.
pub const ALLERGEN_CODES: &[&str] = &[
    "celery",
    "dairy",
    "eggs",
    "fish",
    "gluten",
    "mustard",
    "peanuts",
    "sesame",
    "shellfish",
    "soy",
    "sulphites",
    "tree_nuts",
];

/// Dietary tags the derivation can produce, sorted.
pub const DIETARY_TAGS: &[&str] = &["dairy_free", "gluten_free", "vegan", "vegetarian"];

pub const DIETARY_VEGETARIAN: &str = "vegetarian";
pub const DIETARY_VEGAN: &str = "vegan";
pub const DIETARY_GLUTEN_FREE: &str = "gluten_free";
pub const DIETARY_DAIRY_FREE: &str = "dairy_free";

/// Service types a restaurant can offer.
pub const SERVICE_TYPES: &[&str] = &["delivery", "dine_in", "takeaway"];

pub fn is_valid_allergen(code: &str) -> bool {
    ALLERGEN_CODES.binary_search(&code).is_ok()
}

pub fn is_valid_dietary_tag(tag: &str) -> bool {
    DIETARY_TAGS.binary_search(&tag).is_ok()
}

pub fn is_valid_service_type(service: &str) -> bool {
    SERVICE_TYPES.binary_search(&service).is_ok()
}

/// Food family of a canonical ingredient. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientFamily {
    Meat,
    Poultry,
    Fish,
    Shellfish,
    Dairy,
    Egg,
    Produce,
    Grain,
    Legume,
    Nut,
    Seed,
    Spice,
    Oil,
    Sweetener,
    Condiment,
    Beverage,
    Other,
}

impl IngredientFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientFamily::Meat => "meat",
            IngredientFamily::Poultry => "poultry",
            IngredientFamily::Fish => "fish",
            IngredientFamily::Shellfish => "shellfish",
            IngredientFamily::Dairy => "dairy",
            IngredientFamily::Egg => "egg",
            IngredientFamily::Produce => "produce",
            IngredientFamily::Grain => "grain",
            IngredientFamily::Legume => "legume",
            IngredientFamily::Nut => "nut",
            IngredientFamily::Seed => "seed",
            IngredientFamily::Spice => "spice",
            IngredientFamily::Oil => "oil",
            IngredientFamily::Sweetener => "sweetener",
            IngredientFamily::Condiment => "condiment",
            IngredientFamily::Beverage => "beverage",
            IngredientFamily::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "meat" => Some(IngredientFamily::Meat),
            "poultry" => Some(IngredientFamily::Poultry),
            "fish" => Some(IngredientFamily::Fish),
            "shellfish" => Some(IngredientFamily::Shellfish),
            "dairy" => Some(IngredientFamily::Dairy),
            "egg" => Some(IngredientFamily::Egg),
            "produce" => Some(IngredientFamily::Produce),
            "grain" => Some(IngredientFamily::Grain),
            "legume" => Some(IngredientFamily::Legume),
            "nut" => Some(IngredientFamily::Nut),
            "seed" => Some(IngredientFamily::Seed),
            "spice" => Some(IngredientFamily::Spice),
            "oil" => Some(IngredientFamily::Oil),
            "sweetener" => Some(IngredientFamily::Sweetener),
            "condiment" => Some(IngredientFamily::Condiment),
            "beverage" => Some(IngredientFamily::Beverage),
            "other" => Some(IngredientFamily::Other),
            _ => None,
        }
    }

    /// Allergen codes an ingredient of this family carries unless the
    /// creating admin supplies an explicit set.
    pub fn default_allergens(&self) -> &'static [&'static str] {
        match self {
            IngredientFamily::Fish => &["fish"],
            IngredientFamily::Shellfish => &["shellfish"],
            IngredientFamily::Dairy => &["dairy"],
            IngredientFamily::Egg => &["eggs"],
            IngredientFamily::Nut => &["tree_nuts"],
            _ => &[],
        }
    }
}

/// Normalize a proposed canonical name to `lowercase_snake_case`.
///
/// Spaces and hyphens become underscores, runs collapse to one, and anything
/// outside `[a-z0-9_]` after lowercasing makes the name invalid. Returns
/// `None` when nothing usable remains.
pub fn normalize_canonical_name(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_sep = true; // swallow leading separators

    for c in raw.trim().chars() {
        match c {
            ' ' | '-' | '_' => {
                if !last_was_sep {
                    out.push('_');
                    last_was_sep = true;
                }
            }
            _ if c.is_ascii_alphanumeric() => {
                out.push(c.to_ascii_lowercase());
                last_was_sep = false;
            }
            _ => return None,
        }
    }

    while out.ends_with('_') {
        out.pop();
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab_lists_are_sorted() {
        // binary_search in the validators requires it
        let mut sorted = ALLERGEN_CODES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, ALLERGEN_CODES);

        let mut sorted = DIETARY_TAGS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, DIETARY_TAGS);

        let mut sorted = SERVICE_TYPES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, SERVICE_TYPES);
    }

    #[test]
    fn test_allergen_validation() {
        assert!(is_valid_allergen("eggs"));
        assert!(is_valid_allergen("tree_nuts"));
        assert!(!is_valid_allergen("Eggs"));
        assert!(!is_valid_allergen("pollen"));
    }

    #[test]
    fn test_family_round_trip() {
        for family in [
            IngredientFamily::Meat,
            IngredientFamily::Shellfish,
            IngredientFamily::Sweetener,
            IngredientFamily::Other,
        ] {
            assert_eq!(IngredientFamily::from_str(family.as_str()), Some(family));
        }
        assert_eq!(IngredientFamily::from_str("DAIRY"), Some(IngredientFamily::Dairy));
        assert_eq!(IngredientFamily::from_str("plastic"), None);
    }

    #[test]
    fn test_family_default_allergens_are_valid_codes() {
        for family in [
            IngredientFamily::Fish,
            IngredientFamily::Shellfish,
            IngredientFamily::Dairy,
            IngredientFamily::Egg,
            IngredientFamily::Nut,
        ] {
            for code in family.default_allergens() {
                assert!(is_valid_allergen(code), "{code} not in ALLERGEN_CODES");
            }
        }
    }

    #[test]
    fn test_normalize_canonical_name() {
        assert_eq!(normalize_canonical_name("Beef"), Some("beef".to_string()));
        assert_eq!(
            normalize_canonical_name("Ground Beef"),
            Some("ground_beef".to_string())
        );
        assert_eq!(
            normalize_canonical_name("sun-dried  tomato"),
            Some("sun_dried_tomato".to_string())
        );
        assert_eq!(
            normalize_canonical_name("  chili_oil "),
            Some("chili_oil".to_string())
        );
        assert_eq!(normalize_canonical_name(""), None);
        assert_eq!(normalize_canonical_name("___"), None);
        assert_eq!(normalize_canonical_name("crème fraîche"), None);
    }
}
