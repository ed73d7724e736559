//! Dish attribute derivation.
//!
//! A dish's `allergens` and `dietary_tags` columns are never authored; they
//! are recomputed from the attributes of its linked canonical ingredients,
//! inside the same transaction as every link-set write. This module is the
//! single place those rules live — the server calls it, and so do tests.

use serde::{Deserialize, Serialize};

use crate::vocab::{
    DIETARY_DAIRY_FREE, DIETARY_GLUTEN_FREE, DIETARY_VEGAN, DIETARY_VEGETARIAN,
};

/// The attributes of one linked canonical ingredient that feed derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAttributes {
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    /// Known allergen codes for this ingredient (vocab::ALLERGEN_CODES).
    pub allergens: Vec<String>,
}

/// Output of a derivation pass. Both lists are sorted and de-duplicated so
/// repeated derivations over the same link set compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAttributes {
    pub allergens: Vec<String>,
    pub dietary_tags: Vec<String>,
}

/// Derive dish attributes from its current ingredient link set.
///
/// Rules:
/// - an empty link set derives to empty lists (clearing a dish's ingredients
///   clears its attributes);
/// - `allergens` is the union of every ingredient's allergen codes;
/// - `vegetarian`/`vegan` require every ingredient to carry the flag;
/// - `gluten_free`/`dairy_free` mean the allergen union lacks the
///   corresponding code, and are only claimed for non-empty link sets.
///
/// Input order never affects the output.
pub fn derive_attributes(ingredients: &[IngredientAttributes]) -> DerivedAttributes {
    if ingredients.is_empty() {
        return DerivedAttributes::default();
    }

    let mut allergens: Vec<String> = ingredients
        .iter()
        .flat_map(|i| i.allergens.iter().cloned())
        .collect();
    allergens.sort_unstable();
    allergens.dedup();

    let mut dietary_tags = Vec::new();
    if ingredients.iter().all(|i| i.is_vegetarian) {
        dietary_tags.push(DIETARY_VEGETARIAN.to_string());
    }
    if ingredients.iter().all(|i| i.is_vegan) {
        dietary_tags.push(DIETARY_VEGAN.to_string());
    }
    if !allergens.iter().any(|a| a == "gluten") {
        dietary_tags.push(DIETARY_GLUTEN_FREE.to_string());
    }
    if !allergens.iter().any(|a| a == "dairy") {
        dietary_tags.push(DIETARY_DAIRY_FREE.to_string());
    }
    dietary_tags.sort_unstable();

    DerivedAttributes {
        allergens,
        dietary_tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(
        is_vegetarian: bool,
        is_vegan: bool,
        allergens: &[&str],
    ) -> IngredientAttributes {
        IngredientAttributes {
            is_vegetarian,
            is_vegan,
            allergens: allergens.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_set_derives_empty() {
        let derived = derive_attributes(&[]);
        assert!(derived.allergens.is_empty());
        assert!(derived.dietary_tags.is_empty());
    }

    #[test]
    fn test_egg_dish() {
        // egg: vegetarian, not vegan, carries "eggs"
        let derived = derive_attributes(&[ingredient(true, false, &["eggs"])]);
        assert_eq!(derived.allergens, vec!["eggs"]);
        assert!(derived.dietary_tags.contains(&"vegetarian".to_string()));
        assert!(!derived.dietary_tags.contains(&"vegan".to_string()));
    }

    #[test]
    fn test_allergen_union_is_sorted_and_deduped() {
        let derived = derive_attributes(&[
            ingredient(true, false, &["dairy", "eggs"]),
            ingredient(true, true, &["gluten"]),
            ingredient(true, false, &["dairy"]),
        ]);
        assert_eq!(derived.allergens, vec!["dairy", "eggs", "gluten"]);
    }

    #[test]
    fn test_one_meat_ingredient_blocks_vegetarian() {
        let derived = derive_attributes(&[
            ingredient(true, true, &[]),
            ingredient(false, false, &[]),
        ]);
        assert!(!derived.dietary_tags.contains(&"vegetarian".to_string()));
        assert!(!derived.dietary_tags.contains(&"vegan".to_string()));
    }

    #[test]
    fn test_all_vegan_implies_both_flags() {
        let derived = derive_attributes(&[
            ingredient(true, true, &[]),
            ingredient(true, true, &["soy"]),
        ]);
        assert!(derived.dietary_tags.contains(&"vegetarian".to_string()));
        assert!(derived.dietary_tags.contains(&"vegan".to_string()));
    }

    #[test]
    fn test_free_of_tags_follow_allergen_union() {
        let with_gluten = derive_attributes(&[ingredient(true, true, &["gluten"])]);
        assert!(!with_gluten.dietary_tags.contains(&"gluten_free".to_string()));
        assert!(with_gluten.dietary_tags.contains(&"dairy_free".to_string()));

        let with_dairy = derive_attributes(&[ingredient(true, false, &["dairy"])]);
        assert!(with_dairy.dietary_tags.contains(&"gluten_free".to_string()));
        assert!(!with_dairy.dietary_tags.contains(&"dairy_free".to_string()));
    }

    #[test]
    fn test_dietary_tags_are_sorted() {
        let derived = derive_attributes(&[ingredient(true, true, &[])]);
        assert_eq!(
            derived.dietary_tags,
            vec!["dairy_free", "gluten_free", "vegan", "vegetarian"]
        );
    }

    #[test]
    fn test_order_insensitive() {
        let a = ingredient(true, false, &["eggs", "dairy"]);
        let b = ingredient(false, false, &["fish"]);
        let forward = derive_attributes(&[a.clone(), b.clone()]);
        let reverse = derive_attributes(&[b, a]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_idempotent_over_same_set() {
        let set = vec![
            ingredient(true, false, &["eggs"]),
            ingredient(true, true, &["sesame"]),
        ];
        assert_eq!(derive_attributes(&set), derive_attributes(&set));
    }
}
