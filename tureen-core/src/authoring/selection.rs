//! Ingredient selection state for the dish authoring flow.
//!
//! The selection tracks canonical-ingredient identity, not display strings:
//! two aliases of the same canonical ingredient are the same selection
//! entry. Order of first pick is preserved for display.

use uuid::Uuid;

use crate::types::{AliasHit, DishIngredientLink, DishIngredientWrite, IngredientRef};

/// One picked ingredient: canonical identity plus the alias it was picked
/// under and an optional free-text quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedIngredient {
    pub ingredient: IngredientRef,
    pub display_name: String,
    pub quantity: Option<String>,
}

/// The operator's current ingredient selection, de-duplicated by canonical
/// ingredient id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientSelection {
    items: Vec<SelectedIngredient>,
}

impl IngredientSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a selection from a dish's current link rows, resolving each
    /// canonical ingredient to a display alias.
    ///
    /// The display alias is the first alphabetically (case-insensitive,
    /// then byte order) among the ingredient's aliases, falling back to the
    /// canonical name when it has none. This is the only place that rule
    /// lives.
    pub fn from_links(links: &[DishIngredientLink]) -> Self {
        let mut selection = Self::new();
        for link in links {
            selection.items.push(SelectedIngredient {
                ingredient: IngredientRef {
                    canonical_ingredient_id: link.canonical_ingredient_id,
                    canonical_name: link.canonical_name.clone(),
                    ingredient_family: link.ingredient_family.clone(),
                    is_vegetarian: link.is_vegetarian,
                    is_vegan: link.is_vegan,
                },
                display_name: preferred_display_name(link),
                quantity: link.quantity.clone(),
            });
        }
        selection
    }

    /// Add an ingredient from a search hit. Picking an already-selected
    /// canonical ingredient updates its display name and quantity in place,
    /// keeping its position.
    pub fn pick(&mut self, hit: &AliasHit, quantity: Option<String>) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|s| s.ingredient.canonical_ingredient_id == hit.canonical_ingredient_id)
        {
            existing.display_name = hit.display_name.clone();
            existing.quantity = quantity;
            return;
        }

        self.items.push(SelectedIngredient {
            ingredient: hit.ingredient_ref(),
            display_name: hit.display_name.clone(),
            quantity,
        });
    }

    /// Remove an ingredient by canonical id. Returns whether it was present.
    pub fn unpick(&mut self, canonical_ingredient_id: Uuid) -> bool {
        let before = self.items.len();
        self.items
            .retain(|s| s.ingredient.canonical_ingredient_id != canonical_ingredient_id);
        self.items.len() != before
    }

    /// Update the quantity of a selected ingredient. Returns whether the
    /// ingredient was present.
    pub fn set_quantity(&mut self, canonical_ingredient_id: Uuid, quantity: Option<String>) -> bool {
        match self
            .items
            .iter_mut()
            .find(|s| s.ingredient.canonical_ingredient_id == canonical_ingredient_id)
        {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, canonical_ingredient_id: Uuid) -> bool {
        self.items
            .iter()
            .any(|s| s.ingredient.canonical_ingredient_id == canonical_ingredient_id)
    }

    pub fn items(&self) -> &[SelectedIngredient] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The link-replacement rows for this selection.
    pub fn write_rows(&self) -> Vec<DishIngredientWrite> {
        self.items
            .iter()
            .map(|s| DishIngredientWrite {
                canonical_ingredient_id: s.ingredient.canonical_ingredient_id,
                quantity: s.quantity.clone(),
            })
            .collect()
    }
}

fn preferred_display_name(link: &DishIngredientLink) -> String {
    link.aliases
        .iter()
        .min_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.as_str().cmp(b.as_str()))
        })
        .cloned()
        .unwrap_or_else(|| link.canonical_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(display_name: &str, canonical_id: Uuid, canonical_name: &str) -> AliasHit {
        AliasHit {
            alias_id: Uuid::new_v4(),
            display_name: display_name.to_string(),
            canonical_ingredient_id: canonical_id,
            canonical_name: canonical_name.to_string(),
            ingredient_family: "produce".to_string(),
            is_vegetarian: true,
            is_vegan: true,
        }
    }

    fn link(canonical_name: &str, aliases: &[&str]) -> DishIngredientLink {
        DishIngredientLink {
            canonical_ingredient_id: Uuid::new_v4(),
            canonical_name: canonical_name.to_string(),
            ingredient_family: "meat".to_string(),
            is_vegetarian: false,
            is_vegan: false,
            quantity: None,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_pick_dedupes_by_canonical_id() {
        let beef = Uuid::new_v4();
        let mut selection = IngredientSelection::new();
        selection.pick(&hit("Ground Beef", beef, "beef"), Some("200 g".to_string()));
        selection.pick(&hit("Onion", Uuid::new_v4(), "onion"), None);
        selection.pick(&hit("Beef Mince", beef, "beef"), Some("250 g".to_string()));

        assert_eq!(selection.len(), 2);
        // Re-picking keeps position but refreshes display and quantity.
        assert_eq!(selection.items()[0].display_name, "Beef Mince");
        assert_eq!(selection.items()[0].quantity, Some("250 g".to_string()));
    }

    #[test]
    fn test_unpick() {
        let beef = Uuid::new_v4();
        let mut selection = IngredientSelection::new();
        selection.pick(&hit("Ground Beef", beef, "beef"), None);

        assert!(selection.unpick(beef));
        assert!(selection.is_empty());
        assert!(!selection.unpick(beef));
    }

    #[test]
    fn test_set_quantity() {
        let beef = Uuid::new_v4();
        let mut selection = IngredientSelection::new();
        selection.pick(&hit("Ground Beef", beef, "beef"), None);

        assert!(selection.set_quantity(beef, Some("1 lb".to_string())));
        assert_eq!(selection.items()[0].quantity, Some("1 lb".to_string()));
        assert!(!selection.set_quantity(Uuid::new_v4(), None));
    }

    #[test]
    fn test_from_links_picks_first_alias_alphabetically() {
        let selection =
            IngredientSelection::from_links(&[link("beef", &["Ground Beef", "Beef Mince"])]);
        assert_eq!(selection.items()[0].display_name, "Beef Mince");
    }

    #[test]
    fn test_from_links_alias_order_is_case_insensitive() {
        let selection =
            IngredientSelection::from_links(&[link("beef", &["ground beef", "Beef Mince"])]);
        assert_eq!(selection.items()[0].display_name, "Beef Mince");
    }

    #[test]
    fn test_from_links_falls_back_to_canonical_name() {
        let selection = IngredientSelection::from_links(&[link("beef", &[])]);
        assert_eq!(selection.items()[0].display_name, "beef");
    }

    #[test]
    fn test_write_rows_carry_quantities() {
        let beef = Uuid::new_v4();
        let mut selection = IngredientSelection::new();
        selection.pick(&hit("Ground Beef", beef, "beef"), Some("200 g".to_string()));

        let rows = selection.write_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].canonical_ingredient_id, beef);
        assert_eq!(rows[0].quantity, Some("200 g".to_string()));
    }
}
