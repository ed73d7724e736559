//! The in-progress dish record held by an authoring session.

use uuid::Uuid;

use crate::error::AuthoringError;

/// Scalar dish fields as edited in the form, before any write.
///
/// `restaurant_id` and `menu_category_id` are optional because wizard-mode
/// drafts are staged before either exists; a direct save requires both.
#[derive(Debug, Clone, PartialEq)]
pub struct DishDraft {
    pub restaurant_id: Option<Uuid>,
    pub menu_category_id: Option<Uuid>,
    pub dish_category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    pub calories: Option<i32>,
    pub spice_level: Option<i32>,
    pub photo_url: Option<String>,
    pub is_available: bool,
}

impl DishDraft {
    pub fn new(name: &str, price_cents: i32) -> Self {
        Self {
            restaurant_id: None,
            menu_category_id: None,
            dish_category_id: None,
            name: name.to_string(),
            description: None,
            price_cents,
            calories: None,
            spice_level: None,
            photo_url: None,
            is_available: true,
        }
    }

    /// Field-level validation, run before any write or staging is attempted.
    pub fn validate(&self) -> Result<(), AuthoringError> {
        if self.name.trim().is_empty() {
            return Err(AuthoringError::Validation(
                "dish name must not be empty".to_string(),
            ));
        }
        if self.price_cents <= 0 {
            return Err(AuthoringError::Validation(
                "dish price must be positive".to_string(),
            ));
        }
        if let Some(level) = self.spice_level {
            if !(0..=3).contains(&level) {
                return Err(AuthoringError::Validation(
                    "spice level must be between 0 and 3".to_string(),
                ));
            }
        }
        if let Some(calories) = self.calories {
            if calories < 0 {
                return Err(AuthoringError::Validation(
                    "calories must not be negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft() {
        assert!(DishDraft::new("Caesar Salad", 1250).validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(DishDraft::new("   ", 1250).validate().is_err());
    }

    #[test]
    fn test_non_positive_price_rejected() {
        assert!(DishDraft::new("Caesar Salad", 0).validate().is_err());
        assert!(DishDraft::new("Caesar Salad", -100).validate().is_err());
    }

    #[test]
    fn test_spice_level_range() {
        let mut draft = DishDraft::new("Green Curry", 1600);
        draft.spice_level = Some(3);
        assert!(draft.validate().is_ok());
        draft.spice_level = Some(4);
        assert!(draft.validate().is_err());
    }
}
