//! Fake dish writer for testing.
//!
//! Records every write call in order and can be programmed to fail the
//! scalar or the link step, allowing authoring-flow tests to run without a
//! server.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::{
    CreateDishRequest, DishIngredientWrite, DishResponse, SetDishIngredientsRequest,
    UpdateDishRequest,
};

use super::direct::DishWriter;

/// One recorded write call.
#[derive(Debug, Clone, PartialEq)]
pub enum WriterCall {
    CreateDish { name: String },
    UpdateDish { dish_id: Uuid },
    SetIngredients { dish_id: Uuid, count: usize },
}

/// A fake dish writer for testing.
#[derive(Debug, Default)]
pub struct FakeWriter {
    calls: Mutex<Vec<WriterCall>>,
    dishes: Mutex<HashMap<Uuid, DishResponse>>,
    links: Mutex<HashMap<Uuid, Vec<DishIngredientWrite>>>,
    fail_dish_writes: bool,
    fail_link_writes: bool,
    /// When set, only dishes whose name contains this substring fail.
    fail_dish_named: Option<String>,
}

impl FakeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every scalar dish write fail.
    pub fn failing_dish_writes() -> Self {
        Self {
            fail_dish_writes: true,
            ..Self::default()
        }
    }

    /// Make every link write fail while scalar writes succeed.
    pub fn failing_link_writes() -> Self {
        Self {
            fail_link_writes: true,
            ..Self::default()
        }
    }

    /// Fail only scalar writes for dishes whose name contains the given
    /// substring.
    pub fn failing_dish_named(name_contains: &str) -> Self {
        Self {
            fail_dish_named: Some(name_contains.to_string()),
            ..Self::default()
        }
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<WriterCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn dish(&self, dish_id: Uuid) -> Option<DishResponse> {
        self.dishes.lock().unwrap().get(&dish_id).cloned()
    }

    pub fn dish_count(&self) -> usize {
        self.dishes.lock().unwrap().len()
    }

    /// The last link set written for a dish, if any write succeeded.
    pub fn links_for(&self, dish_id: Uuid) -> Option<Vec<DishIngredientWrite>> {
        self.links.lock().unwrap().get(&dish_id).cloned()
    }

    fn record(&self, call: WriterCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DishWriter for FakeWriter {
    async fn create_dish(&self, request: &CreateDishRequest) -> Result<DishResponse, ApiError> {
        self.record(WriterCall::CreateDish {
            name: request.name.clone(),
        });
        let named_failure = self
            .fail_dish_named
            .as_ref()
            .is_some_and(|name| request.name.contains(name.as_str()));
        if self.fail_dish_writes || named_failure {
            return Err(ApiError::Api {
                status: 500,
                message: "dish write refused by fake".to_string(),
            });
        }

        let dish = DishResponse {
            id: Uuid::new_v4(),
            restaurant_id: request.restaurant_id,
            menu_category_id: request.menu_category_id,
            dish_category_id: request.dish_category_id,
            name: request.name.clone(),
            description: request.description.clone(),
            price_cents: request.price_cents,
            calories: request.calories,
            spice_level: request.spice_level,
            allergens: Vec::new(),
            dietary_tags: Vec::new(),
            is_available: request.is_available.unwrap_or(true),
            photo_url: request.photo_url.clone(),
        };
        self.dishes.lock().unwrap().insert(dish.id, dish.clone());
        Ok(dish)
    }

    async fn update_dish(
        &self,
        dish_id: Uuid,
        request: &UpdateDishRequest,
    ) -> Result<DishResponse, ApiError> {
        self.record(WriterCall::UpdateDish { dish_id });
        if self.fail_dish_writes {
            return Err(ApiError::Api {
                status: 500,
                message: "dish write refused by fake".to_string(),
            });
        }

        let mut dishes = self.dishes.lock().unwrap();
        let dish = dishes.get_mut(&dish_id).ok_or(ApiError::Api {
            status: 404,
            message: "no such dish".to_string(),
        })?;

        if let Some(menu_category_id) = request.menu_category_id {
            dish.menu_category_id = menu_category_id;
        }
        if let Some(dish_category_id) = &request.dish_category_id {
            dish.dish_category_id = *dish_category_id;
        }
        if let Some(name) = &request.name {
            dish.name = name.clone();
        }
        if let Some(description) = &request.description {
            dish.description = description.clone();
        }
        if let Some(price_cents) = request.price_cents {
            dish.price_cents = price_cents;
        }
        if let Some(calories) = &request.calories {
            dish.calories = *calories;
        }
        if let Some(spice_level) = &request.spice_level {
            dish.spice_level = *spice_level;
        }
        if let Some(is_available) = request.is_available {
            dish.is_available = is_available;
        }
        if let Some(photo_url) = &request.photo_url {
            dish.photo_url = photo_url.clone();
        }
        Ok(dish.clone())
    }

    async fn set_dish_ingredients(
        &self,
        dish_id: Uuid,
        request: &SetDishIngredientsRequest,
    ) -> Result<(), ApiError> {
        self.record(WriterCall::SetIngredients {
            dish_id,
            count: request.ingredients.len(),
        });
        if self.fail_link_writes {
            return Err(ApiError::Api {
                status: 500,
                message: "link write refused by fake".to_string(),
            });
        }

        self.links
            .lock()
            .unwrap()
            .insert(dish_id, request.ingredients.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_records_calls_in_order() {
        let fake = FakeWriter::new();
        let dish = fake
            .create_dish(&CreateDishRequest {
                restaurant_id: Uuid::new_v4(),
                menu_category_id: Uuid::new_v4(),
                dish_category_id: None,
                name: "Caesar Salad".to_string(),
                description: None,
                price_cents: 1250,
                calories: None,
                spice_level: None,
                is_available: None,
                photo_url: None,
            })
            .await
            .unwrap();
        fake.set_dish_ingredients(
            dish.id,
            &SetDishIngredientsRequest {
                ingredients: vec![],
            },
        )
        .await
        .unwrap();

        assert_eq!(
            fake.calls(),
            vec![
                WriterCall::CreateDish {
                    name: "Caesar Salad".to_string()
                },
                WriterCall::SetIngredients {
                    dish_id: dish.id,
                    count: 0
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_link_writes_still_store_the_dish() {
        let fake = FakeWriter::failing_link_writes();
        let dish = fake
            .create_dish(&CreateDishRequest {
                restaurant_id: Uuid::new_v4(),
                menu_category_id: Uuid::new_v4(),
                dish_category_id: None,
                name: "Pho".to_string(),
                description: None,
                price_cents: 1400,
                calories: None,
                spice_level: Some(1),
                is_available: None,
                photo_url: None,
            })
            .await
            .unwrap();

        let result = fake
            .set_dish_ingredients(
                dish.id,
                &SetDishIngredientsRequest {
                    ingredients: vec![],
                },
            )
            .await;
        assert!(result.is_err());
        assert!(fake.dish(dish.id).is_some());
        assert!(fake.links_for(dish.id).is_none());
    }
}
