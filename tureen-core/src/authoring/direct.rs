//! Direct-mode persistence: the real write path behind an authoring session.

use async_trait::async_trait;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::{ApiError, AuthoringError};
use crate::types::{
    CreateDishRequest, DishResponse, SetDishIngredientsRequest, UpdateDishRequest,
};

use super::draft::DishDraft;
use super::selection::IngredientSelection;
use super::session::{DishPersist, SaveOutcome};

/// The dish write surface of the API, as a trait so authoring flows can run
/// against a fake writer in tests.
#[async_trait]
pub trait DishWriter: Send + Sync {
    async fn create_dish(&self, request: &CreateDishRequest) -> Result<DishResponse, ApiError>;

    async fn update_dish(
        &self,
        dish_id: Uuid,
        request: &UpdateDishRequest,
    ) -> Result<DishResponse, ApiError>;

    async fn set_dish_ingredients(
        &self,
        dish_id: Uuid,
        request: &SetDishIngredientsRequest,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl DishWriter for ApiClient {
    async fn create_dish(&self, request: &CreateDishRequest) -> Result<DishResponse, ApiError> {
        ApiClient::create_dish(self, request).await
    }

    async fn update_dish(
        &self,
        dish_id: Uuid,
        request: &UpdateDishRequest,
    ) -> Result<DishResponse, ApiError> {
        ApiClient::update_dish(self, dish_id, request).await
    }

    async fn set_dish_ingredients(
        &self,
        dish_id: Uuid,
        request: &SetDishIngredientsRequest,
    ) -> Result<(), ApiError> {
        ApiClient::set_dish_ingredients(self, dish_id, request).await
    }
}

#[async_trait]
impl<W: DishWriter + ?Sized> DishWriter for &W {
    async fn create_dish(&self, request: &CreateDishRequest) -> Result<DishResponse, ApiError> {
        (**self).create_dish(request).await
    }

    async fn update_dish(
        &self,
        dish_id: Uuid,
        request: &UpdateDishRequest,
    ) -> Result<DishResponse, ApiError> {
        (**self).update_dish(dish_id, request).await
    }

    async fn set_dish_ingredients(
        &self,
        dish_id: Uuid,
        request: &SetDishIngredientsRequest,
    ) -> Result<(), ApiError> {
        (**self).set_dish_ingredients(dish_id, request).await
    }
}

/// The ordered direct write path: scalar record first, then the link
/// replacement, reporting only after both.
///
/// A failed scalar write is an error; a failed link write after a
/// successful scalar write is `SavedWithWarning`, never a rollback. The
/// link replacement always runs, empty selection included, so the derived
/// attributes converge to the submitted selection.
pub(super) async fn write_dish_with_links<W: DishWriter>(
    writer: &W,
    draft: &DishDraft,
    selection: &IngredientSelection,
    existing: Option<Uuid>,
) -> Result<SaveOutcome, AuthoringError> {
    draft.validate()?;
    let (Some(restaurant_id), Some(menu_category_id)) =
        (draft.restaurant_id, draft.menu_category_id)
    else {
        return Err(AuthoringError::Validation(
            "restaurant and menu section must be set before a direct save".to_string(),
        ));
    };

    let dish_id = match existing {
        None => {
            let request = CreateDishRequest {
                restaurant_id,
                menu_category_id,
                dish_category_id: draft.dish_category_id,
                name: draft.name.trim().to_string(),
                description: draft.description.clone(),
                price_cents: draft.price_cents,
                calories: draft.calories,
                spice_level: draft.spice_level,
                is_available: Some(draft.is_available),
                photo_url: draft.photo_url.clone(),
            };
            writer
                .create_dish(&request)
                .await
                .map_err(AuthoringError::DishWrite)?
                .id
        }
        Some(dish_id) => {
            let request = UpdateDishRequest {
                menu_category_id: Some(menu_category_id),
                dish_category_id: Some(draft.dish_category_id),
                name: Some(draft.name.trim().to_string()),
                description: Some(draft.description.clone()),
                price_cents: Some(draft.price_cents),
                calories: Some(draft.calories),
                spice_level: Some(draft.spice_level),
                is_available: Some(draft.is_available),
                photo_url: Some(draft.photo_url.clone()),
            };
            writer
                .update_dish(dish_id, &request)
                .await
                .map_err(AuthoringError::DishWrite)?
                .id
        }
    };

    let request = SetDishIngredientsRequest {
        ingredients: selection.write_rows(),
    };
    match writer.set_dish_ingredients(dish_id, &request).await {
        Ok(()) => Ok(SaveOutcome::Saved { dish_id }),
        Err(e) => Ok(SaveOutcome::SavedWithWarning {
            dish_id,
            warning: format!("dish saved but ingredient links were not updated: {}", e),
        }),
    }
}

/// Direct-mode persist capability: every submission writes immediately.
pub struct ClientPersist<W: DishWriter> {
    writer: W,
}

impl<W: DishWriter> ClientPersist<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: DishWriter> DishPersist for ClientPersist<W> {
    async fn persist(
        &mut self,
        draft: &DishDraft,
        selection: &IngredientSelection,
        existing: Option<Uuid>,
    ) -> Result<SaveOutcome, AuthoringError> {
        write_dish_with_links(&self.writer, draft, selection, existing).await
    }
}
