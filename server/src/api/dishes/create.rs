use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{Dish, NewDish};
use crate::schema::{dish_categories, dishes, menu_categories, restaurants};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateDishRequest {
    pub restaurant_id: Uuid,
    /// Menu section the dish appears under; must belong to the restaurant
    pub menu_category_id: Uuid,
    /// Optional curated dish category; must be active
    pub dish_category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    /// Price in cents, must be positive
    pub price_cents: i32,
    pub calories: Option<i32>,
    /// 0 (none) to 3 (hot)
    pub spice_level: Option<i32>,
    /// Defaults to true
    pub is_available: Option<bool>,
    pub photo_url: Option<String>,
}

/// Dish scalars plus the derived attribute columns. The derived arrays are
/// written only by the ingredient-link replacement, never by dish CRUD.
#[derive(Serialize, ToSchema)]
pub struct DishResponse {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub menu_category_id: Uuid,
    pub dish_category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    pub calories: Option<i32>,
    pub spice_level: Option<i32>,
    pub allergens: Vec<String>,
    pub dietary_tags: Vec<String>,
    pub is_available: bool,
    pub photo_url: Option<String>,
}

impl From<Dish> for DishResponse {
    fn from(d: Dish) -> Self {
        DishResponse {
            id: d.id,
            restaurant_id: d.restaurant_id,
            menu_category_id: d.menu_category_id,
            dish_category_id: d.dish_category_id,
            name: d.name,
            description: d.description,
            price_cents: d.price_cents,
            calories: d.calories,
            spice_level: d.spice_level,
            allergens: d.allergens.into_iter().flatten().collect(),
            dietary_tags: d.dietary_tags.into_iter().flatten().collect(),
            is_available: d.is_available,
            photo_url: d.photo_url,
        }
    }
}

pub(super) fn validate_dish_scalars(
    name: &str,
    price_cents: i32,
    calories: Option<i32>,
    spice_level: Option<i32>,
) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Dish name cannot be empty".to_string());
    }
    if price_cents <= 0 {
        return Err("Price must be positive".to_string());
    }
    if let Some(calories) = calories {
        if calories < 0 {
            return Err("Calories cannot be negative".to_string());
        }
    }
    if let Some(spice) = spice_level {
        if !(0..=3).contains(&spice) {
            return Err("Spice level must be between 0 and 3".to_string());
        }
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/dishes",
    tag = "dishes",
    request_body(content = CreateDishRequest, example = json!({
        "restaurant_id": "7b19e5a0-2a7c-4b8e-9f0a-6f9a4a7d2c11",
        "menu_category_id": "0ac8f3de-5b2f-41d7-9c6e-3a1b8d4e7f22",
        "name": "Margherita",
        "price_cents": 1250,
        "spice_level": 0
    })),
    responses(
        (status = 201, description = "Dish created; derived attributes start empty", body = DishResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_dish(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateDishRequest>,
) -> impl IntoResponse {
    if let Err(message) = validate_dish_scalars(
        &request.name,
        request.price_cents,
        request.calories,
        request.spice_level,
    ) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    match restaurants::table
        .filter(restaurants::id.eq(request.restaurant_id))
        .filter(restaurants::owner_id.eq(user.id))
        .filter(restaurants::deleted_at.is_null())
        .select(restaurants::id)
        .first::<Uuid>(&mut conn)
    {
        Ok(_) => {}
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Restaurant not found".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to look up restaurant: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to look up restaurant".to_string(),
                }),
            )
                .into_response();
        }
    }

    match menu_categories::table
        .filter(menu_categories::id.eq(request.menu_category_id))
        .filter(menu_categories::restaurant_id.eq(request.restaurant_id))
        .filter(menu_categories::deleted_at.is_null())
        .select(menu_categories::id)
        .first::<Uuid>(&mut conn)
    {
        Ok(_) => {}
        Err(diesel::NotFound) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Menu section does not belong to this restaurant".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to look up menu section: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to look up menu section".to_string(),
                }),
            )
                .into_response();
        }
    }

    if let Some(dish_category_id) = request.dish_category_id {
        match dish_categories::table
            .filter(dish_categories::id.eq(dish_category_id))
            .filter(dish_categories::deleted_at.is_null())
            .filter(dish_categories::is_active.eq(true))
            .select(dish_categories::id)
            .first::<Uuid>(&mut conn)
        {
            Ok(_) => {}
            Err(diesel::NotFound) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Dish category is not active".to_string(),
                    }),
                )
                    .into_response();
            }
            Err(e) => {
                tracing::error!("Failed to look up dish category: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to look up dish category".to_string(),
                    }),
                )
                    .into_response();
            }
        }
    }

    let new_dish = NewDish {
        restaurant_id: request.restaurant_id,
        menu_category_id: request.menu_category_id,
        dish_category_id: request.dish_category_id,
        name: &request.name,
        description: request.description.as_deref(),
        price_cents: request.price_cents,
        calories: request.calories,
        spice_level: request.spice_level,
        is_available: request.is_available.unwrap_or(true),
        photo_url: request.photo_url.as_deref(),
    };

    match diesel::insert_into(dishes::table)
        .values(&new_dish)
        .returning(Dish::as_returning())
        .get_result::<Dish>(&mut conn)
    {
        Ok(dish) => (StatusCode::CREATED, Json(DishResponse::from(dish))).into_response(),
        Err(e) => {
            tracing::error!("Failed to create dish: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create dish".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_dish_scalars;

    #[test]
    fn test_accepts_minimal_dish() {
        assert!(validate_dish_scalars("Margherita", 1250, None, None).is_ok());
    }

    #[test]
    fn test_rejects_blank_name() {
        let err = validate_dish_scalars("   ", 1250, None, None).unwrap_err();
        assert_eq!(err, "Dish name cannot be empty");
    }

    #[test]
    fn test_rejects_free_dishes() {
        assert!(validate_dish_scalars("Tap water", 0, None, None).is_err());
        assert!(validate_dish_scalars("Refund", -100, None, None).is_err());
    }

    #[test]
    fn test_spice_level_range() {
        assert!(validate_dish_scalars("Vindaloo", 900, None, Some(3)).is_ok());
        assert!(validate_dish_scalars("Vindaloo", 900, None, Some(4)).is_err());
        assert!(validate_dish_scalars("Vindaloo", 900, None, Some(-1)).is_err());
    }

    #[test]
    fn test_rejects_negative_calories() {
        assert!(validate_dish_scalars("Salad", 700, Some(-10), None).is_err());
    }
}
