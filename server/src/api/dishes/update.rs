use super::create::{validate_dish_scalars, DishResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Dish;
use crate::schema::{dish_categories, dishes, menu_categories, restaurants};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Wraps a present field (including an explicit null) in `Some`, so absent
/// and null stay distinguishable after deserialization.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}

/// Scalar dish update. Absent fields are left unchanged; nullable fields
/// accept an explicit null to clear. The derived attribute columns cannot
/// be set here at all.
#[derive(Deserialize, ToSchema)]
pub struct UpdateDishRequest {
    /// New menu section; must belong to the same restaurant
    pub menu_category_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub dish_category_id: Option<Option<Uuid>>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub price_cents: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub calories: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub spice_level: Option<Option<i32>>,
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub photo_url: Option<Option<String>>,
}

#[utoipa::path(
    patch,
    path = "/api/dishes/{id}",
    tag = "dishes",
    params(
        ("id" = Uuid, Path, description = "Dish ID")
    ),
    request_body = UpdateDishRequest,
    responses(
        (status = 200, description = "Dish updated", body = DishResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Dish not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_dish(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDishRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let current: Dish = match dishes::table
        .inner_join(restaurants::table)
        .filter(dishes::id.eq(id))
        .filter(dishes::deleted_at.is_null())
        .filter(restaurants::owner_id.eq(user.id))
        .filter(restaurants::deleted_at.is_null())
        .select(Dish::as_select())
        .first(&mut conn)
    {
        Ok(d) => d,
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Dish not found".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to fetch dish: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch dish".to_string(),
                }),
            )
                .into_response();
        }
    };

    let name = request.name.unwrap_or(current.name);
    let price_cents = request.price_cents.unwrap_or(current.price_cents);
    let calories = request.calories.unwrap_or(current.calories);
    let spice_level = request.spice_level.unwrap_or(current.spice_level);

    if let Err(message) = validate_dish_scalars(&name, price_cents, calories, spice_level) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response();
    }

    let menu_category_id = request.menu_category_id.unwrap_or(current.menu_category_id);
    if menu_category_id != current.menu_category_id {
        match menu_categories::table
            .filter(menu_categories::id.eq(menu_category_id))
            .filter(menu_categories::restaurant_id.eq(current.restaurant_id))
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
    }

    let dish_category_id = request.dish_category_id.unwrap_or(current.dish_category_id);
    if let Some(new_category) = dish_category_id {
        if dish_category_id != current.dish_category_id {
            match dish_categories::table
                .filter(dish_categories::id.eq(new_category))
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
    }

    let result = diesel::update(dishes::table.find(id))
        .set((
            dishes::menu_category_id.eq(menu_category_id),
            dishes::dish_category_id.eq(dish_category_id),
            dishes::name.eq(name),
            dishes::description.eq(request.description.unwrap_or(current.description)),
            dishes::price_cents.eq(price_cents),
            dishes::calories.eq(calories),
            dishes::spice_level.eq(spice_level),
            dishes::is_available.eq(request.is_available.unwrap_or(current.is_available)),
            dishes::photo_url.eq(request.photo_url.unwrap_or(current.photo_url)),
        ))
        .returning(Dish::as_returning())
        .get_result::<Dish>(&mut conn);

    match result {
        Ok(dish) => (StatusCode::OK, Json(DishResponse::from(dish))).into_response(),
        Err(e) => {
            tracing::error!("Failed to update dish: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update dish".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UpdateDishRequest;

    #[test]
    fn test_absent_and_null_are_distinguished() {
        let absent: UpdateDishRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);

        let cleared: UpdateDishRequest = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: UpdateDishRequest =
            serde_json::from_str(r#"{"description": "Wood-fired"}"#).unwrap();
        assert_eq!(set.description, Some(Some("Wood-fired".to_string())));
    }

    #[test]
    fn test_derived_columns_are_not_accepted() {
        // Unknown fields are ignored, not applied
        let request: UpdateDishRequest =
            serde_json::from_str(r#"{"allergens": ["gluten"], "name": "Bread"}"#).unwrap();
        assert_eq!(request.name, Some("Bread".to_string()));
    }
}
