use super::create::DishResponse;
use super::ingredients::{load_dish_links, DishIngredientLink};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Dish;
use crate::schema::{dishes, restaurants};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Single-dish read-back: scalars, the derived attribute columns, and the
/// current ingredient links for authoring-form seeding.
#[derive(Serialize, ToSchema)]
pub struct DishDetailResponse {
    #[serde(flatten)]
    pub dish: DishResponse,
    pub ingredients: Vec<DishIngredientLink>,
}

#[utoipa::path(
    get,
    path = "/api/dishes/{id}",
    tag = "dishes",
    params(
        ("id" = Uuid, Path, description = "Dish ID")
    ),
    responses(
        (status = 200, description = "Dish details with ingredient links", body = DishDetailResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Dish not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_dish(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let dish: Dish = match dishes::table
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

    let ingredients = match load_dish_links(&mut conn, id) {
        Ok(links) => links,
        Err(e) => {
            tracing::error!("Failed to load dish ingredients: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load dish ingredients".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(DishDetailResponse {
            dish: DishResponse::from(dish),
            ingredients,
        }),
    )
        .into_response()
}
