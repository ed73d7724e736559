use super::create::DishResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Dish;
use crate::schema::{dishes, restaurants};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Deserialize, IntoParams)]
pub struct ListDishesParams {
    /// Restrict to one menu section
    pub menu_category_id: Option<Uuid>,
    /// Include dishes marked unavailable (default: false)
    pub include_unavailable: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/dishes",
    tag = "dishes",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID"),
        ListDishesParams
    ),
    responses(
        (status = 200, description = "Dishes, alphabetical", body = Vec<DishResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_dishes(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(restaurant_id): Path<Uuid>,
    Query(params): Query<ListDishesParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match restaurants::table
        .filter(restaurants::id.eq(restaurant_id))
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

    let mut query = dishes::table
        .filter(dishes::restaurant_id.eq(restaurant_id))
        .filter(dishes::deleted_at.is_null())
        .order(dishes::name.asc())
        .into_boxed();

    if let Some(menu_category_id) = params.menu_category_id {
        query = query.filter(dishes::menu_category_id.eq(menu_category_id));
    }

    if !params.include_unavailable.unwrap_or(false) {
        query = query.filter(dishes::is_available.eq(true));
    }

    match query.select(Dish::as_select()).load::<Dish>(&mut conn) {
        Ok(dishes) => {
            let response: Vec<DishResponse> =
                dishes.into_iter().map(DishResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to list dishes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list dishes".to_string(),
                }),
            )
                .into_response()
        }
    }
}
