use super::create::MenuCategoryResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::MenuCategory;
use crate::schema::{menu_categories, restaurants};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/menu-categories",
    tag = "restaurants",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Menu sections in display order", body = Vec<MenuCategoryResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_menu_categories(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(restaurant_id): Path<Uuid>,
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

    match menu_categories::table
        .filter(menu_categories::restaurant_id.eq(restaurant_id))
        .filter(menu_categories::deleted_at.is_null())
        .order((
            menu_categories::sort_order.asc(),
            menu_categories::name.asc(),
        ))
        .select(MenuCategory::as_select())
        .load::<MenuCategory>(&mut conn)
    {
        Ok(categories) => {
            let response: Vec<MenuCategoryResponse> = categories
                .into_iter()
                .map(|c| MenuCategoryResponse {
                    id: c.id,
                    restaurant_id: c.restaurant_id,
                    name: c.name,
                    sort_order: c.sort_order,
                })
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to list menu sections: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list menu sections".to_string(),
                }),
            )
                .into_response()
        }
    }
}
