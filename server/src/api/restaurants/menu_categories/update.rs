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
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct UpdateMenuCategoryRequest {
    /// New section name; uniqueness within the restaurant stays
    /// case-insensitive
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}

#[utoipa::path(
    patch,
    path = "/api/menu-categories/{id}",
    tag = "restaurants",
    params(
        ("id" = Uuid, Path, description = "Menu section ID")
    ),
    request_body = UpdateMenuCategoryRequest,
    responses(
        (status = 200, description = "Menu section updated", body = MenuCategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Menu section not found", body = ErrorResponse),
        (status = 409, description = "Another section already has that name", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_menu_category(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMenuCategoryRequest>,
) -> impl IntoResponse {
    if let Some(ref name) = request.name {
        if name.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Menu section name cannot be empty".to_string(),
                }),
            )
                .into_response();
        }
    }

    let mut conn = get_conn!(pool);

    let result: Result<MenuCategory, diesel::result::Error> = conn.transaction(|conn| {
        let current: MenuCategory = menu_categories::table
            .inner_join(restaurants::table)
            .filter(menu_categories::id.eq(id))
            .filter(menu_categories::deleted_at.is_null())
            .filter(restaurants::owner_id.eq(user.id))
            .filter(restaurants::deleted_at.is_null())
            .select(MenuCategory::as_select())
            .first(conn)?;

        diesel::update(menu_categories::table.find(id))
            .set((
                menu_categories::name.eq(request.name.unwrap_or(current.name)),
                menu_categories::sort_order.eq(request.sort_order.unwrap_or(current.sort_order)),
            ))
            .returning(MenuCategory::as_returning())
            .get_result(conn)
    });

    match result {
        Ok(category) => (
            StatusCode::OK,
            Json(MenuCategoryResponse {
                id: category.id,
                restaurant_id: category.restaurant_id,
                name: category.name,
                sort_order: category.sort_order,
            }),
        )
            .into_response(),
        Err(diesel::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Menu section not found".to_string(),
            }),
        )
            .into_response(),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Another menu section already has that name".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update menu section: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update menu section".to_string(),
                }),
            )
                .into_response()
        }
    }
}
