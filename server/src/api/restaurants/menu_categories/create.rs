use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{MenuCategory, NewMenuCategory};
use crate::schema::{menu_categories, restaurants};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateMenuCategoryRequest {
    /// Section name, unique within the restaurant case-insensitively
    pub name: String,
    /// Position on the menu (default: 0)
    pub sort_order: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct MenuCategoryResponse {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub sort_order: i32,
}

#[utoipa::path(
    post,
    path = "/api/restaurants/{id}/menu-categories",
    tag = "restaurants",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    request_body(content = CreateMenuCategoryRequest, example = json!({
        "name": "Starters",
        "sort_order": 1
    })),
    responses(
        (status = 201, description = "Menu section created", body = MenuCategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 409, description = "Menu section already exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_menu_category(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(restaurant_id): Path<Uuid>,
    Json(request): Json<CreateMenuCategoryRequest>,
) -> impl IntoResponse {
    if request.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Menu section name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

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

    let new_category = NewMenuCategory {
        restaurant_id,
        name: &request.name,
        sort_order: request.sort_order.unwrap_or(0),
    };

    match diesel::insert_into(menu_categories::table)
        .values(&new_category)
        .returning(MenuCategory::as_returning())
        .get_result::<MenuCategory>(&mut conn)
    {
        Ok(category) => (
            StatusCode::CREATED,
            Json(MenuCategoryResponse {
                id: category.id,
                restaurant_id: category.restaurant_id,
                name: category.name,
                sort_order: category.sort_order,
            }),
        )
            .into_response(),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!(
                    "Menu section '{}' already exists for this restaurant",
                    request.name
                ),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create menu section: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create menu section".to_string(),
                }),
            )
                .into_response()
        }
    }
}
