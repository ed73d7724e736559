use super::create::CategoryResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::DishCategory;
use crate::schema::dish_categories;
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
pub struct UpdateCategoryRequest {
    /// New category name; uniqueness stays case-insensitive
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    /// Inactive categories are hidden from pickers but keep their dishes
    pub is_active: Option<bool>,
}

#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Dish category ID")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Another category already has that name", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> impl IntoResponse {
    if let Some(ref name) = request.name {
        if name.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Category name cannot be empty".to_string(),
                }),
            )
                .into_response();
        }
    }

    let mut conn = get_conn!(pool);

    let result: Result<DishCategory, diesel::result::Error> = conn.transaction(|conn| {
        let current: DishCategory = dish_categories::table
            .find(id)
            .filter(dish_categories::deleted_at.is_null())
            .select(DishCategory::as_select())
            .first(conn)?;

        diesel::update(dish_categories::table.find(id))
            .set((
                dish_categories::name.eq(request.name.unwrap_or(current.name)),
                dish_categories::sort_order.eq(request.sort_order.unwrap_or(current.sort_order)),
                dish_categories::is_active.eq(request.is_active.unwrap_or(current.is_active)),
            ))
            .returning(DishCategory::as_returning())
            .get_result(conn)
    });

    match result {
        Ok(category) => (
            StatusCode::OK,
            Json(CategoryResponse {
                id: category.id,
                name: category.name,
                sort_order: category.sort_order,
                is_active: category.is_active,
            }),
        )
            .into_response(),
        Err(diesel::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Category not found".to_string(),
            }),
        )
            .into_response(),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Another category already has that name".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update category: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update category".to_string(),
                }),
            )
                .into_response()
        }
    }
}
