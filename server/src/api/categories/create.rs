use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{DishCategory, NewDishCategory};
use crate::schema::dish_categories;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// Category name, unique across the catalog case-insensitively
    pub name: String,
    /// Position in curated listings (default: 0)
    pub sort_order: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body(content = CreateCategoryRequest, example = json!({
        "name": "Pizza",
        "sort_order": 10
    })),
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Category already exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    if request.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Category name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let new_category = NewDishCategory {
        name: &request.name,
        sort_order: request.sort_order.unwrap_or(0),
    };

    match diesel::insert_into(dish_categories::table)
        .values(&new_category)
        .returning(DishCategory::as_returning())
        .get_result(&mut conn)
    {
        Ok(category) => (
            StatusCode::CREATED,
            Json(CategoryResponse {
                id: category.id,
                name: category.name,
                sort_order: category.sort_order,
                is_active: category.is_active,
            }),
        )
            .into_response(),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Category '{}' already exists", request.name),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create category: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create category".to_string(),
                }),
            )
                .into_response()
        }
    }
}
