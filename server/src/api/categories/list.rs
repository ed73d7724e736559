use super::create::CategoryResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::DishCategory;
use crate::schema::dish_categories;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
pub struct ListCategoriesParams {
    /// Include categories that admins have switched off (default: false)
    pub include_inactive: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    params(ListCategoriesParams),
    responses(
        (status = 200, description = "Categories ordered by sort_order, then name", body = Vec<CategoryResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_categories(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListCategoriesParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let mut query = dish_categories::table
        .filter(dish_categories::deleted_at.is_null())
        .order((
            dish_categories::sort_order.asc(),
            dish_categories::name.asc(),
        ))
        .into_boxed();

    if !params.include_inactive.unwrap_or(false) {
        query = query.filter(dish_categories::is_active.eq(true));
    }

    match query
        .select(DishCategory::as_select())
        .load::<DishCategory>(&mut conn)
    {
        Ok(categories) => {
            let response: Vec<CategoryResponse> = categories
                .into_iter()
                .map(|c| CategoryResponse {
                    id: c.id,
                    name: c.name,
                    sort_order: c.sort_order,
                    is_active: c.is_active,
                })
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to list categories: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list categories".to_string(),
                }),
            )
                .into_response()
        }
    }
}
