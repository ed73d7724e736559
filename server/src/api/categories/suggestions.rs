use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use axum::{extract::Query, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
pub struct SuggestCategoriesParams {
    /// Cuisine label to suggest for, matched case-insensitively
    pub cuisine: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/categories/suggestions",
    tag = "categories",
    params(SuggestCategoriesParams),
    responses(
        (status = 200, description = "Ordered advisory category names; empty for unknown cuisines", body = Vec<String>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn suggest_categories(
    AuthUser(_user): AuthUser,
    Query(params): Query<SuggestCategoriesParams>,
) -> impl IntoResponse {
    let cuisine = params.cuisine.as_deref().unwrap_or("");
    let suggestions = tureen_core::suggestions::suggest_categories(cuisine);

    (StatusCode::OK, Json(suggestions)).into_response()
}
