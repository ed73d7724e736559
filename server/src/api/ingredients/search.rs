use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{canonical_ingredients, ingredient_aliases};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Deserialize, IntoParams)]
pub struct SearchIngredientsParams {
    /// Prefix to match against alias display names, case-insensitively.
    pub q: Option<String>,
    /// Maximum number of hits to return (default: 10, max: 50)
    pub limit: Option<i64>,
}

#[derive(Serialize, ToSchema)]
pub struct AliasSearchHit {
    pub alias_id: Uuid,
    pub display_name: String,
    pub canonical_ingredient_id: Uuid,
    pub canonical_name: String,
    pub ingredient_family: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
}

diesel::define_sql_function! {
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Turn user input into a lowercased prefix LIKE pattern, escaping the
/// characters LIKE treats specially. Matching against `LOWER(display_name)`
/// keeps the scan on the functional prefix index.
fn prefix_pattern(q: &str) -> String {
    let mut pattern = q
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    pattern.push('%');
    pattern
}

#[utoipa::path(
    get,
    path = "/api/ingredients/search",
    tag = "ingredients",
    params(SearchIngredientsParams),
    responses(
        (status = 200, description = "Matching aliases, alphabetical by display name", body = Vec<AliasSearchHit>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_ingredients(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<SearchIngredientsParams>,
) -> impl IntoResponse {
    let query = params.q.as_deref().map(str::trim).unwrap_or("");
    if query.is_empty() {
        return (StatusCode::OK, Json(Vec::<AliasSearchHit>::new())).into_response();
    }

    let limit = params.limit.unwrap_or(10).clamp(1, 50);
    let pattern = prefix_pattern(query);

    let mut conn = get_conn!(pool);

    let result = ingredient_aliases::table
        .inner_join(canonical_ingredients::table)
        .filter(lower(ingredient_aliases::display_name).like(&pattern))
        .order(ingredient_aliases::display_name.asc())
        .limit(limit)
        .select((
            ingredient_aliases::id,
            ingredient_aliases::display_name,
            canonical_ingredients::id,
            canonical_ingredients::canonical_name,
            canonical_ingredients::ingredient_family,
            canonical_ingredients::is_vegetarian,
            canonical_ingredients::is_vegan,
        ))
        .load::<(Uuid, String, Uuid, String, String, bool, bool)>(&mut conn);

    match result {
        Ok(rows) => {
            let hits: Vec<AliasSearchHit> = rows
                .into_iter()
                .map(
                    |(
                        alias_id,
                        display_name,
                        canonical_ingredient_id,
                        canonical_name,
                        ingredient_family,
                        is_vegetarian,
                        is_vegan,
                    )| AliasSearchHit {
                        alias_id,
                        display_name,
                        canonical_ingredient_id,
                        canonical_name,
                        ingredient_family,
                        is_vegetarian,
                        is_vegan,
                    },
                )
                .collect();
            (StatusCode::OK, Json(hits)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to search ingredients: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to search ingredients".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::prefix_pattern;

    #[test]
    fn test_prefix_pattern_plain() {
        assert_eq!(prefix_pattern("egg"), "egg%");
    }

    #[test]
    fn test_prefix_pattern_folds_case() {
        // Patterns are matched against LOWER(display_name), so mixed-case
        // input must fold before escaping.
        assert_eq!(prefix_pattern("Egg Noodle"), "egg noodle%");
    }

    #[test]
    fn test_prefix_pattern_escapes_wildcards() {
        assert_eq!(prefix_pattern("50%_milk"), "50\\%\\_milk%");
    }

    #[test]
    fn test_prefix_pattern_escapes_backslash_first() {
        assert_eq!(prefix_pattern("a\\%"), "a\\\\\\%%");
    }
}
