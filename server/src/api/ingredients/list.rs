use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::CanonicalIngredient;
use crate::schema::{canonical_ingredients, ingredient_allergens};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tureen_core::vocab::IngredientFamily;
use utoipa::IntoParams;
use uuid::Uuid;

use super::create::IngredientResponse;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListIngredientsParams {
    /// Restrict to one ingredient family
    pub family: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(ListIngredientsParams),
    responses(
        (status = 200, description = "Canonical ingredients with their allergen codes", body = Vec<IngredientResponse>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_ingredients(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListIngredientsParams>,
) -> impl IntoResponse {
    let family = match params.family.as_deref() {
        Some(raw) => match IngredientFamily::from_str(raw) {
            Some(f) => Some(f),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Unknown ingredient family: {}", raw),
                    }),
                )
                    .into_response()
            }
        },
        None => None,
    };

    let mut conn = get_conn!(pool);

    let mut query = canonical_ingredients::table
        .order(canonical_ingredients::canonical_name.asc())
        .into_boxed();
    if let Some(family) = family {
        query = query.filter(canonical_ingredients::ingredient_family.eq(family.as_str()));
    }

    let ingredients: Vec<CanonicalIngredient> = match query
        .select(CanonicalIngredient::as_select())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch ingredients: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch ingredients".to_string(),
                }),
            )
                .into_response();
        }
    };

    let ids: Vec<Uuid> = ingredients.iter().map(|i| i.id).collect();
    let codes: Vec<(Uuid, String)> = match ingredient_allergens::table
        .filter(ingredient_allergens::canonical_ingredient_id.eq_any(&ids))
        .select((
            ingredient_allergens::canonical_ingredient_id,
            ingredient_allergens::allergen_code,
        ))
        .order(ingredient_allergens::allergen_code.asc())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch ingredient allergens: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch ingredients".to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut codes_by_ingredient: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (ingredient_id, code) in codes {
        codes_by_ingredient
            .entry(ingredient_id)
            .or_default()
            .push(code);
    }

    let response: Vec<IngredientResponse> = ingredients
        .into_iter()
        .map(|i| IngredientResponse {
            allergens: codes_by_ingredient.remove(&i.id).unwrap_or_default(),
            id: i.id,
            canonical_name: i.canonical_name,
            ingredient_family: i.ingredient_family,
            is_vegetarian: i.is_vegetarian,
            is_vegan: i.is_vegan,
        })
        .collect();

    (StatusCode::OK, Json(response)).into_response()
}
