use crate::api::ErrorResponse;
use crate::attributes::refresh_dishes_linking_ingredient;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{CanonicalIngredient, NewIngredientAllergen};
use crate::schema::{canonical_ingredients, ingredient_allergens};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use tureen_core::vocab::{self, IngredientFamily};
use utoipa::ToSchema;
use uuid::Uuid;

use super::create::IngredientResponse;

/// Attribute update for a canonical ingredient. The canonical name itself is
/// immutable; create a new ingredient instead of renaming.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateIngredientRequest {
    pub ingredient_family: Option<String>,
    pub is_vegetarian: Option<bool>,
    pub is_vegan: Option<bool>,
    /// Full replacement allergen set; absent leaves the set unchanged
    pub allergens: Option<Vec<String>>,
}

#[utoipa::path(
    patch,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = Uuid, Path, description = "Canonical ingredient ID")
    ),
    request_body = UpdateIngredientRequest,
    responses(
        (status = 200, description = "Ingredient updated; derived columns of linked dishes recomputed", body = IngredientResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_ingredient(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateIngredientRequest>,
) -> impl IntoResponse {
    let family = match request.ingredient_family.as_deref() {
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

    let allergens = match request.allergens {
        Some(codes) => {
            if let Some(bad) = codes.iter().find(|c| !vocab::is_valid_allergen(c)) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Unknown allergen code: {}", bad),
                    }),
                )
                    .into_response();
            }
            let mut codes = codes;
            codes.sort_unstable();
            codes.dedup();
            Some(codes)
        }
        None => None,
    };

    let mut conn = get_conn!(pool);

    // The attribute update and the recompute of every linked dish land in one
    // transaction, so no reader sees a dish derived from the old attributes.
    let result: Result<(CanonicalIngredient, Vec<String>), diesel::result::Error> = conn
        .transaction(|conn| {
            let current: CanonicalIngredient = canonical_ingredients::table
                .find(id)
                .select(CanonicalIngredient::as_select())
                .first(conn)?;

            let new_family = family
                .map(|f| f.as_str().to_string())
                .unwrap_or(current.ingredient_family);
            let new_vegetarian = request.is_vegetarian.unwrap_or(current.is_vegetarian);
            let new_vegan = request.is_vegan.unwrap_or(current.is_vegan);

            let updated: CanonicalIngredient =
                diesel::update(canonical_ingredients::table.find(id))
                    .set((
                        canonical_ingredients::ingredient_family.eq(&new_family),
                        canonical_ingredients::is_vegetarian.eq(new_vegetarian),
                        canonical_ingredients::is_vegan.eq(new_vegan),
                    ))
                    .returning(CanonicalIngredient::as_returning())
                    .get_result(conn)?;

            if let Some(codes) = &allergens {
                diesel::delete(
                    ingredient_allergens::table
                        .filter(ingredient_allergens::canonical_ingredient_id.eq(id)),
                )
                .execute(conn)?;
                let rows: Vec<NewIngredientAllergen> = codes
                    .iter()
                    .map(|code| NewIngredientAllergen {
                        canonical_ingredient_id: id,
                        allergen_code: code,
                    })
                    .collect();
                diesel::insert_into(ingredient_allergens::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            refresh_dishes_linking_ingredient(conn, id)?;

            let final_codes: Vec<String> = ingredient_allergens::table
                .filter(ingredient_allergens::canonical_ingredient_id.eq(id))
                .select(ingredient_allergens::allergen_code)
                .order(ingredient_allergens::allergen_code.asc())
                .load(conn)?;

            Ok((updated, final_codes))
        });

    match result {
        Ok((ingredient, allergens)) => (
            StatusCode::OK,
            Json(IngredientResponse {
                id: ingredient.id,
                canonical_name: ingredient.canonical_name,
                ingredient_family: ingredient.ingredient_family,
                is_vegetarian: ingredient.is_vegetarian,
                is_vegan: ingredient.is_vegan,
                allergens,
            }),
        )
            .into_response(),
        Err(diesel::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Ingredient not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update ingredient: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update ingredient".to_string(),
                }),
            )
                .into_response()
        }
    }
}
