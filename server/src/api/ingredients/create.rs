use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{
    CanonicalIngredient, NewCanonicalIngredient, NewIngredientAlias, NewIngredientAllergen,
};
use crate::schema::{canonical_ingredients, ingredient_aliases, ingredient_allergens};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tureen_core::vocab::{self, IngredientFamily};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateIngredientRequest {
    /// Stored normalized to lowercase_snake_case; rejected if it can't be
    pub canonical_name: String,
    pub ingredient_family: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    /// Allergen codes; when omitted they default from the ingredient family
    pub allergens: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub id: Uuid,
    pub canonical_name: String,
    pub ingredient_family: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub allergens: Vec<String>,
}

/// Human-readable self-alias for a freshly created canonical name, so the
/// ingredient is reachable through alias search before anyone curates
/// aliases for it.
fn default_display_name(canonical_name: &str) -> String {
    canonical_name.replace('_', " ")
}

#[utoipa::path(
    post,
    path = "/api/ingredients",
    tag = "ingredients",
    request_body(content = CreateIngredientRequest, example = json!({
        "canonical_name": "egg",
        "ingredient_family": "egg",
        "is_vegetarian": true,
        "is_vegan": false
    })),
    responses(
        (status = 201, description = "Ingredient created successfully", body = IngredientResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Ingredient already exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_ingredient(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateIngredientRequest>,
) -> impl IntoResponse {
    let canonical_name = match vocab::normalize_canonical_name(&request.canonical_name) {
        Some(n) => n,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!(
                        "Canonical name {:?} does not normalize to lowercase_snake_case",
                        request.canonical_name
                    ),
                }),
            )
                .into_response()
        }
    };

    let family = match IngredientFamily::from_str(&request.ingredient_family) {
        Some(f) => f,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown ingredient family: {}", request.ingredient_family),
                }),
            )
                .into_response()
        }
    };

    let mut allergens: Vec<String> = match request.allergens {
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
            codes
        }
        None => family
            .default_allergens()
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };
    allergens.sort_unstable();
    allergens.dedup();

    let mut conn = get_conn!(pool);

    let result: Result<CanonicalIngredient, diesel::result::Error> = conn.transaction(|conn| {
        let ingredient: CanonicalIngredient = diesel::insert_into(canonical_ingredients::table)
            .values(&NewCanonicalIngredient {
                canonical_name: &canonical_name,
                ingredient_family: family.as_str(),
                is_vegetarian: request.is_vegetarian,
                is_vegan: request.is_vegan,
            })
            .returning(CanonicalIngredient::as_returning())
            .get_result(conn)?;

        let allergen_rows: Vec<NewIngredientAllergen> = allergens
            .iter()
            .map(|code| NewIngredientAllergen {
                canonical_ingredient_id: ingredient.id,
                allergen_code: code,
            })
            .collect();
        diesel::insert_into(ingredient_allergens::table)
            .values(&allergen_rows)
            .execute(conn)?;

        diesel::insert_into(ingredient_aliases::table)
            .values(&NewIngredientAlias {
                display_name: &default_display_name(&ingredient.canonical_name),
                canonical_ingredient_id: ingredient.id,
            })
            .execute(conn)?;

        Ok(ingredient)
    });

    match result {
        Ok(ingredient) => (
            StatusCode::CREATED,
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
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Ingredient '{}' already exists", canonical_name),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create ingredient: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create ingredient".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::default_display_name;

    #[test]
    fn test_self_alias_display_name() {
        assert_eq!(default_display_name("olive_oil"), "olive oil");
        assert_eq!(default_display_name("egg"), "egg");
    }
}
