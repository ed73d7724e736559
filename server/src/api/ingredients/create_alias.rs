use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{IngredientAlias, NewIngredientAlias};
use crate::schema::{canonical_ingredients, ingredient_aliases};
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
pub struct CreateAliasRequest {
    /// Menu-facing spelling, stored verbatim. Uniqueness per ingredient is
    /// case-insensitive.
    pub display_name: String,
}

#[derive(Serialize, ToSchema)]
pub struct AliasResponse {
    pub id: Uuid,
    pub display_name: String,
    pub canonical_ingredient_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/ingredients/{id}/aliases",
    tag = "ingredients",
    params(
        ("id" = Uuid, Path, description = "Canonical ingredient ID")
    ),
    request_body(content = CreateAliasRequest, example = json!({
        "display_name": "Aubergine"
    })),
    responses(
        (status = 201, description = "Alias created", body = AliasResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 409, description = "Alias already exists for this ingredient", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_alias(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateAliasRequest>,
) -> impl IntoResponse {
    if request.display_name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Display name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    match canonical_ingredients::table
        .find(id)
        .select(canonical_ingredients::id)
        .first::<Uuid>(&mut conn)
    {
        Ok(_) => {}
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Ingredient not found".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to look up ingredient: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to look up ingredient".to_string(),
                }),
            )
                .into_response();
        }
    }

    let new_alias = NewIngredientAlias {
        display_name: &request.display_name,
        canonical_ingredient_id: id,
    };

    match diesel::insert_into(ingredient_aliases::table)
        .values(&new_alias)
        .returning(IngredientAlias::as_returning())
        .get_result(&mut conn)
    {
        Ok(alias) => (
            StatusCode::CREATED,
            Json(AliasResponse {
                id: alias.id,
                display_name: alias.display_name,
                canonical_ingredient_id: alias.canonical_ingredient_id,
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
                    "Alias '{}' already exists for this ingredient",
                    request.display_name
                ),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create alias: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create alias".to_string(),
                }),
            )
                .into_response()
        }
    }
}
