use crate::api::ErrorResponse;
use crate::attributes::refresh_dish_attributes;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewDishIngredient;
use crate::schema::{canonical_ingredients, dish_ingredients, dishes, ingredient_aliases, restaurants};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// One current dish-ingredient link, with the canonical attributes and alias
/// names the authoring form needs for seeding.
#[derive(Serialize, ToSchema)]
pub struct DishIngredientLink {
    pub canonical_ingredient_id: Uuid,
    pub canonical_name: String,
    pub ingredient_family: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub quantity: Option<String>,
    /// Display aliases of the canonical ingredient, sorted alphabetically
    pub aliases: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct DishIngredientWrite {
    pub canonical_ingredient_id: Uuid,
    /// Free-text quantity, e.g. "200 g"
    pub quantity: Option<String>,
}

/// Full replacement set for a dish's links. An empty list clears them and
/// drops the derived attributes to empty.
#[derive(Deserialize, ToSchema)]
pub struct SetDishIngredientsRequest {
    pub ingredients: Vec<DishIngredientWrite>,
}

/// Load the current link rows for a dish, ordered by canonical name, each
/// carrying its alias list sorted alphabetically.
pub(super) fn load_dish_links(
    conn: &mut PgConnection,
    dish_id: Uuid,
) -> Result<Vec<DishIngredientLink>, diesel::result::Error> {
    let rows: Vec<(Option<String>, Uuid, String, String, bool, bool)> = dish_ingredients::table
        .inner_join(canonical_ingredients::table)
        .filter(dish_ingredients::dish_id.eq(dish_id))
        .order(canonical_ingredients::canonical_name.asc())
        .select((
            dish_ingredients::quantity,
            canonical_ingredients::id,
            canonical_ingredients::canonical_name,
            canonical_ingredients::ingredient_family,
            canonical_ingredients::is_vegetarian,
            canonical_ingredients::is_vegan,
        ))
        .load(conn)?;

    let ingredient_ids: Vec<Uuid> = rows.iter().map(|(_, id, ..)| *id).collect();

    let mut aliases_by_ingredient: HashMap<Uuid, Vec<String>> = HashMap::new();
    let alias_rows: Vec<(Uuid, String)> = ingredient_aliases::table
        .filter(ingredient_aliases::canonical_ingredient_id.eq_any(&ingredient_ids))
        .order(ingredient_aliases::display_name.asc())
        .select((
            ingredient_aliases::canonical_ingredient_id,
            ingredient_aliases::display_name,
        ))
        .load(conn)?;
    for (ingredient_id, display_name) in alias_rows {
        aliases_by_ingredient
            .entry(ingredient_id)
            .or_default()
            .push(display_name);
    }

    Ok(rows
        .into_iter()
        .map(
            |(quantity, id, canonical_name, ingredient_family, is_vegetarian, is_vegan)| {
                DishIngredientLink {
                    canonical_ingredient_id: id,
                    canonical_name,
                    ingredient_family,
                    is_vegetarian,
                    is_vegan,
                    quantity,
                    aliases: aliases_by_ingredient.remove(&id).unwrap_or_default(),
                }
            },
        )
        .collect())
}

fn owned_live_dish(
    conn: &mut PgConnection,
    dish_id: Uuid,
    owner_id: Uuid,
) -> Result<Uuid, diesel::result::Error> {
    dishes::table
        .inner_join(restaurants::table)
        .filter(dishes::id.eq(dish_id))
        .filter(dishes::deleted_at.is_null())
        .filter(restaurants::owner_id.eq(owner_id))
        .filter(restaurants::deleted_at.is_null())
        .select(dishes::id)
        .first(conn)
}

#[utoipa::path(
    get,
    path = "/api/dishes/{id}/ingredients",
    tag = "dishes",
    params(
        ("id" = Uuid, Path, description = "Dish ID")
    ),
    responses(
        (status = 200, description = "Current ingredient links", body = Vec<DishIngredientLink>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Dish not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_dish_ingredients(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match owned_live_dish(&mut conn, id, user.id) {
        Ok(_) => {}
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Dish not found".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to look up dish: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to look up dish".to_string(),
                }),
            )
                .into_response();
        }
    }

    match load_dish_links(&mut conn, id) {
        Ok(links) => (StatusCode::OK, Json(links)).into_response(),
        Err(e) => {
            tracing::error!("Failed to load dish ingredients: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load dish ingredients".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/dishes/{id}/ingredients",
    tag = "dishes",
    params(
        ("id" = Uuid, Path, description = "Dish ID")
    ),
    request_body(content = SetDishIngredientsRequest, example = json!({
        "ingredients": [
            {"canonical_ingredient_id": "f6a7c0de-95b1-4d4e-8a3c-2b9d7e5f1a88", "quantity": "200 g"},
            {"canonical_ingredient_id": "3d1e9b2a-60cf-47a5-b3d8-9c4f6e8a2b77"}
        ]
    })),
    responses(
        (status = 204, description = "Links replaced and derived attributes recomputed; re-fetch the dish to read them"),
        (status = 400, description = "Duplicate or unknown ingredient in the selection", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Dish not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_dish_ingredients(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetDishIngredientsRequest>,
) -> impl IntoResponse {
    let mut seen = HashSet::new();
    for entry in &request.ingredients {
        if !seen.insert(entry.canonical_ingredient_id) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!(
                        "Duplicate canonical ingredient id: {}",
                        entry.canonical_ingredient_id
                    ),
                }),
            )
                .into_response();
        }
    }

    let mut conn = get_conn!(pool);

    match owned_live_dish(&mut conn, id, user.id) {
        Ok(_) => {}
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Dish not found".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to look up dish: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to look up dish".to_string(),
                }),
            )
                .into_response();
        }
    }

    // Reject unknown ingredient ids before touching the link rows.
    if !seen.is_empty() {
        let requested: Vec<Uuid> = seen.iter().copied().collect();
        let known: Vec<Uuid> = match canonical_ingredients::table
            .filter(canonical_ingredients::id.eq_any(&requested))
            .select(canonical_ingredients::id)
            .load(&mut conn)
        {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!("Failed to look up ingredients: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to look up ingredients".to_string(),
                    }),
                )
                    .into_response();
            }
        };
        if known.len() != requested.len() {
            let known: HashSet<Uuid> = known.into_iter().collect();
            let missing = requested
                .iter()
                .find(|id| !known.contains(id))
                .copied()
                .unwrap_or_default();
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown canonical ingredient id: {}", missing),
                }),
            )
                .into_response();
        }
    }

    // Replacement and recompute in one transaction: no reader sees the new
    // links with the old derived columns.
    let result: Result<(), diesel::result::Error> = conn.transaction(|conn| {
        diesel::delete(dish_ingredients::table.filter(dish_ingredients::dish_id.eq(id)))
            .execute(conn)?;

        if !request.ingredients.is_empty() {
            let new_links: Vec<NewDishIngredient> = request
                .ingredients
                .iter()
                .map(|entry| NewDishIngredient {
                    dish_id: id,
                    canonical_ingredient_id: entry.canonical_ingredient_id,
                    quantity: entry.quantity.as_deref(),
                })
                .collect();
            diesel::insert_into(dish_ingredients::table)
                .values(&new_links)
                .execute(conn)?;
        }

        refresh_dish_attributes(conn, id)
    });

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        // An ingredient deleted between the check and the insert surfaces as
        // a foreign key violation.
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Unknown canonical ingredient in selection".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to replace dish ingredients: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to replace dish ingredients".to_string(),
                }),
            )
                .into_response()
        }
    }
}
