use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{canonical_ingredients, dish_ingredients, dishes};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

enum DeleteOutcome {
    Deleted,
    NotFound,
    Blocked(i64),
}

#[utoipa::path(
    delete,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = Uuid, Path, description = "Canonical ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient deleted; its aliases cascade"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 409, description = "Ingredient is still linked by live dishes", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_ingredient(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    // Deletion is blocked while live dishes link the ingredient: silently
    // dropping their links would strand stale derived columns. Links held by
    // soft-deleted dishes don't block; they are dropped with the ingredient.
    let result: Result<DeleteOutcome, diesel::result::Error> = conn.transaction(|conn| {
        let live_links: i64 = dish_ingredients::table
            .inner_join(dishes::table)
            .filter(dish_ingredients::canonical_ingredient_id.eq(id))
            .filter(dishes::deleted_at.is_null())
            .count()
            .get_result(conn)?;

        if live_links > 0 {
            return Ok(DeleteOutcome::Blocked(live_links));
        }

        diesel::delete(
            dish_ingredients::table.filter(
                dish_ingredients::canonical_ingredient_id.eq(id).and(
                    dish_ingredients::dish_id.eq_any(
                        dishes::table
                            .filter(dishes::deleted_at.is_not_null())
                            .select(dishes::id),
                    ),
                ),
            ),
        )
        .execute(conn)?;

        let deleted = diesel::delete(canonical_ingredients::table.find(id)).execute(conn)?;
        if deleted == 0 {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    });

    match result {
        Ok(DeleteOutcome::Deleted) => StatusCode::NO_CONTENT.into_response(),
        Ok(DeleteOutcome::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Ingredient not found".to_string(),
            }),
        )
            .into_response(),
        Ok(DeleteOutcome::Blocked(count)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Ingredient is linked by {} live dishes", count),
            }),
        )
            .into_response(),
        // A link can appear between the count and the delete; the FK with no
        // cascade on dish_ingredients turns that race into this error.
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Ingredient is linked by dishes".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to delete ingredient: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete ingredient".to_string(),
                }),
            )
                .into_response()
        }
    }
}
