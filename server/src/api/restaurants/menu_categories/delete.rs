use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{dishes, menu_categories, restaurants};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/menu-categories/{id}",
    tag = "restaurants",
    params(
        ("id" = Uuid, Path, description = "Menu section ID")
    ),
    responses(
        (status = 204, description = "Menu section deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Menu section not found", body = ErrorResponse),
        (status = 409, description = "Menu section still has live dishes", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_menu_category(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match menu_categories::table
        .inner_join(restaurants::table)
        .filter(menu_categories::id.eq(id))
        .filter(menu_categories::deleted_at.is_null())
        .filter(restaurants::owner_id.eq(user.id))
        .filter(restaurants::deleted_at.is_null())
        .select(menu_categories::id)
        .first::<Uuid>(&mut conn)
    {
        Ok(_) => {}
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Menu section not found".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to look up menu section: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to look up menu section".to_string(),
                }),
            )
                .into_response();
        }
    }

    // Dishes keep a NOT NULL reference to their section, so a section with
    // live dishes cannot go away until they are moved or deleted.
    let live_dishes: i64 = match dishes::table
        .filter(dishes::menu_category_id.eq(id))
        .filter(dishes::deleted_at.is_null())
        .count()
        .get_result(&mut conn)
    {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to count dishes for menu section: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to count dishes for menu section".to_string(),
                }),
            )
                .into_response();
        }
    };

    if live_dishes > 0 {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Menu section has {} live dishes", live_dishes),
            }),
        )
            .into_response();
    }

    // Soft delete - set deleted_at timestamp
    match diesel::update(
        menu_categories::table
            .find(id)
            .filter(menu_categories::deleted_at.is_null()),
    )
    .set(menu_categories::deleted_at.eq(Some(Utc::now())))
    .execute(&mut conn)
    {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Failed to delete menu section: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete menu section".to_string(),
                }),
            )
                .into_response()
        }
    }
}
