use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{dishes, restaurants};
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
    path = "/api/dishes/{id}",
    tag = "dishes",
    params(
        ("id" = Uuid, Path, description = "Dish ID")
    ),
    responses(
        (status = 204, description = "Dish deleted; ingredient links are kept"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Dish not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_dish(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match dishes::table
        .inner_join(restaurants::table)
        .filter(dishes::id.eq(id))
        .filter(dishes::deleted_at.is_null())
        .filter(restaurants::owner_id.eq(user.id))
        .filter(restaurants::deleted_at.is_null())
        .select(dishes::id)
        .first::<Uuid>(&mut conn)
    {
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

    // Soft delete - set deleted_at timestamp
    match diesel::update(dishes::table.find(id).filter(dishes::deleted_at.is_null()))
        .set(dishes::deleted_at.eq(Some(Utc::now())))
        .execute(&mut conn)
    {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Failed to delete dish: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete dish".to_string(),
                }),
            )
                .into_response()
        }
    }
}
