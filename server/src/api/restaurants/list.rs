use super::create::RestaurantResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::raw_sql;
use crate::schema::restaurants;
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
pub struct ListRestaurantsParams {
    /// Number of items to return (default: 20, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginationMetadata {
    /// Total number of items available
    pub total: i64,
    /// Number of items requested (limit)
    pub limit: i64,
    /// Number of items skipped (offset)
    pub offset: i64,
}

#[derive(Serialize, ToSchema)]
pub struct ListRestaurantsResponse {
    pub restaurants: Vec<RestaurantResponse>,
    pub pagination: PaginationMetadata,
}

#[derive(Queryable)]
struct RestaurantForList {
    id: Uuid,
    name: String,
    description: Option<String>,
    cuisine: String,
    address: String,
    phone: Option<String>,
    latitude: f64,
    longitude: f64,
    service_types: Vec<Option<String>>,
    currency: String,
    is_active: bool,
    /// Total count of all matching rows (from window function)
    total_count: i64,
}

#[utoipa::path(
    get,
    path = "/api/restaurants",
    tag = "restaurants",
    params(ListRestaurantsParams),
    responses(
        (status = 200, description = "Caller's restaurants, alphabetical", body = ListRestaurantsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_restaurants(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListRestaurantsParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = params.offset.unwrap_or(0).max(0);

    let mut conn = get_conn!(pool);

    let results: Vec<RestaurantForList> = match restaurants::table
        .filter(restaurants::owner_id.eq(user.id))
        .filter(restaurants::deleted_at.is_null())
        .order(restaurants::name.asc())
        .select((
            restaurants::id,
            restaurants::name,
            restaurants::description,
            restaurants::cuisine,
            restaurants::address,
            restaurants::phone,
            restaurants::latitude,
            restaurants::longitude,
            restaurants::service_types,
            restaurants::currency,
            restaurants::is_active,
            raw_sql::count_over(),
        ))
        .limit(limit)
        .offset(offset)
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to list restaurants: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list restaurants".to_string(),
                }),
            )
                .into_response();
        }
    };

    let total = results.first().map(|r| r.total_count).unwrap_or(0);

    let restaurants = results
        .into_iter()
        .map(|r| RestaurantResponse {
            id: r.id,
            name: r.name,
            description: r.description,
            cuisine: r.cuisine,
            address: r.address,
            phone: r.phone,
            latitude: r.latitude,
            longitude: r.longitude,
            service_types: r.service_types.into_iter().flatten().collect(),
            currency: r.currency,
            is_active: r.is_active,
        })
        .collect();

    (
        StatusCode::OK,
        Json(ListRestaurantsResponse {
            restaurants,
            pagination: PaginationMetadata {
                total,
                limit,
                offset,
            },
        }),
    )
        .into_response()
}
