use super::create::{normalize_currency, validate_service_types, RestaurantResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Restaurant;
use crate::schema::restaurants;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// All fields optional; absent fields keep their current value. Description
/// and phone can be set but not cleared here.
#[derive(Deserialize, ToSchema)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub service_types: Option<Vec<String>>,
    pub currency: Option<String>,
    pub is_active: Option<bool>,
}

#[utoipa::path(
    patch,
    path = "/api/restaurants/{id}",
    tag = "restaurants",
    params(
        ("id" = Uuid, Path, description = "Restaurant ID")
    ),
    request_body = UpdateRestaurantRequest,
    responses(
        (status = 200, description = "Restaurant updated", body = RestaurantResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_restaurant(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRestaurantRequest>,
) -> impl IntoResponse {
    if let Some(ref name) = request.name {
        if name.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Restaurant name cannot be empty".to_string(),
                }),
            )
                .into_response();
        }
    }

    if let Some(ref address) = request.address {
        if address.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Address cannot be empty".to_string(),
                }),
            )
                .into_response();
        }
    }

    let cuisine = match request.cuisine {
        Some(ref raw) => {
            let lowered = raw.trim().to_lowercase();
            if lowered.is_empty() {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Cuisine cannot be empty".to_string(),
                    }),
                )
                    .into_response();
            }
            Some(lowered)
        }
        None => None,
    };

    if let Some(latitude) = request.latitude {
        if !(-90.0..=90.0).contains(&latitude) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Latitude must be between -90 and 90".to_string(),
                }),
            )
                .into_response();
        }
    }

    if let Some(longitude) = request.longitude {
        if !(-180.0..=180.0).contains(&longitude) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Longitude must be between -180 and 180".to_string(),
                }),
            )
                .into_response();
        }
    }

    let service_types = match request.service_types {
        Some(ref raw) => match validate_service_types(raw) {
            Ok(v) => Some(v.into_iter().map(Some).collect::<Vec<Option<String>>>()),
            Err(message) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse { error: message }),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let currency = match request.currency {
        Some(ref raw) => match normalize_currency(raw) {
            Some(code) => Some(code),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Invalid currency code: {}", raw),
                    }),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let mut conn = get_conn!(pool);

    let result: Result<Restaurant, diesel::result::Error> = conn.transaction(|conn| {
        let current: Restaurant = restaurants::table
            .filter(restaurants::id.eq(id))
            .filter(restaurants::owner_id.eq(user.id))
            .filter(restaurants::deleted_at.is_null())
            .select(Restaurant::as_select())
            .first(conn)?;

        diesel::update(restaurants::table.find(id))
            .set((
                restaurants::name.eq(request.name.unwrap_or(current.name)),
                restaurants::description.eq(request.description.or(current.description)),
                restaurants::cuisine.eq(cuisine.unwrap_or(current.cuisine)),
                restaurants::address.eq(request.address.unwrap_or(current.address)),
                restaurants::phone.eq(request.phone.or(current.phone)),
                restaurants::latitude.eq(request.latitude.unwrap_or(current.latitude)),
                restaurants::longitude.eq(request.longitude.unwrap_or(current.longitude)),
                restaurants::service_types.eq(service_types.unwrap_or(current.service_types)),
                restaurants::currency.eq(currency.unwrap_or(current.currency)),
                restaurants::is_active.eq(request.is_active.unwrap_or(current.is_active)),
            ))
            .returning(Restaurant::as_returning())
            .get_result(conn)
    });

    match result {
        Ok(restaurant) => {
            (StatusCode::OK, Json(RestaurantResponse::from(restaurant))).into_response()
        }
        Err(diesel::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Restaurant not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update restaurant: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update restaurant".to_string(),
                }),
            )
                .into_response()
        }
    }
}
