use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewRestaurant, Restaurant};
use crate::schema::restaurants;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tureen_core::vocab;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub description: Option<String>,
    /// Cuisine label, stored lowercased (e.g. "italian")
    pub cuisine: String,
    pub address: String,
    pub phone: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// At least one of: dine_in, takeaway, delivery
    pub service_types: Vec<String>,
    /// ISO 4217 code (default: USD)
    pub currency: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RestaurantResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub address: String,
    pub phone: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub service_types: Vec<String>,
    pub currency: String,
    pub is_active: bool,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(r: Restaurant) -> Self {
        RestaurantResponse {
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
        }
    }
}

/// Lowercase, validate, and de-duplicate a service type list. Returns the
/// first unrecognized entry as the error.
pub(super) fn validate_service_types(raw: &[String]) -> Result<Vec<String>, String> {
    if raw.is_empty() {
        return Err("At least one service type is required".to_string());
    }

    let mut validated = Vec::with_capacity(raw.len());
    for entry in raw {
        let token = entry.trim().to_lowercase();
        if !vocab::is_valid_service_type(&token) {
            return Err(format!("Unknown service type: {}", entry));
        }
        validated.push(token);
    }

    validated.sort_unstable();
    validated.dedup();
    Ok(validated)
}

/// Uppercase a 3-letter ISO 4217 code; anything else is rejected.
pub(super) fn normalize_currency(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(trimmed.to_uppercase())
    } else {
        None
    }
}

#[utoipa::path(
    post,
    path = "/api/restaurants",
    tag = "restaurants",
    request_body(content = CreateRestaurantRequest, example = json!({
        "name": "Trattoria Da Mario",
        "cuisine": "Italian",
        "address": "12 Via Roma",
        "latitude": 45.4642,
        "longitude": 9.19,
        "service_types": ["dine_in", "takeaway"],
        "currency": "EUR"
    })),
    responses(
        (status = 201, description = "Restaurant created", body = RestaurantResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_restaurant(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRestaurantRequest>,
) -> impl IntoResponse {
    if request.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Restaurant name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    if request.address.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Address cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let cuisine = request.cuisine.trim().to_lowercase();
    if cuisine.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Cuisine cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    if !(-90.0..=90.0).contains(&request.latitude) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Latitude must be between -90 and 90".to_string(),
            }),
        )
            .into_response();
    }

    if !(-180.0..=180.0).contains(&request.longitude) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Longitude must be between -180 and 180".to_string(),
            }),
        )
            .into_response();
    }

    let service_types = match validate_service_types(&request.service_types) {
        Ok(v) => v,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: message }),
            )
                .into_response();
        }
    };

    let currency = match request.currency.as_deref() {
        None => "USD".to_string(),
        Some(raw) => match normalize_currency(raw) {
            Some(code) => code,
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
    };

    let mut conn = get_conn!(pool);

    let service_types: Vec<Option<String>> = service_types.into_iter().map(Some).collect();
    let new_restaurant = NewRestaurant {
        owner_id: user.id,
        name: &request.name,
        description: request.description.as_deref(),
        cuisine: &cuisine,
        address: &request.address,
        phone: request.phone.as_deref(),
        latitude: request.latitude,
        longitude: request.longitude,
        service_types: &service_types,
        currency: &currency,
    };

    match diesel::insert_into(restaurants::table)
        .values(&new_restaurant)
        .returning(Restaurant::as_returning())
        .get_result::<Restaurant>(&mut conn)
    {
        Ok(restaurant) => (
            StatusCode::CREATED,
            Json(RestaurantResponse::from(restaurant)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create restaurant: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create restaurant".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_types_lowercased_and_deduped() {
        let validated =
            validate_service_types(&["Dine_In".to_string(), "dine_in".to_string()]).unwrap();
        assert_eq!(validated, vec!["dine_in".to_string()]);
    }

    #[test]
    fn test_service_types_rejects_unknown() {
        let err = validate_service_types(&["drive_thru".to_string()]).unwrap_err();
        assert_eq!(err, "Unknown service type: drive_thru");
    }

    #[test]
    fn test_service_types_rejects_empty_list() {
        assert!(validate_service_types(&[]).is_err());
    }

    #[test]
    fn test_normalize_currency() {
        assert_eq!(normalize_currency("eur"), Some("EUR".to_string()));
        assert_eq!(normalize_currency(" GBP "), Some("GBP".to_string()));
        assert_eq!(normalize_currency("EURO"), None);
        assert_eq!(normalize_currency("E1R"), None);
        assert_eq!(normalize_currency(""), None);
    }
}
