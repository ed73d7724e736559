use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::raw_sql;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Array, BigInt, Double, Integer, Nullable, Text};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tureen_core::vocab;
use utoipa::ToSchema;
use uuid::Uuid;

/// The consumer-facing search surface uses camelCase on the wire, unlike the
/// operator CRUD endpoints.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in kilometers (default: 5, max: 100)
    pub radius_km: Option<f64>,
    /// Maximum results (default: 20, max: 100)
    pub limit: Option<i64>,
    #[serde(default)]
    pub filters: SearchFilters,
}

#[derive(Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Restaurant cuisine labels, matched lowercased
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisines: Option<Vec<String>>,
    /// Lowest acceptable dish price, in cents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<i32>,
    /// Highest acceptable dish price, in cents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<i32>,
    /// Dietary tags every matching dish must carry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_tags: Option<Vec<String>>,
    /// Allergen codes no matching dish may contain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_allergens: Option<Vec<String>>,
    /// Service types the restaurant must offer at least one of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_types: Option<Vec<String>>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CenterPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyRestaurant {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub service_types: Vec<String>,
    pub currency: String,
    pub distance_km: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchResponse {
    pub restaurants: Vec<NearbyRestaurant>,
    pub total_count: i64,
    pub search_radius: f64,
    pub center_point: CenterPoint,
    pub applied_filters: SearchFilters,
}

#[derive(QueryableByName)]
struct NearbyRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    id: Uuid,
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    description: Option<String>,
    #[diesel(sql_type = diesel::sql_types::Text)]
    cuisine: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    address: String,
    #[diesel(sql_type = diesel::sql_types::Double)]
    latitude: f64,
    #[diesel(sql_type = diesel::sql_types::Double)]
    longitude: f64,
    #[diesel(sql_type = diesel::sql_types::Array<diesel::sql_types::Nullable<diesel::sql_types::Text>>)]
    service_types: Vec<Option<String>>,
    #[diesel(sql_type = diesel::sql_types::Text)]
    currency: String,
    #[diesel(sql_type = diesel::sql_types::Double)]
    distance_km: f64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    total_count: i64,
}

#[utoipa::path(
    post,
    path = "/api/restaurants/search",
    tag = "restaurants",
    request_body(content = NearbySearchRequest, example = json!({
        "latitude": 45.4642,
        "longitude": 9.19,
        "radiusKm": 2.5,
        "filters": {
            "dietaryTags": ["vegetarian"],
            "excludeAllergens": ["peanuts"]
        }
    })),
    responses(
        (status = 200, description = "Restaurants within the radius, nearest first", body = NearbySearchResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn nearby_search(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<NearbySearchRequest>,
) -> impl IntoResponse {
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

    let radius = request.radius_km.unwrap_or(5.0);
    // NaN fails this comparison too
    if !(radius > 0.0) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Search radius must be positive".to_string(),
            }),
        )
            .into_response();
    }
    let radius_km = radius.min(100.0);
    let limit = request.limit.unwrap_or(20).clamp(1, 100);

    let filters = request.filters;

    if let Some(min) = filters.price_min {
        if min < 0 {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Price filters cannot be negative".to_string(),
                }),
            )
                .into_response();
        }
    }
    if let Some(max) = filters.price_max {
        if max < 0 {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Price filters cannot be negative".to_string(),
                }),
            )
                .into_response();
        }
    }
    if let (Some(min), Some(max)) = (filters.price_min, filters.price_max) {
        if min > max {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Minimum price cannot exceed maximum price".to_string(),
                }),
            )
                .into_response();
        }
    }

    if let Some(ref tags) = filters.dietary_tags {
        for tag in tags {
            if !vocab::is_valid_dietary_tag(tag) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Unknown dietary tag: {}", tag),
                    }),
                )
                    .into_response();
            }
        }
    }

    if let Some(ref allergens) = filters.exclude_allergens {
        for allergen in allergens {
            if !vocab::is_valid_allergen(allergen) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Unknown allergen code: {}", allergen),
                    }),
                )
                    .into_response();
            }
        }
    }

    if let Some(ref service_types) = filters.service_types {
        for service_type in service_types {
            if !vocab::is_valid_service_type(service_type) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Unknown service type: {}", service_type),
                    }),
                )
                    .into_response();
            }
        }
    }

    // Empty filter lists constrain nothing; normalize them away so the SQL
    // NULL-skip binds see them as absent.
    let applied_filters = SearchFilters {
        cuisines: filters
            .cuisines
            .map(|cuisines| {
                cuisines
                    .into_iter()
                    .map(|c| c.trim().to_lowercase())
                    .filter(|c| !c.is_empty())
                    .collect::<Vec<String>>()
            })
            .filter(|v| !v.is_empty()),
        price_min: filters.price_min,
        price_max: filters.price_max,
        dietary_tags: filters.dietary_tags.filter(|v| !v.is_empty()),
        exclude_allergens: filters.exclude_allergens.filter(|v| !v.is_empty()),
        service_types: filters.service_types.filter(|v| !v.is_empty()),
    };

    let mut conn = get_conn!(pool);

    let rows: Vec<NearbyRow> = match sql_query(raw_sql::NEARBY_RESTAURANTS_QUERY)
        .bind::<Double, _>(request.latitude)
        .bind::<Double, _>(request.longitude)
        .bind::<Double, _>(radius_km)
        .bind::<BigInt, _>(limit)
        .bind::<Nullable<Array<Text>>, _>(applied_filters.cuisines.clone())
        .bind::<Nullable<Array<Text>>, _>(applied_filters.service_types.clone())
        .bind::<Nullable<Integer>, _>(applied_filters.price_min)
        .bind::<Nullable<Integer>, _>(applied_filters.price_max)
        .bind::<Nullable<Array<Text>>, _>(applied_filters.dietary_tags.clone())
        .bind::<Nullable<Array<Text>>, _>(applied_filters.exclude_allergens.clone())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Nearby search failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Nearby search failed".to_string(),
                }),
            )
                .into_response();
        }
    };

    let total_count = rows.first().map(|r| r.total_count).unwrap_or(0);

    let restaurants = rows
        .into_iter()
        .map(|r| NearbyRestaurant {
            id: r.id,
            name: r.name,
            description: r.description,
            cuisine: r.cuisine,
            address: r.address,
            latitude: r.latitude,
            longitude: r.longitude,
            service_types: r.service_types.into_iter().flatten().collect(),
            currency: r.currency,
            distance_km: r.distance_km,
        })
        .collect();

    (
        StatusCode::OK,
        Json(NearbySearchResponse {
            restaurants,
            total_count,
            search_radius: radius_km,
            center_point: CenterPoint {
                latitude: request.latitude,
                longitude: request.longitude,
            },
            applied_filters,
        }),
    )
        .into_response()
}
