//! Filter payload construction for the nearby-restaurant search call.
//!
//! UI filter state is sparse: most filters are unset most of the time. The
//! builder here turns that state into the wire payload, omitting everything
//! unset or empty so the search backend only sees filters that actually
//! constrain the result set. The search itself (distance math included) is
//! the backend's job; nothing in this module computes geometry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional constraints for a nearby-restaurant search.
///
/// Empty collections are normalized to `None` so they serialize as absent
/// rather than `[]`. Prices are integer cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_allergens: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_types: Option<Vec<String>>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to restaurants with one of these cuisine labels.
    pub fn with_cuisines(mut self, cuisines: Vec<String>) -> Self {
        self.cuisines = non_empty(cuisines);
        self
    }

    /// Restrict to restaurants serving at least one dish in this price band
    /// (cents, inclusive). Either bound may be `None`.
    pub fn with_price_range(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Restrict to restaurants serving at least one dish carrying all of
    /// these dietary tags.
    pub fn with_dietary_tags(mut self, tags: Vec<String>) -> Self {
        self.dietary_tags = non_empty(tags);
        self
    }

    /// Restrict to restaurants serving at least one dish free of all of
    /// these allergen codes.
    pub fn with_exclude_allergens(mut self, allergens: Vec<String>) -> Self {
        self.exclude_allergens = non_empty(allergens);
        self
    }

    /// Restrict to restaurants offering one of these service types.
    pub fn with_service_types(mut self, service_types: Vec<String>) -> Self {
        self.service_types = non_empty(service_types);
        self
    }

    /// True when no filter constrains the search.
    pub fn is_empty(&self) -> bool {
        self.cuisines.is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.dietary_tags.is_none()
            && self.exclude_allergens.is_none()
            && self.service_types.is_none()
    }
}

/// Drop empty and whitespace-only entries; map an empty result to `None`.
fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    let values: Vec<String> = values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "SearchFilters::is_empty")]
    pub filters: SearchFilters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One restaurant in a nearby-search result, with its distance from the
/// search center.
#[derive(Debug, Clone, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchResponse {
    pub restaurants: Vec<NearbyRestaurant>,
    pub total_count: i64,
    pub search_radius: f64,
    pub center_point: CenterPoint,
    pub applied_filters: SearchFilters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_serializes_to_empty_object() {
        let filters = SearchFilters::new();
        assert!(filters.is_empty());
        assert_eq!(serde_json::to_string(&filters).unwrap(), "{}");
    }

    #[test]
    fn test_empty_collections_are_omitted() {
        let filters = SearchFilters::new()
            .with_cuisines(vec![])
            .with_dietary_tags(vec!["".to_string(), "   ".to_string()]);
        assert!(filters.is_empty());
    }

    #[test]
    fn test_set_filters_serialize_camel_case() {
        let filters = SearchFilters::new()
            .with_cuisines(vec!["italian".to_string()])
            .with_price_range(None, Some(2500))
            .with_exclude_allergens(vec!["peanuts".to_string()]);

        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["cuisines"][0], "italian");
        assert_eq!(json["priceMax"], 2500);
        assert_eq!(json["excludeAllergens"][0], "peanuts");
        assert!(json.get("priceMin").is_none());
        assert!(json.get("dietaryTags").is_none());
    }

    #[test]
    fn test_request_omits_empty_filters() {
        let request = NearbySearchRequest {
            latitude: 52.52,
            longitude: 13.405,
            radius_km: 5.0,
            limit: None,
            filters: SearchFilters::new(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["radiusKm"], 5.0);
        assert!(json.get("filters").is_none());
    }

    #[test]
    fn test_response_round_trips() {
        let body = serde_json::json!({
            "restaurants": [{
                "id": "1f0d6c7e-9a1b-4f4f-8a25-51d6f0a3a111",
                "name": "Trattoria Da Enzo",
                "description": null,
                "cuisine": "italian",
                "address": "Via dei Vascellari 29",
                "latitude": 41.886,
                "longitude": 12.477,
                "serviceTypes": ["dine_in"],
                "currency": "EUR",
                "distanceKm": 0.8
            }],
            "totalCount": 1,
            "searchRadius": 5.0,
            "centerPoint": {"latitude": 41.89, "longitude": 12.47},
            "appliedFilters": {"cuisines": ["italian"]}
        });

        let response: NearbySearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.restaurants.len(), 1);
        assert_eq!(response.restaurants[0].name, "Trattoria Da Enzo");
        assert_eq!(response.total_count, 1);
        assert_eq!(
            response.applied_filters.cuisines,
            Some(vec!["italian".to_string()])
        );
    }
}
