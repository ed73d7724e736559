//! Wire types for the tureen HTTP API, as consumed by the typed client.
//!
//! Field names follow the API's snake_case convention; the nearby-search
//! payloads are the exception (camelCase) and live in `filters`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// One row of an ingredient alias search result: the alias plus its
/// canonical ingredient's attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasHit {
    pub alias_id: Uuid,
    pub display_name: String,
    pub canonical_ingredient_id: Uuid,
    pub canonical_name: String,
    pub ingredient_family: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
}

/// A canonical-ingredient reference as carried by an authoring selection.
/// Identity is the canonical id; the rest is display/derivation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRef {
    pub canonical_ingredient_id: Uuid,
    pub canonical_name: String,
    pub ingredient_family: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
}

impl AliasHit {
    pub fn ingredient_ref(&self) -> IngredientRef {
        IngredientRef {
            canonical_ingredient_id: self.canonical_ingredient_id,
            canonical_name: self.canonical_name.clone(),
            ingredient_family: self.ingredient_family.clone(),
            is_vegetarian: self.is_vegetarian,
            is_vegan: self.is_vegan,
        }
    }
}

/// One current dish-ingredient link, as returned by the dish read-back
/// endpoints for authoring-form seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishIngredientLink {
    pub canonical_ingredient_id: Uuid,
    pub canonical_name: String,
    pub ingredient_family: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub quantity: Option<String>,
    /// Display aliases of the canonical ingredient, sorted alphabetically.
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIngredientRequest {
    pub canonical_name: String,
    pub ingredient_family: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    /// When omitted, allergen codes default from the ingredient family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientResponse {
    pub id: Uuid,
    pub canonical_name: String,
    pub ingredient_family: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub allergens: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAliasRequest {
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasResponse {
    pub id: Uuid,
    pub display_name: String,
    pub canonical_ingredient_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cuisine: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub service_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenuCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryResponse {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDishRequest {
    pub restaurant_id: Uuid,
    pub menu_category_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish_category_id: Option<Uuid>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_cents: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Scalar dish update. An absent field is left unchanged; nullable fields
/// use the nested-option encoding (`Some(None)` clears). The derived
/// columns cannot be set through this request at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDishRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_category_id: Option<Option<Uuid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<Option<String>>,
}

/// Dish scalars plus the backend-derived attribute columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishResponse {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub menu_category_id: Uuid,
    pub dish_category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    pub calories: Option<i32>,
    pub spice_level: Option<i32>,
    pub allergens: Vec<String>,
    pub dietary_tags: Vec<String>,
    pub is_available: bool,
    pub photo_url: Option<String>,
}

/// Single-dish read-back: scalars, derived attributes, and the current
/// ingredient links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishDetailResponse {
    #[serde(flatten)]
    pub dish: DishResponse,
    pub ingredients: Vec<DishIngredientLink>,
}

/// One row of a link-replacement request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishIngredientWrite {
    pub canonical_ingredient_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

/// Body of `PUT /api/dishes/{id}/ingredients`: the full replacement set.
/// An empty list clears the dish's links and derived attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDishIngredientsRequest {
    pub ingredients: Vec<DishIngredientWrite>,
}
