use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Restaurant {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub address: String,
    pub phone: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub service_types: Vec<Option<String>>,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::restaurants)]
pub struct NewRestaurant<'a> {
    pub owner_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub cuisine: &'a str,
    pub address: &'a str,
    pub phone: Option<&'a str>,
    pub latitude: f64,
    pub longitude: f64,
    pub service_types: &'a [Option<String>],
    pub currency: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::menu_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct MenuCategory {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::menu_categories)]
pub struct NewMenuCategory<'a> {
    pub restaurant_id: Uuid,
    pub name: &'a str,
    pub sort_order: i32,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::dish_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct DishCategory {
    pub id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::dish_categories)]
pub struct NewDishCategory<'a> {
    pub name: &'a str,
    pub sort_order: i32,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::canonical_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct CanonicalIngredient {
    pub id: Uuid,
    pub canonical_name: String,
    pub ingredient_family: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::canonical_ingredients)]
pub struct NewCanonicalIngredient<'a> {
    pub canonical_name: &'a str,
    pub ingredient_family: &'a str,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::ingredient_allergens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct IngredientAllergen {
    pub canonical_ingredient_id: Uuid,
    pub allergen_code: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredient_allergens)]
pub struct NewIngredientAllergen<'a> {
    pub canonical_ingredient_id: Uuid,
    pub allergen_code: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::ingredient_aliases)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct IngredientAlias {
    pub id: Uuid,
    pub display_name: String,
    pub canonical_ingredient_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredient_aliases)]
pub struct NewIngredientAlias<'a> {
    pub display_name: &'a str,
    pub canonical_ingredient_id: Uuid,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::dishes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Dish {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub menu_category_id: Uuid,
    pub dish_category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    pub calories: Option<i32>,
    pub allergens: Vec<Option<String>>,
    pub dietary_tags: Vec<Option<String>>,
    pub is_available: bool,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub spice_level: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::dishes)]
pub struct NewDish<'a> {
    pub restaurant_id: Uuid,
    pub menu_category_id: Uuid,
    pub dish_category_id: Option<Uuid>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i32,
    pub calories: Option<i32>,
    pub spice_level: Option<i32>,
    pub is_available: bool,
    pub photo_url: Option<&'a str>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::dish_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct DishIngredient {
    pub dish_id: Uuid,
    pub canonical_ingredient_id: Uuid,
    pub quantity: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::dish_ingredients)]
pub struct NewDishIngredient<'a> {
    pub dish_id: Uuid,
    pub canonical_ingredient_id: Uuid,
    pub quantity: Option<&'a str>,
}
