pub mod create;
pub mod delete;
pub mod get;
pub mod ingredients;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/dishes endpoints (mounted at /api/dishes).
/// The restaurant-scoped dish list lives under /api/restaurants.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create::create_dish))
        .route(
            "/{id}",
            get(get::get_dish)
                .patch(update::update_dish)
                .delete(delete::delete_dish),
        )
        .route(
            "/{id}/ingredients",
            put(ingredients::set_dish_ingredients).get(ingredients::get_dish_ingredients),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_dish,
        get::get_dish,
        list::list_dishes,
        update::update_dish,
        delete::delete_dish,
        ingredients::set_dish_ingredients,
        ingredients::get_dish_ingredients,
    ),
    components(schemas(
        create::CreateDishRequest,
        create::DishResponse,
        get::DishDetailResponse,
        update::UpdateDishRequest,
        ingredients::SetDishIngredientsRequest,
        ingredients::DishIngredientWrite,
        ingredients::DishIngredientLink,
    ))
)]
pub struct ApiDoc;
