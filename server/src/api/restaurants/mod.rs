pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod menu_categories;
pub mod nearby;
pub mod update;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/restaurants endpoints (mounted at /api/restaurants)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_restaurants).post(create::create_restaurant),
        )
        .route("/search", post(nearby::nearby_search))
        .route(
            "/{id}",
            get(get::get_restaurant)
                .patch(update::update_restaurant)
                .delete(delete::delete_restaurant),
        )
        .route(
            "/{id}/menu-categories",
            get(menu_categories::list::list_menu_categories)
                .post(menu_categories::create::create_menu_category),
        )
        .route("/{id}/dishes", get(crate::api::dishes::list::list_dishes))
}

/// Returns the router for /api/menu-categories endpoints (mounted at
/// /api/menu-categories). Section ids are globally unique, so rename and
/// delete address them without the restaurant prefix.
pub fn menu_categories_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        axum::routing::patch(menu_categories::update::update_menu_category)
            .delete(menu_categories::delete::delete_menu_category),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_restaurant,
        list::list_restaurants,
        get::get_restaurant,
        update::update_restaurant,
        delete::delete_restaurant,
        menu_categories::create::create_menu_category,
        menu_categories::list::list_menu_categories,
        menu_categories::update::update_menu_category,
        menu_categories::delete::delete_menu_category,
        nearby::nearby_search,
    ),
    components(schemas(
        create::CreateRestaurantRequest,
        create::RestaurantResponse,
        list::ListRestaurantsResponse,
        list::PaginationMetadata,
        update::UpdateRestaurantRequest,
        menu_categories::create::CreateMenuCategoryRequest,
        menu_categories::create::MenuCategoryResponse,
        menu_categories::update::UpdateMenuCategoryRequest,
        nearby::NearbySearchRequest,
        nearby::SearchFilters,
        nearby::NearbySearchResponse,
        nearby::NearbyRestaurant,
        nearby::CenterPoint,
    ))
)]
pub struct ApiDoc;
