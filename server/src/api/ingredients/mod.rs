pub mod create;
pub mod create_alias;
pub mod delete;
pub mod delete_alias;
pub mod list;
pub mod search;
pub mod update;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/ingredients endpoints (mounted at /api/ingredients)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_ingredients).post(create::create_ingredient),
        )
        .route("/search", get(search::search_ingredients))
        .route("/aliases/{id}", delete(delete_alias::delete_alias))
        .route(
            "/{id}",
            axum::routing::patch(update::update_ingredient).delete(delete::delete_ingredient),
        )
        .route("/{id}/aliases", post(create_alias::create_alias))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_ingredient,
        list::list_ingredients,
        update::update_ingredient,
        delete::delete_ingredient,
        create_alias::create_alias,
        delete_alias::delete_alias,
        search::search_ingredients,
    ),
    components(schemas(
        create::CreateIngredientRequest,
        create::IngredientResponse,
        update::UpdateIngredientRequest,
        create_alias::CreateAliasRequest,
        create_alias::AliasResponse,
        search::AliasSearchHit,
    ))
)]
pub struct ApiDoc;
