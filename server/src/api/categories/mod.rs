pub mod create;
pub mod delete;
pub mod list;
pub mod suggestions;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/categories endpoints (mounted at /api/categories)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_categories).post(create::create_category),
        )
        .route("/suggestions", get(suggestions::suggest_categories))
        .route(
            "/{id}",
            axum::routing::patch(update::update_category).delete(delete::delete_category),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_categories,
        create::create_category,
        update::update_category,
        delete::delete_category,
        suggestions::suggest_categories,
    ),
    components(schemas(
        create::CreateCategoryRequest,
        create::CategoryResponse,
        update::UpdateCategoryRequest,
    ))
)]
pub struct ApiDoc;
