pub mod categories;
pub mod dishes;
pub mod ingredients;
pub mod public;
pub mod restaurants;
pub mod testing;

use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn merge(spec: &mut utoipa::openapi::OpenApi, module: utoipa::openapi::OpenApi) {
    spec.paths.paths.extend(module.paths.paths);
    if let (Some(into), Some(from)) = (spec.components.as_mut(), module.components) {
        into.schemas.extend(from.schemas);
    }
}

/// Assemble the full OpenAPI document from every api module's `ApiDoc`.
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    merge(&mut spec, public::ApiDoc::openapi());
    merge(&mut spec, testing::ApiDoc::openapi());
    merge(&mut spec, ingredients::ApiDoc::openapi());
    merge(&mut spec, categories::ApiDoc::openapi());
    merge(&mut spec, restaurants::ApiDoc::openapi());
    merge(&mut spec, dishes::ApiDoc::openapi());

    spec
}
