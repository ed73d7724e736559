mod api;
mod attributes;
mod auth;
mod db;
mod models;
mod raw_sql;
mod schema;
mod telemetry;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware;
use axum::Router;
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
pub type AppState = Arc<db::DbPool>;

/// Endpoints too chatty to earn an info-level span (load balancer probes).
const QUIET_PATHS: &[&str] = &["/api/test/unauthed-ping"];

fn app(pool: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/test", api::testing::router())
        .nest("/api/ingredients", api::ingredients::router())
        .nest("/api/categories", api::categories::router())
        .nest("/api/restaurants", api::restaurants::router())
        .nest(
            "/api/menu-categories",
            api::restaurants::menu_categories_router(),
        )
        .nest("/api/dishes", api::dishes::router())
        .layer(middleware::from_fn_with_state(
            pool.clone(),
            auth::require_auth,
        ));

    Router::new()
        .merge(api::public::router())
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi()))
        .with_state(pool)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    // Prefer the matched route template so path params don't
                    // explode span cardinality.
                    let route = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or_else(|| request.uri().path());

                    if QUIET_PATHS.contains(&route) {
                        tracing::trace_span!("request")
                    } else {
                        tracing::info_span!("request", method = %request.method(), route)
                    }
                })
                .on_request(|_: &Request<_>, _: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     elapsed: std::time::Duration,
                     span: &Span| {
                        // Quiet paths got a trace-level span above
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        let elapsed_ms = elapsed.as_millis();
                        if status >= 500 {
                            tracing::error!(status, elapsed_ms, "request errored");
                        } else {
                            tracing::info!(status, elapsed_ms, "request handled");
                        }
                    },
                )
                .on_failure(
                    |class: tower_http::classify::ServerErrorsFailureClass,
                     elapsed: std::time::Duration,
                     _: &Span| {
                        let elapsed_ms = elapsed.as_millis();
                        tracing::error!(failure = %class, elapsed_ms, "request failed");
                    },
                ),
        )
}

#[tokio::main]
async fn main() {
    // `tureen-server --openapi` dumps the spec and exits; used to keep
    // generated clients in sync.
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().unwrap();
        println!("{}", spec);
        return;
    }

    telemetry::init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool: AppState = Arc::new(db::create_pool(&database_url));

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_addr);

    axum::serve(listener, app(pool)).await.unwrap();
}
