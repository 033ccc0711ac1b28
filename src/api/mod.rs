//! Read-only REST API over the catalog.

mod handlers;
pub mod middleware;

use std::time::Duration;

use axum::{http::HeaderValue, middleware::from_fn_with_state, routing::get, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::catalog::SharedCatalog;
use crate::config::SecurityConfig;
use middleware::{auth_middleware, rate_limit_middleware, RateLimiter};

pub fn create_router(catalog: SharedCatalog, security: SecurityConfig) -> Router {
    let mut api = Router::new()
        .route("/databases", get(handlers::list_databases))
        .route("/databases/{name}", get(handlers::get_database))
        .route("/databases/{name}/tables", get(handlers::list_tables))
        .route(
            "/databases/{name}/tables/{table}",
            get(handlers::get_table),
        )
        .route("/search", get(handlers::search_tables))
        .with_state(catalog);

    if let Some(max_requests) = security.rate_limit {
        let limiter = RateLimiter::new(max_requests, Duration::from_secs(60));
        api = api.layer(from_fn_with_state(limiter, rate_limit_middleware));
    }
    if security.api_key.is_some() {
        api = api.layer(from_fn_with_state(security.clone(), auth_middleware));
    }

    Router::new()
        .nest("/api/v1", api)
        // Health stays outside the auth boundary for probes.
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&security))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    match &security.cors_origins {
        Some(origins) => {
            let allowed: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    }
}
