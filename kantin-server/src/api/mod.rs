//! API routes for kantin-server

pub mod diagnostics;
pub mod extract;
pub mod health;
pub mod menu;
pub mod tools;
pub mod user;

use axum::Router;
use axum::routing::{get, post};
use http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ServiceError;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, ServiceError>;

/// Create the router with all routes and request tracing
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/menu/sales-count", post(menu::sales_count))
        .route("/api/user/profile", post(user::upsert_profile))
        .route("/api/test-db", get(diagnostics::test_db))
        .route("/api/test-email", get(diagnostics::test_email))
        .merge(tools::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the web frontend: `*` or a single origin
pub fn cors_layer(allow_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allow_origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(allow_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(origin = allow_origin, error = %e, "Invalid CORS origin, allowing any");
            layer.allow_origin(Any)
        }
    }
}
