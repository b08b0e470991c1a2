//! API routes
//!
//! - [`health`] - liveness check
//! - [`customers`] - customer registration
//! - [`categories`] - category creation and average price
//! - [`products`] - product creation and upload
//! - [`orders`] - order placement and lookup

pub mod categories;
pub mod customers;
pub mod health;
pub mod orders;
pub mod products;

use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(customers::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(orders::router())
}

/// Fully configured application: routes, middleware and state
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    build_router()
        .with_state(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
