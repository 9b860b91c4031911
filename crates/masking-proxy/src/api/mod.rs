//! HTTP API for the masking proxy.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{logging_middleware, rate_limit_middleware, RateLimitState};
pub use types::*;

use crate::notify::Notifier;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use ride_store::{Records, Store};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Every record the relay routes by
    pub records: Arc<RwLock<Records>>,
    /// Persistent storage backend
    pub store: Arc<Store>,
    /// Outbound SMS transport
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create new application state.
    pub fn new(records: Records, store: Store, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            store: Arc::new(store),
            notifier,
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    create_router_with_rate_limit(state, RateLimitState::new(30))
}

/// Create the API router with custom rate limiting.
///
/// Only ride registration is throttled; the carrier webhooks are never
/// rate limited.
pub fn create_router_with_rate_limit(state: AppState, rate_limit: RateLimitState) -> Router {
    let registration = Router::new()
        .route("/createride", post(handlers::create_ride))
        .layer(axum_middleware::from_fn_with_state(
            rate_limit.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        // Operational views
        .route("/", get(handlers::overview))
        .route("/health", get(handlers::health))
        // Carrier webhooks
        .route("/webhook", post(handlers::inbound_message))
        .route("/webhook-voice", get(handlers::inbound_voice))
        .merge(registration)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
