//! HTTP route handlers for Warden.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod account;
mod error;
mod guard;
mod health;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Routes behind the session guard
    let protected = Router::new()
        .route("/account/current", get(account::current))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_admin,
        ));

    Router::new()
        // Health & Status
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))

        // Captcha + session endpoints
        .route("/account/checkCode", get(account::check_code))
        .route("/account/login", post(account::login))
        .route("/account/logout", post(account::logout))

        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
