//! Route table for the action server.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::actions::ActionRegistry;
use crate::api::endpoints::{actions, health, webhook};
use crate::api::types::ApiContext;

/// Build the full router for a registry.
pub fn action_server_router(registry: Arc<ActionRegistry>) -> Router {
    build_router(ApiContext::new(registry))
}

fn build_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/webhook", post(webhook::invoke))
        .route("/health", get(health::check))
        .route("/actions", get(actions::list))
        .with_state(ctx)
        .layer(CorsLayer::permissive())
}
