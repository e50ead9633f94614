//! Route definitions for the preview service.
//!
//! ## Routes
//!
//! - `GET /health` - Health check (JSON)
//! - `{route_prefix}/{id}` - Intercepted by the preview gate for crawler
//!   user-agents
//! - everything else - Static app files, with the entry document as the
//!   not-found fallback
//!
//! The preview gate is layered over the whole router, mirroring an edge
//! handler: it inspects every request and either responds with a rendered
//! preview or lets the request continue to the inner service.

pub mod post;

use axum::routing::get;
use axum::{Json, Router, middleware};
use serde::Serialize;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Build the complete service router.
pub fn router(state: AppState) -> Router {
    let spa_index = state.config.spa_dir.join(&state.config.spa_index);
    let spa = ServeDir::new(&state.config.spa_dir).fallback(ServeFile::new(spa_index));

    Router::new()
        .route("/health", get(health_check))
        .fallback_service(spa)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            post::preview_gate,
        ))
        .with_state(state)
}

/// Health check response for load balancer probes.
#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "duocortex-preview",
        version: env!("CARGO_PKG_VERSION"),
    })
}
