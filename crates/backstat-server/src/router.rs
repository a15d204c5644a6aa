//! Axum router wiring.
//!
//! - `/world.json` : registry snapshot, readable cross-origin
//! - `/healthz`, `/readyz`, `/metrics` : operational endpoints

use std::time::Duration;

use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::{app_state::AppState, ops, publish};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .max_age(Duration::from_secs(publish::CORS_MAX_AGE_SECS));

    Router::new()
        .route("/world.json", get(publish::world_json))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
        .layer(cors)
}
