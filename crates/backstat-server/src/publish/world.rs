//! `GET /world.json`: the full registry plus its capture time.

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use backstat_core::error::BackstatError;

use crate::app_state::AppState;
use crate::publish::ApiError;

/// How long browsers may cache the CORS preflight.
pub const CORS_MAX_AGE_SECS: u64 = 3600;

pub async fn world_json(State(state): State<AppState>) -> Result<Response, ApiError> {
    let started = Instant::now();
    let snapshot = state.registry().snapshot();
    state.metrics().snapshot_duration.observe(&[], started.elapsed());
    state.metrics().snapshot_requests.inc(&[]);

    let body = serde_json::to_vec(&snapshot).map_err(|e| {
        tracing::error!(error = %e, backends = snapshot.world.len(), "snapshot serialization failed");
        BackstatError::Internal(format!("serialize snapshot: {e}"))
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::ACCESS_CONTROL_MAX_AGE, CORS_MAX_AGE_SECS.to_string()),
        ],
        body,
    )
        .into_response())
}
