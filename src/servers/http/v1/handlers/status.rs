//! Axum [`handlers`](axum#handlers) for the status listing on `/`.
//!
//! ```json
//! [
//!   {
//!     "info_hash": "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0",
//!     "peer_count": 2,
//!     "completed": 1
//!   }
//! ]
//! ```
//!
//! Swarms are ordered by info-hash.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use bittorrent_tracker_core::status::get_swarms_status;
use serde_json::json;

use crate::servers::http::container::HttpTrackerContainer;
use crate::HTTP_TRACKER_LOG_TARGET;

/// It lists every swarm with its peer count and completed downloads.
pub async fn handle(State(http_tracker_container): State<Arc<HttpTrackerContainer>>) -> Response {
    match get_swarms_status(&http_tracker_container.registry).await {
        Ok(swarms) => Json(swarms).into_response(),
        Err(error) => {
            tracing::error!(target: HTTP_TRACKER_LOG_TARGET, "could not list the swarms: {error}");

            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": error.to_string() }))).into_response()
        }
    }
}
