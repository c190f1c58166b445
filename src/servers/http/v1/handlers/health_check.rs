//! Axum [`handlers`](axum#handlers) for the health check.
//!
//! It only tells the HTTP server is up and serving:
//!
//! ```json
//! {"status":"Ok"}
//! ```
use axum::response::Json;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub status: Status,
}

#[allow(clippy::unused_async)]
pub async fn handler() -> Json<Report> {
    Json(Report { status: Status::Ok })
}
