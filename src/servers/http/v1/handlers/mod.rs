//! Axum [`handlers`](axum#handlers) for the HTTP tracker.
//!
//! The tracker endpoints (`announce`, `scrape`) always answer `200 OK` with a
//! bencoded body, failures included. The status listing and the health check
//! are JSON.
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bittorrent_http_tracker_protocol::v1::responses;

pub mod announce;
pub mod health_check;
pub mod scrape;
pub mod status;

/// A `200 OK` response with a bencoded body.
pub(crate) fn bencoded(body: Vec<u8>) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

/// A bencoded `failure reason` response.
pub(crate) fn failure(failure_reason: impl Into<String>, interval: u32) -> Response {
    bencoded(responses::error::Error::new(failure_reason, interval).body())
}
