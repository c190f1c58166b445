//! HTTP tracker routes for version `v1`.
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{Level, Span};

use super::handlers::{announce, health_check, scrape, status};
use crate::servers::http::container::HttpTrackerContainer;
use crate::HTTP_TRACKER_LOG_TARGET;

/// It adds the routes to the router.
///
/// > **NOTICE**: serve it with `into_make_service_with_connect_info::<SocketAddr>()`
/// > so the handlers can see the client address.
#[must_use]
pub fn router(http_tracker_container: Arc<HttpTrackerContainer>) -> Router {
    Router::new()
        // Status
        .route("/", get(status::handle))
        .route("/health_check", get(health_check::handler))
        // Announce request
        .route("/announce", get(announce::handle))
        // Scrape request
        .route("/scrape", get(scrape::handle))
        .with_state(http_tracker_container)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(|request: &Request, _span: &Span| {
                    tracing::debug!(
                        target: HTTP_TRACKER_LOG_TARGET,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                })
                .on_response(|response: &Response, latency: Duration, _span: &Span| {
                    tracing::debug!(
                        target: HTTP_TRACKER_LOG_TARGET,
                        status_code = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                }),
        )
}
