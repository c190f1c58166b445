//! Axum [`handlers`](axum#handlers) for the `scrape` requests.
use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use bittorrent_http_tracker_protocol::v1::responses;

use super::{bencoded, failure};
use crate::servers::http::container::HttpTrackerContainer;
use crate::servers::http::v1::extractors::scrape_request::ExtractRequest;
use crate::HTTP_TRACKER_LOG_TARGET;

/// It handles the `scrape` request.
pub async fn handle(
    State(http_tracker_container): State<Arc<HttpTrackerContainer>>,
    ExtractRequest(scrape_request): ExtractRequest,
) -> Response {
    tracing::debug!(target: HTTP_TRACKER_LOG_TARGET, "http scrape request: {:#?}", &scrape_request);

    match http_tracker_container
        .scrape_handler
        .handle_scrape(&scrape_request.info_hashes)
        .await
    {
        Ok(scrape_data) => bencoded(responses::scrape::Bencoded::from(scrape_data).body()),
        Err(error) => {
            tracing::warn!(target: HTTP_TRACKER_LOG_TARGET, "scrape failed: {error}");

            failure(error.to_string(), http_tracker_container.announce_interval())
        }
    }
}
