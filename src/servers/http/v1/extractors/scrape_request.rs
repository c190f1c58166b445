//! Axum extractor for the [`Scrape`] request.
//!
//! A request without query params is a valid scrape for no info-hash at all.
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;
use bittorrent_http_tracker_protocol::v1::query::Query;
use bittorrent_http_tracker_protocol::v1::requests::scrape::{ParseScrapeQueryError, Scrape};
use bittorrent_http_tracker_protocol::v1::responses;

use crate::servers::http::container::HttpTrackerContainer;
use crate::servers::http::v1::handlers::bencoded;

/// Extractor for the [`Scrape`] request.
pub struct ExtractRequest(pub Scrape);

impl FromRequestParts<Arc<HttpTrackerContainer>> for ExtractRequest {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<HttpTrackerContainer>) -> Result<Self, Self::Rejection> {
        match extract_scrape_from(parts.uri.query()) {
            Ok(scrape_request) => Ok(ExtractRequest(scrape_request)),
            Err(error) => {
                tracing::debug!("invalid scrape request: {error}");

                Err(bencoded(
                    responses::error::Error::from_scrape_query_error(&error, state.announce_interval()).body(),
                ))
            }
        }
    }
}

fn extract_scrape_from(maybe_raw_query: Option<&str>) -> Result<Scrape, ParseScrapeQueryError> {
    let query = maybe_raw_query.unwrap_or_default().parse::<Query>()?;

    Scrape::try_from(query)
}
