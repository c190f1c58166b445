//! Axum extractor for the [`Announce`] request.
//!
//! It parses the URL query into a validated [`Announce`]. When validation
//! fails the client gets the bencoded failure straight away:
//!
//! ```text
//! d14:failure reason27:Missing Argument (uploaded)8:intervali1800ee
//! ```
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;
use bittorrent_http_tracker_protocol::v1::query::Query;
use bittorrent_http_tracker_protocol::v1::requests::announce::{Announce, ParseAnnounceQueryError};
use bittorrent_http_tracker_protocol::v1::responses;

use crate::servers::http::container::HttpTrackerContainer;
use crate::servers::http::v1::handlers::bencoded;

/// Extractor for the [`Announce`] request.
pub struct ExtractRequest(pub Announce);

impl FromRequestParts<Arc<HttpTrackerContainer>> for ExtractRequest {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<HttpTrackerContainer>) -> Result<Self, Self::Rejection> {
        match extract_announce_from(parts.uri.query()) {
            Ok(announce_request) => Ok(ExtractRequest(announce_request)),
            Err(error) => {
                tracing::debug!("invalid announce request: {error}");

                Err(bencoded(
                    responses::error::Error::from_announce_query_error(&error, state.announce_interval()).body(),
                ))
            }
        }
    }
}

fn extract_announce_from(maybe_raw_query: Option<&str>) -> Result<Announce, ParseAnnounceQueryError> {
    let query = maybe_raw_query.unwrap_or_default().parse::<Query>()?;

    Announce::try_from(query)
}
