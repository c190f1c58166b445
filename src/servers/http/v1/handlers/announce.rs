//! Axum [`handlers`](axum#handlers) for the `announce` requests.
//!
//! The handler resolves the peer IP, hands the announce to the tracker core
//! and renders the outcome:
//!
//! - `stopped`: an empty dictionary.
//! - otherwise: the peer list, in the format the client asked for.
//! - any failure: a bencoded `failure reason`.
use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use bittorrent_http_tracker_protocol::v1::requests::announce::Announce;
use bittorrent_http_tracker_protocol::v1::responses;
use bittorrent_http_tracker_protocol::v1::responses::announce::PeerListFormat;
use bittorrent_http_tracker_protocol::v1::services::peer_ip_resolver::{self, ClientIpSources, PeerIpResolutionError};
use bittorrent_tracker_core::announce_handler::AnnounceOutcome;
use bittorrent_tracker_core::error::AnnounceError;

use super::{bencoded, failure};
use crate::servers::http::container::HttpTrackerContainer;
use crate::servers::http::v1::extractors::announce_request::ExtractRequest;
use crate::servers::http::v1::extractors::client_ip_sources::Extract as ExtractClientIpSources;
use crate::HTTP_TRACKER_LOG_TARGET;

/// Errors that can occur while serving an announce.
#[derive(thiserror::Error, Debug, Clone)]
pub enum HttpAnnounceError {
    #[error("Error resolving peer IP: {source}")]
    PeerIpResolution { source: PeerIpResolutionError },

    #[error("Tracker core error: {source}")]
    Core { source: AnnounceError },
}

impl From<PeerIpResolutionError> for HttpAnnounceError {
    fn from(source: PeerIpResolutionError) -> Self {
        Self::PeerIpResolution { source }
    }
}

impl From<AnnounceError> for HttpAnnounceError {
    fn from(source: AnnounceError) -> Self {
        Self::Core { source }
    }
}

/// It handles the `announce` request.
pub async fn handle(
    State(http_tracker_container): State<Arc<HttpTrackerContainer>>,
    ExtractRequest(announce_request): ExtractRequest,
    ExtractClientIpSources(client_ip_sources): ExtractClientIpSources,
) -> Response {
    tracing::debug!(target: HTTP_TRACKER_LOG_TARGET, "http announce request: {:#?}", announce_request);

    match handle_announce(&http_tracker_container, &announce_request, &client_ip_sources).await {
        Ok(outcome) => build_response(&announce_request, outcome),
        Err(error) => {
            tracing::warn!(
                target: HTTP_TRACKER_LOG_TARGET,
                info_hash = %announce_request.info_hash,
                "announce failed: {error}"
            );

            failure(error.to_string(), http_tracker_container.announce_interval())
        }
    }
}

async fn handle_announce(
    http_tracker_container: &HttpTrackerContainer,
    announce_request: &Announce,
    client_ip_sources: &ClientIpSources,
) -> Result<AnnounceOutcome, HttpAnnounceError> {
    let peer_ip = peer_ip_resolver::resolve_peer_ip(
        http_tracker_container.core_config.net.on_reverse_proxy.into(),
        client_ip_sources,
        announce_request.ip,
    )?;

    let announcement = announce_request.to_announcement(peer_ip.ip());

    let outcome = http_tracker_container
        .announce_handler
        .handle_announcement(&announce_request.info_hash, &announcement, &announce_request.peers_wanted())
        .await?;

    Ok(outcome)
}

fn build_response(announce_request: &Announce, outcome: AnnounceOutcome) -> Response {
    match outcome {
        AnnounceOutcome::Stopped => bencoded(responses::announce::Announce::stopped_body()),
        AnnounceOutcome::Announced(announce_data) => {
            let response = responses::announce::Announce::new(announce_data, PeerListFormat::from(announce_request));

            bencoded(response.body())
        }
    }
}
