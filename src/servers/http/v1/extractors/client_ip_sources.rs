//! Axum extractor for the [`ClientIpSources`].
//!
//! It collects both candidates for the client IP:
//!
//! - The right-most IP in the `X-Forwarded-For` header, the one added by the
//!   reverse proxy in front of the tracker.
//! - The address of the connection, available when the router is served with
//!   `into_make_service_with_connect_info::<SocketAddr>()`.
//!
//! Which one wins is decided later from the `on_reverse_proxy` setting. See
//! [`peer_ip_resolver`](bittorrent_http_tracker_protocol::v1::services::peer_ip_resolver).
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use bittorrent_http_tracker_protocol::v1::services::peer_ip_resolver::ClientIpSources;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Extractor for the [`ClientIpSources`] struct.
pub struct Extract(pub ClientIpSources);

impl<S> FromRequestParts<S> for Extract
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let right_most_x_forwarded_for = right_most_x_forwarded_for(&parts.headers);

        let connection_info_socket_address = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|ConnectInfo(socket_addr)| socket_addr);

        Ok(Extract(ClientIpSources {
            right_most_x_forwarded_for,
            connection_info_socket_address,
        }))
    }
}

/// The last IP of the last `X-Forwarded-For` header, if it parses.
fn right_most_x_forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    let header_value = headers.get_all(X_FORWARDED_FOR).iter().last()?.to_str().ok()?;

    header_value.rsplit(',').next()?.trim().parse::<IpAddr>().ok()
}
