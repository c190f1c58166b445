//! Resolves the IP a peer is reachable at.
//!
//! The resolved IP is the one stored in the swarm and handed to other peers in
//! `announce` responses. Sources, by priority:
//!
//! 1. The `ip` param of the announce, when the client sent one.
//! 2. The right-most IP in the `X-Forwarded-For` header, when the tracker runs
//!    behind a reverse proxy.
//! 3. The address of the TCP connection otherwise.
//!
//! Given this request chain:
//!
//! ```text
//! client          <-> http proxy 1                 <-> http proxy 2                          <-> server
//! ip: 126.0.0.1       ip: 126.0.0.2                    ip: 126.0.0.3                             ip: 126.0.0.4
//!                     X-Forwarded-For: 126.0.0.1       X-Forwarded-For: 126.0.0.1,126.0.0.2
//! ```
//!
//! the candidates are `126.0.0.2` (header) and `126.0.0.3` (connection).
//! Only the right-most header entry is used: it is the one added by the proxy
//! the tracker trusts.
use std::net::{IpAddr, SocketAddr};
use std::panic::Location;

use thiserror::Error;

/// Resolves the peer IP for an announce.
///
/// # Errors
///
/// Will return an error if the client did not send an `ip` param and the
/// source selected by the `ReverseProxyMode` is missing.
pub fn resolve_peer_ip(
    reverse_proxy_mode: ReverseProxyMode,
    client_ip_sources: &ClientIpSources,
    announced_ip: Option<IpAddr>,
) -> Result<ResolvedIp, PeerIpResolutionError> {
    if let Some(ip) = announced_ip {
        return Ok(ResolvedIp::FromAnnounceParam(ip));
    }

    match reverse_proxy_mode {
        ReverseProxyMode::Enabled => client_ip_sources.try_client_ip_from_proxy_header().map(ResolvedIp::FromXForwardedFor),
        ReverseProxyMode::Disabled => client_ip_sources
            .try_client_ip_from_connection_info()
            .map(ResolvedIp::FromSocketAddr),
    }
}

/// Whether the tracker runs behind a reverse proxy.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ReverseProxyMode {
    Enabled,
    Disabled,
}

impl From<bool> for ReverseProxyMode {
    fn from(on_reverse_proxy: bool) -> Self {
        if on_reverse_proxy {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Where the client IP can be taken from, as extracted from the HTTP request.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ClientIpSources {
    /// The right most IP from the `X-Forwarded-For` HTTP header.
    pub right_most_x_forwarded_for: Option<IpAddr>,

    /// The client's socket address from the connection info.
    pub connection_info_socket_address: Option<SocketAddr>,
}

impl ClientIpSources {
    #[track_caller]
    fn try_client_ip_from_connection_info(&self) -> Result<IpAddr, PeerIpResolutionError> {
        self.connection_info_socket_address
            .map(|socket_addr| socket_addr.ip())
            .ok_or(PeerIpResolutionError::MissingClientIp {
                location: Location::caller(),
            })
    }

    #[track_caller]
    fn try_client_ip_from_proxy_header(&self) -> Result<IpAddr, PeerIpResolutionError> {
        self.right_most_x_forwarded_for
            .ok_or(PeerIpResolutionError::MissingRightMostXForwardedForIp {
                location: Location::caller(),
            })
    }
}

/// The error that can occur when resolving the peer IP.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum PeerIpResolutionError {
    /// The tracker is configured to run behind a reverse proxy but the
    /// `X-Forwarded-For` HTTP header is missing or invalid.
    #[error(
        "missing or invalid the right most X-Forwarded-For IP (mandatory on reverse proxy tracker configuration) in {location}"
    )]
    MissingRightMostXForwardedForIp { location: &'static Location<'static> },

    /// The connection info was not made available to the request handler.
    #[error("cannot get the client IP from the connection info in {location}")]
    MissingClientIp { location: &'static Location<'static> },
}

/// The resolved peer IP and the source it was taken from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ResolvedIp {
    FromAnnounceParam(IpAddr),
    FromXForwardedFor(IpAddr),
    FromSocketAddr(IpAddr),
}

impl ResolvedIp {
    #[must_use]
    pub fn ip(&self) -> IpAddr {
        match self {
            ResolvedIp::FromAnnounceParam(ip) | ResolvedIp::FromXForwardedFor(ip) | ResolvedIp::FromSocketAddr(ip) => *ip,
        }
    }
}
