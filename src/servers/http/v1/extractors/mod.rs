//! Axum [`extractors`](axum::extract) for the HTTP tracker requests.
//!
//! Parsing failures are rejected with a bencoded `failure reason` and status
//! `200 OK`, the same way a handler reports any other failure.
pub mod announce_request;
pub mod client_ip_sources;
pub mod scrape_request;
