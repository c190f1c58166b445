//! Validated HTTP tracker requests.
pub mod announce;
pub mod scrape;
