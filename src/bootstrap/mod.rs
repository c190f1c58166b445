//! Setup for the main tracker application.
//!
//! The [`app::setup`] function loads the configuration, initializes the
//! global services (logging, static time) and builds the
//! [`AppContainer`](crate::container::AppContainer). The [`jobs`] module
//! launches the long running services.
pub mod app;
pub mod jobs;
pub mod logging;
