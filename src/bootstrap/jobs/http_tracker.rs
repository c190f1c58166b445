//! HTTP tracker job starter.
//!
//! The [`start_job`] function starts one HTTP tracker instance. The job stops
//! the server when the cancellation token is cancelled, letting open
//! connections finish.
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::servers::http::container::HttpTrackerContainer;
use crate::servers::http::server::{HttpServer, Launcher};
use crate::HTTP_TRACKER_LOG_TARGET;

/// It starts a new HTTP server with the provided configuration.
///
/// It returns the address the server is bound to and the job handle.
///
/// # Panics
///
/// It would panic if the server cannot bind to the configured address.
#[instrument(skip(http_tracker_container, cancellation_token))]
pub async fn start_job(
    http_tracker_container: Arc<HttpTrackerContainer>,
    cancellation_token: CancellationToken,
) -> (SocketAddr, JoinHandle<()>) {
    let bind_to = http_tracker_container.http_tracker_config.bind_address;

    let server = HttpServer::new(Launcher::new(bind_to))
        .start(http_tracker_container)
        .await
        .expect("it should be able to start the HTTP tracker");

    let binding = server.state.binding;

    let job = tokio::spawn(async move {
        cancellation_token.cancelled().await;

        if let Err(err) = server.stop().await {
            tracing::error!(target: HTTP_TRACKER_LOG_TARGET, "Failed to stop the HTTP tracker on {binding}: {err}");
        }
    });

    (binding, job)
}
