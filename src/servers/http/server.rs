//! Module to handle the HTTP server instances.
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::container::HttpTrackerContainer;
use super::v1::routes::router;
use crate::HTTP_TRACKER_LOG_TARGET;

/// Error that can occur when starting or stopping the HTTP server.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not bind the HTTP tracker to {bind_address}: {source}")]
    CouldNotBind {
        bind_address: SocketAddr,
        source: std::io::Error,
    },

    #[error("Could not get the local address of the HTTP tracker bound to {bind_address}: {source}")]
    MissingLocalAddress {
        bind_address: SocketAddr,
        source: std::io::Error,
    },

    #[error("The HTTP tracker on {address} crashed: {source}")]
    Crashed { address: SocketAddr, source: std::io::Error },

    #[error("The HTTP tracker task on {address} did not finish: {source}")]
    TaskFailed {
        address: SocketAddr,
        source: tokio::task::JoinError,
    },
}

/// What the server needs to start: where to listen.
#[derive(Debug, Clone, Copy)]
pub struct Launcher {
    pub bind_to: SocketAddr,
}

impl Launcher {
    #[must_use]
    pub fn new(bind_to: SocketAddr) -> Self {
        Self { bind_to }
    }

    #[instrument(skip(self, http_tracker_container, halt))]
    async fn start(
        self,
        http_tracker_container: Arc<HttpTrackerContainer>,
        halt: CancellationToken,
    ) -> Result<(SocketAddr, JoinHandle<Result<Launcher, Error>>), Error> {
        let listener = TcpListener::bind(self.bind_to).await.map_err(|source| Error::CouldNotBind {
            bind_address: self.bind_to,
            source,
        })?;

        let address = listener.local_addr().map_err(|source| Error::MissingLocalAddress {
            bind_address: self.bind_to,
            source,
        })?;

        tracing::info!(target: HTTP_TRACKER_LOG_TARGET, "Starting on: http://{address}");

        let app = router(http_tracker_container);

        let task = tokio::spawn(async move {
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .with_graceful_shutdown(async move {
                    halt.cancelled().await;

                    tracing::info!(target: HTTP_TRACKER_LOG_TARGET, "Shutting down HTTP server on socket address: {address}");
                })
                .await
                .map_err(|source| Error::Crashed { address, source })?;

            tracing::info!(target: HTTP_TRACKER_LOG_TARGET, "Stopped server running on: http://{address}");

            Ok(self)
        });

        tracing::info!(target: HTTP_TRACKER_LOG_TARGET, "Started on: http://{address}");

        Ok((address, task))
    }
}

/// A HTTP server instance controller with no HTTP instance running.
#[allow(clippy::module_name_repetitions)]
pub type StoppedHttpServer = HttpServer<Stopped>;

/// A HTTP server instance controller with a running HTTP instance.
#[allow(clippy::module_name_repetitions)]
pub type RunningHttpServer = HttpServer<Running>;

/// A HTTP server instance controller.
///
/// A state machine: a `stopped` server can be started and a `running` server
/// can be stopped, always with the same [`Launcher`].
#[allow(clippy::module_name_repetitions)]
pub struct HttpServer<S> {
    /// The state of the server: `running` or `stopped`.
    pub state: S,
}

/// A stopped HTTP server state.
pub struct Stopped {
    launcher: Launcher,
}

/// A running HTTP server state.
pub struct Running {
    /// The address where the server is bound.
    pub binding: SocketAddr,
    halt: CancellationToken,
    task: JoinHandle<Result<Launcher, Error>>,
}

impl HttpServer<Stopped> {
    #[must_use]
    pub fn new(launcher: Launcher) -> Self {
        Self {
            state: Stopped { launcher },
        }
    }

    /// It starts the server and returns a `HttpServer` controller in `running`
    /// state.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the server cannot bind to the configured
    /// address.
    pub async fn start(self, http_tracker_container: Arc<HttpTrackerContainer>) -> Result<HttpServer<Running>, Error> {
        let halt = CancellationToken::new();

        let (binding, task) = self.state.launcher.start(http_tracker_container, halt.clone()).await?;

        Ok(HttpServer {
            state: Running { binding, halt, task },
        })
    }
}

impl HttpServer<Running> {
    /// It stops the server and returns a `HttpServer` controller in `stopped`
    /// state. Open connections are allowed to finish.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the server crashed or its task panicked.
    pub async fn stop(self) -> Result<HttpServer<Stopped>, Error> {
        let address = self.state.binding;

        self.state.halt.cancel();

        let launcher = self
            .state
            .task
            .await
            .map_err(|source| Error::TaskFailed { address, source })??;

        Ok(HttpServer {
            state: Stopped { launcher },
        })
    }
}
