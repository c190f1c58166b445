use std::net::SocketAddr;
use std::sync::Arc;

use bittorrent_primitives::info_hash::InfoHash;
use swarm_tracker_configuration::Configuration;
use swarm_tracker_lib::bootstrap::app::initialize_global_services;
use swarm_tracker_lib::container::AppContainer;
use swarm_tracker_lib::servers::http::server::{HttpServer, Launcher, Running, Stopped};
use swarm_tracker_primitives::peer::{PeerEntry, PeerId};

pub type Started = Environment<Running>;

/// One HTTP tracker instance with its own services.
pub struct Environment<S> {
    pub container: Arc<AppContainer>,
    pub server: HttpServer<S>,
    config: Configuration,
}

impl<S> Environment<S> {
    /// Adds a peer to a swarm without going through the HTTP tracker.
    pub async fn add_peer(&self, info_hash: &InfoHash, peer_id: &PeerId, peer: PeerEntry) {
        self.container
            .swarm_registry_container
            .registry
            .upsert_peer(info_hash, peer_id, peer)
            .await
            .expect("the peer should be stored");
    }
}

impl Environment<Stopped> {
    /// # Panics
    ///
    /// Will panic if the configuration has no HTTP tracker.
    pub fn new(config: &Configuration) -> Self {
        initialize_global_services(config);

        let container = Arc::new(AppContainer::initialize(config));

        Self::with_container(config, container)
    }

    /// An instance that shares the services of another one.
    pub fn with_container(config: &Configuration, container: Arc<AppContainer>) -> Self {
        let bind_to = first_http_tracker_bind_address(config);

        Self {
            container,
            server: HttpServer::new(Launcher::new(bind_to)),
            config: config.clone(),
        }
    }

    pub async fn start(self) -> Environment<Running> {
        let http_tracker_config = self.config.http_trackers.clone().expect("missing HTTP tracker")[0].clone();

        let server = self
            .server
            .start(self.container.http_tracker_container(&http_tracker_config))
            .await
            .expect("Failed to start the HTTP tracker server");

        Environment {
            container: self.container,
            server,
            config: self.config,
        }
    }
}

impl Environment<Running> {
    pub async fn new(config: &Configuration) -> Self {
        Environment::<Stopped>::new(config).start().await
    }

    pub async fn stop(self) -> Environment<Stopped> {
        let server = self.server.stop().await.expect("Failed to stop the HTTP tracker server");

        Environment {
            container: self.container,
            server,
            config: self.config,
        }
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.server.state.binding
    }

    /// Full URL of a path on this tracker, e.g. `announce?info_hash=...`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{path}", self.bind_address())
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::get(self.url(path)).await.expect("the HTTP tracker should answer")
    }

    pub async fn get_with_header(&self, path: &str, name: &str, value: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(self.url(path))
            .header(name, value)
            .send()
            .await
            .expect("the HTTP tracker should answer")
    }
}

fn first_http_tracker_bind_address(config: &Configuration) -> SocketAddr {
    config
        .http_trackers
        .as_ref()
        .and_then(|http_trackers| http_trackers.first())
        .expect("missing HTTP tracker")
        .bind_address
}
