//! Swarm Tracker application.
//!
//! The application loads the configuration, builds the shared services and
//! starts the jobs enabled in the configuration:
//!
//! - HTTP trackers: one per `[[http_trackers]]` entry, all sharing the same
//!   swarm registry.
//! - Swarm reaper: removes inactive peers, unless
//!   `inactive_peer_cleanup_interval` is `0`.
//!
//! It also runs the one-shot sweep used by the `reap` command.
use std::sync::Arc;

use bittorrent_tracker_core::reaper::ReapReport;
use swarm_tracker_configuration::{Configuration, HttpTracker, Info};
use tracing::instrument;

use crate::bootstrap;
use crate::bootstrap::jobs::manager::JobManager;
use crate::bootstrap::jobs::{http_tracker, swarm_reaper};
use crate::container::AppContainer;

/// Loads the configuration, builds the services and starts the jobs.
///
/// # Panics
///
/// Will panic if the configuration cannot be loaded, the storage backend
/// cannot be opened or an HTTP tracker cannot bind to its address.
pub async fn run(info: &Info) -> (Arc<AppContainer>, JobManager) {
    let (config, app_container) = bootstrap::app::setup(info);

    let app_container = Arc::new(app_container);

    let jobs = start(&config, &app_container).await;

    (app_container, jobs)
}

/// Starts the tracker application.
///
/// # Panics
///
/// Will panic if an HTTP tracker cannot bind to its address.
#[instrument(skip(config, app_container))]
pub async fn start(config: &Configuration, app_container: &Arc<AppContainer>) -> JobManager {
    warn_if_no_services_enabled(config);

    let mut job_manager = JobManager::new();

    start_the_http_instances(config, app_container, &mut job_manager).await;

    start_swarm_reaper(config, app_container, &mut job_manager);

    job_manager
}

/// Runs a single sweep of the inactive peer reaper.
///
/// # Panics
///
/// Will panic if the configuration cannot be loaded or the storage backend
/// cannot be opened.
pub async fn reap_once(info: &Info) -> ReapReport {
    let (_config, app_container) = bootstrap::app::setup(info);

    app_container.tracker_core_container.reaper.reap().await
}

fn warn_if_no_services_enabled(config: &Configuration) {
    let http_trackers = config.http_trackers.as_deref().unwrap_or_default();

    if http_trackers.is_empty() {
        tracing::warn!("No services enabled in configuration");
    }
}

async fn start_the_http_instances(config: &Configuration, app_container: &Arc<AppContainer>, job_manager: &mut JobManager) {
    if let Some(http_trackers) = &config.http_trackers {
        for (idx, http_tracker_config) in http_trackers.iter().enumerate() {
            start_http_instance(idx, http_tracker_config, app_container, job_manager).await;
        }
    } else {
        tracing::info!("No HTTP blocks in configuration");
    }
}

async fn start_http_instance(
    idx: usize,
    http_tracker_config: &HttpTracker,
    app_container: &Arc<AppContainer>,
    job_manager: &mut JobManager,
) {
    let http_tracker_container = app_container.http_tracker_container(http_tracker_config);

    let (binding, handle) = http_tracker::start_job(http_tracker_container, job_manager.new_cancellation_token()).await;

    job_manager.push(format!("http_instance_{idx}_{binding}"), handle);
}

fn start_swarm_reaper(config: &Configuration, app_container: &Arc<AppContainer>, job_manager: &mut JobManager) {
    if config.core.inactive_peer_cleanup_interval > 0 {
        let handle = swarm_reaper::start_job(
            &config.core,
            &app_container.tracker_core_container.reaper,
            job_manager.new_cancellation_token(),
        );

        job_manager.push("swarm_reaper", handle);
    } else {
        tracing::info!("Swarm reaper job is disabled.");
    }
}
