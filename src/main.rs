use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use swarm_tracker_lib::app;
use swarm_tracker_lib::console::cli::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let info = args.config_info();

    match args.command() {
        Command::Serve => {
            let (_app_container, jobs) = app::run(&info).await;

            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Unable to listen for the shutdown signal: {err}");
            }

            tracing::info!("Swarm tracker shutting down ...");

            jobs.cancel();

            jobs.wait_for_all(Duration::from_secs(10)).await;

            tracing::info!("Swarm tracker successfully shutdown.");

            ExitCode::SUCCESS
        }
        Command::Reap => {
            let report = app::reap_once(&info).await;

            tracing::info!(
                swarms_scanned = report.swarms_scanned,
                peers_removed = report.peers_removed,
                removal_failures = report.removal_failures,
                scan_interrupted = report.scan_interrupted,
                "Reap finished"
            );

            if report.removal_failures > 0 || report.scan_interrupted {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}
