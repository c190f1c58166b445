use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// A named background job.
#[derive(Debug)]
pub struct Job {
    name: String,
    handle: JoinHandle<()>,
}

impl Job {
    pub fn new<N: Into<String>>(name: N, handle: JoinHandle<()>) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

/// How a job ended after the shutdown request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed,
    /// The job panicked or was aborted.
    Failed(String),
    /// The job was still running when its grace period expired.
    TimedOut,
}

/// Owns the background jobs and the cancellation token they listen to.
#[derive(Debug, Default)]
pub struct JobManager {
    jobs: Vec<Job>,
    cancellation_token: CancellationToken,
}

impl JobManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            cancellation_token: CancellationToken::new(),
        }
    }

    pub fn push<N: Into<String>>(&mut self, name: N, handle: JoinHandle<()>) {
        self.jobs.push(Job::new(name, handle));
    }

    pub fn push_opt<N: Into<String>>(&mut self, name: N, handle: Option<JoinHandle<()>>) {
        if let Some(handle) = handle {
            self.push(name, handle);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// A token that is cancelled when [`JobManager::cancel`] is called.
    #[must_use]
    pub fn new_cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Asks every job to stop.
    ///
    /// Jobs are not aborted. Each one must watch its token and return.
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    /// Waits for the jobs one after another, giving each one at most
    /// `grace_period`. Returns the outcome of every job, in push order.
    pub async fn wait_for_all(mut self, grace_period: Duration) -> Vec<(String, JobOutcome)> {
        let mut outcomes = Vec::with_capacity(self.jobs.len());

        for job in self.jobs.drain(..) {
            info!(job = %job.name, "Waiting for job to finish (timeout of {} seconds) ...", grace_period.as_secs());

            let outcome = match timeout(grace_period, job.handle).await {
                Ok(Ok(())) => {
                    info!(job = %job.name, "Job completed gracefully");
                    JobOutcome::Completed
                }
                Ok(Err(join_error)) => {
                    warn!(job = %job.name, "Job return an error: {:?}", join_error);
                    JobOutcome::Failed(join_error.to_string())
                }
                Err(_elapsed) => {
                    warn!(job = %job.name, "Job did not complete in time");
                    JobOutcome::TimedOut
                }
            };

            outcomes.push((job.name, outcome));
        }

        outcomes
    }
}
