//! Manages the state of long-running, asynchronous background jobs.
//!
//! Demo data loads run outside the request/response cycle. The handler
//! registers the job as `Pending`, returns its id, and the background task
//! reports every stage through an MPSC channel. A single updater task owns
//! the writes to the shared map, so updates are applied in the order they
//! were sent.
//!
//! The main components are:
//! - `JobsState`: a clonable, thread-safe struct holding the status of all jobs.
//!   It is injected into the Actix application state in `main.rs`.
//! - `JobUpdate`: a message carrying a status change for one job.
//! - `start_job_updater`: the long-running task applying `JobUpdate`s.

use common::jobs::JobStatus;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

const CHANNEL_CAPACITY: usize = 100;

/// A thread-safe, shareable container for the state of all background jobs.
#[derive(Clone)]
pub struct JobsState {
    /// A map from a unique job ID to its current `JobStatus`.
    ///
    /// Read by the status endpoint, written by `start_job_updater` (and by
    /// the scheduling handler when it registers a new job).
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,

    /// Background tasks push `JobUpdate` messages through this sender instead
    /// of writing to `jobs` directly.
    pub tx: mpsc::Sender<JobUpdate>,
}

impl JobsState {
    /// Creates the state together with the receiver `start_job_updater` drains.
    pub fn new() -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let state = JobsState {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tx,
        };
        (state, rx)
    }

    pub async fn status(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs.read().await.get(job_id).cloned()
    }
}

/// Represents a status update for a specific background job.
#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

impl JobUpdate {
    pub fn new(job_id: impl Into<String>, status: JobStatus) -> Self {
        JobUpdate {
            job_id: job_id.into(),
            status,
        }
    }
}

/// Starts the central job state updater task.
///
/// Spawn it once per `JobsState` (as `main.rs` does).
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_id, update.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[actix_web::test]
    async fn updater_applies_updates_in_order() {
        let (state, rx) = JobsState::new();
        tokio::spawn(start_job_updater(state.clone(), rx));

        let in_progress = JobStatus::InProgress {
            progress: 50,
            stage: "half".into(),
        };
        state.tx.send(JobUpdate::new("job-1", in_progress)).await.expect("send");
        state
            .tx
            .send(JobUpdate::new("job-1", JobStatus::Completed("done".into())))
            .await
            .expect("send");

        let mut status = None;
        for _ in 0..100 {
            status = state.status("job-1").await;
            if status.as_ref().is_some_and(JobStatus::is_finished) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(status, Some(JobStatus::Completed("done".into())));
    }
}
