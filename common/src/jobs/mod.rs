use serde::{Deserialize, Serialize};

/// Status of a background job as reported to polling clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    /// Percentage complete and the label of the stage being run.
    InProgress { progress: u32, stage: String },
    Completed(String),
    Failed(String),
}

impl JobStatus {
    /// Failed jobs report 0 so a client progress bar resets.
    pub fn progress(&self) -> u32 {
        match self {
            JobStatus::Pending | JobStatus::Failed(_) => 0,
            JobStatus::InProgress { progress, .. } => *progress,
            JobStatus::Completed(_) => 100,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Completed(_) | JobStatus::Failed(_))
    }
}
