//! Batch processing types and data structures

use crate::utils::percent_of;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Lifecycle of a batch job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// Created or reset, nothing attempted yet
    Idle,
    /// Items are being attempted one at a time
    Running,
    /// Every item has been attempted
    Completed,
}

/// Progress of the items attempted so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchProgress {
    /// Number of items in the batch
    pub total: usize,
    /// Items attempted, successful or not
    pub processed: usize,
    /// Names of the items that succeeded, in attempt order
    pub successes: Vec<String>,
    /// `"<name>: <message>"` for each item that failed, in attempt order
    pub errors: Vec<String>,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// `processed / total * 100`
    pub fn percent(&self) -> f64 {
        percent_of(self.processed, self.total)
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// At least one success and no failures
    pub fn is_clean_success(&self) -> bool {
        !self.successes.is_empty() && self.errors.is_empty()
    }

    /// At least one failure and no successes
    pub fn is_total_failure(&self) -> bool {
        self.successes.is_empty() && !self.errors.is_empty()
    }
}

/// Point-in-time copy of a job, published on every change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSnapshot {
    pub job_id: Uuid,
    pub state: JobState,
    pub progress: BatchProgress,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl BatchSnapshot {
    pub fn percent(&self) -> f64 {
        self.progress.percent()
    }

    pub fn is_running(&self) -> bool {
        self.state == JobState::Running
    }

    pub fn is_completed(&self) -> bool {
        self.state == JobState::Completed
    }
}

/// Final outcome of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub job_id: Uuid,
    pub total: usize,
    pub processed: usize,
    pub successes: Vec<String>,
    pub errors: Vec<String>,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl BatchReport {
    pub fn from_snapshot(snapshot: BatchSnapshot, duration: Duration) -> Self {
        Self {
            job_id: snapshot.job_id,
            total: snapshot.progress.total,
            processed: snapshot.progress.processed,
            successes: snapshot.progress.successes,
            errors: snapshot.progress.errors,
            duration,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// How a finished job is dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionPolicy {
    /// Close automatically even when some items failed
    pub close_on_partial_failure: bool,
    /// Wait before closing so the summary can be read
    pub close_delay: Duration,
}

impl CompletionPolicy {
    /// Folder batches hold the dialog open when anything failed
    pub fn hold_on_failure(close_delay: Duration) -> Self {
        Self {
            close_on_partial_failure: false,
            close_delay,
        }
    }

    /// Tag batches always close
    pub fn always_close(close_delay: Duration) -> Self {
        Self {
            close_on_partial_failure: true,
            close_delay,
        }
    }

    pub fn should_auto_close(&self, progress: &BatchProgress) -> bool {
        progress.is_clean_success() || self.close_on_partial_failure
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
