//! Batch job state machine
//!
//! A [`BatchJob`] owns the single mutable progress record of one bulk run and
//! moves through `Idle -> Running -> Completed`. Clones share the same record,
//! so the task driving the batch and the tasks rendering it see one state.

use super::types::{BatchProgress, BatchSnapshot, JobState};
use crate::utils::error::{PortalError, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

struct JobInner {
    state: JobState,
    progress: BatchProgress,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

/// Shared handle to one batch job
#[derive(Clone)]
pub struct BatchJob {
    id: Uuid,
    inner: Arc<Mutex<JobInner>>,
    updates: Arc<watch::Sender<BatchSnapshot>>,
}

impl BatchJob {
    /// Create an idle job
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        let inner = JobInner {
            state: JobState::Idle,
            progress: BatchProgress::default(),
            started_at: None,
            completed_at: None,
        };
        let (updates, _) = watch::channel(Self::snapshot_of(id, &inner));

        Self {
            id,
            inner: Arc::new(Mutex::new(inner)),
            updates: Arc::new(updates),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> JobState {
        self.inner.lock().state
    }

    pub fn snapshot(&self) -> BatchSnapshot {
        Self::snapshot_of(self.id, &self.inner.lock())
    }

    /// Receive a snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<BatchSnapshot> {
        self.updates.subscribe()
    }

    /// `Idle -> Running` with `total` items to attempt
    pub fn start(&self, total: usize) -> Result<()> {
        self.mutate(|inner| {
            if inner.state != JobState::Idle {
                return Err(PortalError::conflict(format!(
                    "Cannot start a batch that is {:?}",
                    inner.state
                )));
            }
            inner.state = JobState::Running;
            inner.progress = BatchProgress::new(total);
            inner.started_at = Some(Utc::now());
            inner.completed_at = None;
            Ok(())
        })
    }

    /// Count one attempted item as successful
    pub fn record_success(&self, name: &str) -> Result<()> {
        self.record(|progress| progress.successes.push(name.to_string()))
    }

    /// Count one attempted item as failed
    pub fn record_failure(&self, message: String) -> Result<()> {
        self.record(|progress| progress.errors.push(message))
    }

    /// `Running -> Completed`, exactly once per run
    pub fn complete(&self) -> Result<()> {
        self.mutate(|inner| {
            if inner.state != JobState::Running {
                return Err(PortalError::conflict(format!(
                    "Cannot complete a batch that is {:?}",
                    inner.state
                )));
            }
            inner.state = JobState::Completed;
            inner.completed_at = Some(Utc::now());
            Ok(())
        })
    }

    /// Discard progress and return to `Idle`. Refused while running.
    pub fn reset(&self) -> Result<()> {
        self.mutate(|inner| {
            if inner.state == JobState::Running {
                return Err(PortalError::conflict("Cannot reset a running batch"));
            }
            inner.state = JobState::Idle;
            inner.progress = BatchProgress::default();
            inner.started_at = None;
            inner.completed_at = None;
            Ok(())
        })
    }

    fn record<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut BatchProgress),
    {
        self.mutate(|inner| {
            if inner.state != JobState::Running {
                return Err(PortalError::conflict(format!(
                    "Cannot record progress on a batch that is {:?}",
                    inner.state
                )));
            }
            if inner.progress.processed >= inner.progress.total {
                return Err(PortalError::internal("Recorded more items than the batch holds"));
            }
            apply(&mut inner.progress);
            inner.progress.processed += 1;
            Ok(())
        })
    }

    fn mutate<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut JobInner) -> Result<()>,
    {
        let snapshot = {
            let mut inner = self.inner.lock();
            change(&mut inner)?;
            Self::snapshot_of(self.id, &inner)
        };
        self.updates.send_replace(snapshot);
        Ok(())
    }

    fn snapshot_of(id: Uuid, inner: &JobInner) -> BatchSnapshot {
        BatchSnapshot {
            job_id: id,
            state: inner.state,
            progress: inner.progress.clone(),
            started_at: inner.started_at,
            completed_at: inner.completed_at,
        }
    }
}

impl Default for BatchJob {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BatchJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("BatchJob")
            .field("id", &self.id)
            .field("state", &inner.state)
            .field("progress", &inner.progress)
            .finish()
    }
}
