//! Dialog host for a bulk action
//!
//! The dialog owns the batch job for its current selection. Closing is refused
//! while a batch runs, and `on_complete` fires exactly once per finished run,
//! either after the auto-close delay or on manual dismissal.

use super::action::BulkAction;
use crate::core::assets::AssetRef;
use crate::core::batch::{BatchJob, BatchReport, BatchRunner, BatchSnapshot, JobState};
use crate::core::notify::Notifier;
use crate::utils::error::{PortalError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

/// Callback fired by the dialog
pub type DialogCallback = Arc<dyn Fn() + Send + Sync>;

/// How a submitted run ended
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    /// The dialog closed itself after the policy's delay
    AutoClosed(BatchReport),
    /// The results stay on screen until the user closes the dialog
    AwaitingDismissal(BatchReport),
}

impl DialogOutcome {
    pub fn report(&self) -> &BatchReport {
        match self {
            DialogOutcome::AutoClosed(report) | DialogOutcome::AwaitingDismissal(report) => report,
        }
    }
}

struct DialogState {
    open: bool,
    selected: Vec<AssetRef>,
    job: BatchJob,
}

struct DialogShared {
    state: Mutex<DialogState>,
    on_close: Option<DialogCallback>,
    on_complete: Option<DialogCallback>,
}

impl DialogShared {
    /// Close unless a batch is running. With `only_job` set, close only while
    /// that job is still the current one.
    fn close(&self, only_job: Option<Uuid>) -> bool {
        let completed = {
            let mut state = self.state.lock();
            if !state.open {
                return false;
            }
            if only_job.is_some_and(|id| id != state.job.id()) {
                return false;
            }
            if state.job.state() == JobState::Running {
                debug!("Close refused while batch is running");
                return false;
            }

            let completed = state.job.state() == JobState::Completed;
            state.open = false;
            state.selected.clear();
            state.job = BatchJob::new();
            completed
        };

        if let Some(on_close) = &self.on_close {
            on_close();
        }
        if completed {
            if let Some(on_complete) = &self.on_complete {
                on_complete();
            }
        }
        true
    }
}

/// Cloneable view of a dialog for other tasks
#[derive(Clone)]
pub struct DialogHandle {
    shared: Arc<DialogShared>,
}

impl DialogHandle {
    pub fn is_open(&self) -> bool {
        self.shared.state.lock().open
    }

    pub fn snapshot(&self) -> BatchSnapshot {
        self.shared.state.lock().job.snapshot()
    }

    /// Progress updates for the current job
    pub fn subscribe(&self) -> watch::Receiver<BatchSnapshot> {
        self.shared.state.lock().job.subscribe()
    }

    pub fn can_close(&self) -> bool {
        self.shared.state.lock().job.state() != JobState::Running
    }

    /// Returns whether the dialog was closed
    pub fn close(&self) -> bool {
        self.shared.close(None)
    }
}

/// Hosts one bulk action for the asset list page
pub struct BulkDialog<A: BulkAction> {
    action: Arc<A>,
    notifier: Arc<dyn Notifier>,
    shared: Arc<DialogShared>,
}

impl<A: BulkAction> BulkDialog<A> {
    pub fn new(action: A, notifier: Arc<dyn Notifier>) -> Self {
        Self::build(Arc::new(action), notifier, None, None)
    }

    fn build(
        action: Arc<A>,
        notifier: Arc<dyn Notifier>,
        on_close: Option<DialogCallback>,
        on_complete: Option<DialogCallback>,
    ) -> Self {
        let state = DialogState {
            open: false,
            selected: Vec::new(),
            job: BatchJob::new(),
        };
        Self {
            action,
            notifier,
            shared: Arc::new(DialogShared {
                state: Mutex::new(state),
                on_close,
                on_complete,
            }),
        }
    }

    /// Fired on every successful close. Set before the dialog is opened.
    pub fn on_close<F>(self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let on_complete = self.shared.on_complete.clone();
        Self::build(self.action, self.notifier, Some(Arc::new(callback)), on_complete)
    }

    /// Fired once when a finished run is dismissed. Set before the dialog is
    /// opened.
    pub fn on_complete<F>(self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let on_close = self.shared.on_close.clone();
        Self::build(self.action, self.notifier, on_close, Some(Arc::new(callback)))
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn handle(&self) -> DialogHandle {
        DialogHandle {
            shared: self.shared.clone(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.handle().is_open()
    }

    pub fn selected(&self) -> Vec<AssetRef> {
        self.shared.state.lock().selected.clone()
    }

    /// Open with a selection and run the action's open hook.
    ///
    /// A finished run still on screen is dismissed first, so its completion
    /// callback fires before the new selection replaces it.
    pub async fn open(&self, selected: Vec<AssetRef>) -> Result<()> {
        let awaiting_dismissal = {
            let state = self.shared.state.lock();
            if state.job.state() == JobState::Running {
                return Err(PortalError::conflict("A batch is already running"));
            }
            state.open && state.job.state() == JobState::Completed
        };
        if awaiting_dismissal {
            self.shared.close(None);
        }

        {
            let mut state = self.shared.state.lock();
            if state.job.state() == JobState::Running {
                return Err(PortalError::conflict("A batch is already running"));
            }
            state.open = true;
            state.selected = selected;
            state.job = BatchJob::new();
        }

        debug!(action = self.action.label(), "Dialog opened");
        self.action.on_open(self.notifier.as_ref()).await;
        Ok(())
    }

    /// Validate, run the batch, then apply the completion policy.
    ///
    /// The action's inputs are frozen before the first item, so later edits
    /// only apply to the next submission. A validation failure is shown as a
    /// warning and returned without any call being made.
    pub async fn submit(&self) -> Result<DialogOutcome> {
        let (job, selected) = {
            let state = self.shared.state.lock();
            if !state.open {
                return Err(PortalError::conflict("Dialog is not open"));
            }
            (state.job.clone(), state.selected.clone())
        };

        let run = match self.action.prepare(&selected) {
            Ok(run) => run,
            Err(e) => {
                if e.is_validation() {
                    self.notifier.warning(&e.detail());
                }
                return Err(e);
            }
        };

        info!(
            action = self.action.label(),
            assets = selected.len(),
            "Submitting bulk action"
        );
        let report = BatchRunner::run(&job, &selected, &run).await?;
        self.action.summarize(&run, &report, self.notifier.as_ref());

        let policy = self.action.policy();
        if !policy.should_auto_close(&job.snapshot().progress) {
            debug!(job_id = %job.id(), "Holding dialog for review");
            return Ok(DialogOutcome::AwaitingDismissal(report));
        }

        tokio::time::sleep(policy.close_delay).await;
        self.shared.close(Some(job.id()));
        Ok(DialogOutcome::AutoClosed(report))
    }

    /// Reset a finished run so the same selection can be resubmitted
    pub fn try_again(&self) -> Result<()> {
        let state = self.shared.state.lock();
        let snapshot = state.job.snapshot();
        if !snapshot.is_completed() || !self.action.can_retry(&snapshot.progress) {
            return Err(PortalError::conflict(
                "Retry is only available after every item failed",
            ));
        }
        state.job.reset()
    }

    pub fn close(&self) -> bool {
        self.shared.close(None)
    }
}
