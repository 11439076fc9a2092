use crate::core::assets::AssetRef;
use crate::core::batch::{BatchProgress, BatchReport, CompletionPolicy, ItemOperation};
use crate::core::notify::Notifier;
use crate::utils::error::{PortalError, Result};
use async_trait::async_trait;

/// A bulk action a dialog can host
#[async_trait]
pub trait BulkAction: Send + Sync {
    /// The operation one submitted batch runs. Its inputs are fixed when it is
    /// prepared.
    type Run: ItemOperation;

    /// Short name used in logs
    fn label(&self) -> &'static str;

    fn policy(&self) -> CompletionPolicy;

    /// Validate the current inputs and freeze them for one batch. Nothing is
    /// called on failure.
    fn prepare(&self, selected: &[AssetRef]) -> Result<Self::Run>;

    /// Runs every time the dialog opens
    async fn on_open(&self, _notifier: &dyn Notifier) {}

    /// Raise the completion notifications for a finished run
    fn summarize(&self, run: &Self::Run, report: &BatchReport, notifier: &dyn Notifier);

    /// Whether a completed run may be reset and resubmitted
    fn can_retry(&self, _progress: &BatchProgress) -> bool {
        false
    }
}

pub fn require_selection(selected: &[AssetRef]) -> Result<()> {
    if selected.is_empty() {
        return Err(PortalError::validation("No assets selected"));
    }
    Ok(())
}
