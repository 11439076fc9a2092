//! Folder-membership batch applier

use super::action::{BulkAction, require_selection};
use crate::clients::{FolderApi, FolderMember};
use crate::core::assets::{AssetRef, Folder};
use crate::core::batch::{BatchProgress, BatchReport, CompletionPolicy, ItemOperation};
use crate::core::notify::Notifier;
use crate::utils::error::{PortalError, Result};
use crate::utils::pluralize;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Adds each selected asset to one shared folder
pub struct FolderBatchApplier {
    api: Arc<dyn FolderApi>,
    targets: RwLock<Vec<Folder>>,
    selected_folder: RwLock<Option<String>>,
    close_delay: Duration,
}

impl FolderBatchApplier {
    pub fn new(api: Arc<dyn FolderApi>, close_delay: Duration) -> Self {
        Self {
            api,
            targets: RwLock::new(Vec::new()),
            selected_folder: RwLock::new(None),
            close_delay,
        }
    }

    /// Fetch the folders assets can be added to.
    ///
    /// Keeps shared folders only, sorted by name. A failed load is reported
    /// through `notifier` and leaves the list empty.
    pub async fn load_targets(&self, notifier: &dyn Notifier) -> Vec<Folder> {
        let targets = match self.api.list_folders().await {
            Ok(folders) => {
                let mut shared: Vec<Folder> =
                    folders.into_iter().filter(Folder::is_shared).collect();
                shared.sort_by(|a, b| a.name.cmp(&b.name));
                debug!(count = shared.len(), "Loaded shared folders");
                shared
            }
            Err(e) => {
                notifier.error(&format!("Failed to load folders: {}", e.detail()));
                Vec::new()
            }
        };

        *self.targets.write() = targets.clone();
        targets
    }

    pub fn targets(&self) -> Vec<Folder> {
        self.targets.read().clone()
    }

    /// Record the target folder. The id is used as given.
    pub fn select_folder(&self, folder_id: impl Into<String>) {
        *self.selected_folder.write() = Some(folder_id.into());
    }

    pub fn selected_folder(&self) -> Option<String> {
        self.selected_folder.read().clone()
    }

    /// Name of the selected folder, or its id when it is not a loaded target
    pub fn folder_label(&self) -> String {
        let Some(id) = self.selected_folder() else {
            return String::new();
        };
        self.targets
            .read()
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.name.clone())
            .unwrap_or(id)
    }
}

/// One folder batch, bound to the folder selected when it was prepared
pub struct FolderRun {
    api: Arc<dyn FolderApi>,
    folder_id: String,
    folder_name: String,
}

impl FolderRun {
    pub fn folder_id(&self) -> &str {
        &self.folder_id
    }

    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }
}

#[async_trait]
impl ItemOperation for FolderRun {
    async fn apply_one(&self, asset: &AssetRef) -> Result<()> {
        let member = FolderMember::new(asset.asset_type, asset.id.clone());
        self.api.add_member(&self.folder_id, member).await
    }

    fn failure_fallback(&self) -> &str {
        "Failed to add"
    }
}

#[async_trait]
impl BulkAction for FolderBatchApplier {
    type Run = FolderRun;

    fn label(&self) -> &'static str {
        "add-to-folder"
    }

    fn policy(&self) -> CompletionPolicy {
        CompletionPolicy::hold_on_failure(self.close_delay)
    }

    fn prepare(&self, selected: &[AssetRef]) -> Result<FolderRun> {
        let folder_id = self
            .selected_folder()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| PortalError::validation("Please select a folder"))?;
        require_selection(selected)?;

        Ok(FolderRun {
            api: self.api.clone(),
            folder_name: self.folder_label(),
            folder_id,
        })
    }

    async fn on_open(&self, notifier: &dyn Notifier) {
        self.load_targets(notifier).await;
    }

    fn summarize(&self, run: &FolderRun, report: &BatchReport, notifier: &dyn Notifier) {
        let folder = run.folder_name();
        let added = report.successes.len();
        let failed = report.errors.len();
        info!(%folder, added, failed, "Folder batch finished");

        match (added, failed) {
            (_, 0) => notifier.success(&format!(
                "Added {} to {}",
                pluralize(added, "asset"),
                folder
            )),
            (0, _) => notifier.error(&format!(
                "Failed to add {} to {}",
                pluralize(failed, "asset"),
                folder
            )),
            _ => notifier.warning(&format!(
                "Added {} to {}; {} failed",
                pluralize(added, "asset"),
                folder,
                failed
            )),
        }
    }

    /// Only a run where every item failed can be retried
    fn can_retry(&self, progress: &BatchProgress) -> bool {
        progress.is_total_failure()
    }
}
