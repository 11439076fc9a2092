//! Tag batch applier

use super::action::{BulkAction, require_selection};
use crate::clients::TagApi;
use crate::core::assets::{AssetRef, Tag, merge_tags, valid_tags};
use crate::core::batch::{BatchReport, CompletionPolicy, ItemOperation};
use crate::core::notify::Notifier;
use crate::utils::error::{PortalError, Result};
use crate::utils::pluralize;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Merges user-entered tags into each selected asset's tag set
pub struct TagBatchApplier {
    api: Arc<dyn TagApi>,
    rows: RwLock<Vec<Tag>>,
    close_delay: Duration,
}

impl TagBatchApplier {
    pub fn new(api: Arc<dyn TagApi>, close_delay: Duration) -> Self {
        Self {
            api,
            rows: RwLock::new(Vec::new()),
            close_delay,
        }
    }

    /// Replace the rows as the user entered them, blanks included
    pub fn set_tag_rows(&self, rows: Vec<Tag>) {
        *self.rows.write() = rows;
    }

    /// Rows with both a key and a value, trimmed
    pub fn valid_tags(&self) -> Vec<Tag> {
        valid_tags(&self.rows.read())
    }
}

/// One tag batch, bound to the valid rows present when it was prepared
pub struct TagRun {
    api: Arc<dyn TagApi>,
    tags: Vec<Tag>,
}

impl TagRun {
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

#[async_trait]
impl ItemOperation for TagRun {
    /// Read, merge, then write back the full set
    async fn apply_one(&self, asset: &AssetRef) -> Result<()> {
        let resource_type = asset.asset_type.resource_type();

        let existing = self.api.get_resource_tags(resource_type, &asset.id).await?;
        let merged = merge_tags(&existing, &self.tags);
        self.api
            .update_resource_tags(resource_type, &asset.id, merged)
            .await
    }

    fn failure_fallback(&self) -> &str {
        "Failed to update tags"
    }
}

#[async_trait]
impl BulkAction for TagBatchApplier {
    type Run = TagRun;

    fn label(&self) -> &'static str {
        "tag"
    }

    fn policy(&self) -> CompletionPolicy {
        CompletionPolicy::always_close(self.close_delay)
    }

    fn prepare(&self, selected: &[AssetRef]) -> Result<TagRun> {
        let tags = self.valid_tags();
        if tags.is_empty() {
            return Err(PortalError::validation("Please add at least one valid tag"));
        }
        require_selection(selected)?;

        Ok(TagRun {
            api: self.api.clone(),
            tags,
        })
    }

    fn summarize(&self, _run: &TagRun, report: &BatchReport, notifier: &dyn Notifier) {
        let tagged = report.successes.len();
        let failed = report.errors.len();
        info!(tagged, failed, "Tag batch finished");

        if tagged > 0 {
            notifier.success(&format!("Tags applied to {}", pluralize(tagged, "asset")));
        }
        if failed > 0 {
            notifier.error(&format!("Failed to tag {}", pluralize(failed, "asset")));
        }
    }
}
