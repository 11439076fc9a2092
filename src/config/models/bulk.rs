//! Bulk operation configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timings for the bulk-action dialogs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Auto-close delay after a folder batch with no failures
    #[serde(default = "default_folder_close_delay_ms")]
    pub folder_close_delay_ms: u64,
    /// Auto-close delay after any tag batch
    #[serde(default = "default_tag_close_delay_ms")]
    pub tag_close_delay_ms: u64,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            folder_close_delay_ms: default_folder_close_delay_ms(),
            tag_close_delay_ms: default_tag_close_delay_ms(),
        }
    }
}

impl BulkConfig {
    pub fn folder_close_delay(&self) -> Duration {
        Duration::from_millis(self.folder_close_delay_ms)
    }

    pub fn tag_close_delay(&self) -> Duration {
        Duration::from_millis(self.tag_close_delay_ms)
    }
}
