//! Bulk actions over a multi-selection of assets
//!
//! Each action validates its inputs and freezes them into a per-batch
//! [`ItemOperation`](crate::core::batch::ItemOperation), and carries a
//! completion policy and a summary. A
//! [`BulkDialog`] hosts one action and exposes the open / close / complete
//! contract the asset list page relies on.

mod action;
mod dialog;
mod folder;
mod tags;

pub use action::{BulkAction, require_selection};
pub use dialog::{BulkDialog, DialogCallback, DialogHandle, DialogOutcome};
pub use folder::FolderBatchApplier;
pub use tags::TagBatchApplier;
