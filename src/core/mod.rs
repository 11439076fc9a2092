//! Core functionality for the portal
//!
//! Asset and tag types, the batch primitive, the bulk actions built on it,
//! and the list-page helpers.

pub mod assets;
pub mod batch;
pub mod bulk;
pub mod catalog;
pub mod metadata;
pub mod notify;

// Re-export commonly used types
pub use assets::{AssetRef, AssetType, Folder, SharingModel, Tag};
pub use notify::{Notifier, Severity};
