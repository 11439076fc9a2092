//! # BI Portal
//!
//! Core of an administrative portal for BI assets hosted by a cloud BI
//! service: dashboards, analyses, datasets and datasources.
//!
//! ## Features
//!
//! - **Bulk actions**: add a selection of assets to a shared folder, or merge
//!   tags into each selected asset, one sequential call per asset
//! - **Progress tracking**: an explicit `Idle -> Running -> Completed` job with
//!   live snapshots
//! - **Dialog contract**: open / close / complete callbacks with per-action
//!   auto-close policies
//! - **Catalog helpers**: search, tag filters, pagination and field metadata
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bi_portal::{BulkDialog, FolderBatchApplier, HttpPortalClient, PortalConfig};
//! use bi_portal::core::notify::TracingNotifier;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PortalConfig::load(None).await?;
//!     let client = Arc::new(HttpPortalClient::new(&config.api)?);
//!
//!     let applier = FolderBatchApplier::new(client, config.bulk.folder_close_delay());
//!     let dialog = BulkDialog::new(applier, Arc::new(TracingNotifier))
//!         .on_complete(|| println!("refresh the list"));
//!
//!     dialog.open(vec!["dashboard:d-1:Sales".parse()?]).await?;
//!     dialog.action().select_folder("f-1");
//!     let outcome = dialog.submit().await?;
//!     println!("{:?}", outcome.report());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod clients;
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use clients::{AssetApi, FolderApi, FolderMember, HttpPortalClient, TagApi};
pub use config::PortalConfig;
pub use core::batch::{
    BatchJob, BatchProgress, BatchReport, BatchRunner, CompletionPolicy, JobState,
};
pub use core::bulk::{
    BulkAction, BulkDialog, DialogHandle, DialogOutcome, FolderBatchApplier, TagBatchApplier,
};
pub use utils::error::{PortalError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
