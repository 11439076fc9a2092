//! Batch processing for bulk asset actions
//!
//! A batch attempts one operation per selected asset, strictly in order, and
//! records each outcome on a shared [`BatchJob`].

mod job;
mod runner;
mod types;


pub use job::BatchJob;
pub use runner::{BatchRunner, ItemOperation, failure_message};
pub use types::{BatchProgress, BatchReport, BatchSnapshot, CompletionPolicy, JobState};
