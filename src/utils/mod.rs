//! Utility modules for the portal
//!
//! - **error**: the crate-wide error type
//! - **logging**: subscriber setup for the binary

pub mod error;
pub mod logging;

pub use error::{PortalError, Result};

/// Percent of `done` over `total`, 0 when there is nothing to do
pub fn percent_of(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    done as f64 / total as f64 * 100.0
}

/// Format a count with a singular or plural noun
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
