//! Configuration data models
//!
//! This module defines all configuration structures used by the portal.

#![allow(missing_docs)]

pub mod api;
pub mod bulk;
pub mod logging;

pub use api::*;
pub use bulk::*;
pub use logging::*;

/// Default API base URL
pub fn default_base_url() -> String {
    "http://localhost:4000/api".to_string()
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default connect timeout in seconds
pub fn default_connect_timeout() -> u64 {
    10
}

/// Delay before a cleanly finished folder batch closes its dialog
pub fn default_folder_close_delay_ms() -> u64 {
    2000
}

/// Delay before a finished tag batch closes its dialog
pub fn default_tag_close_delay_ms() -> u64 {
    1500
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
