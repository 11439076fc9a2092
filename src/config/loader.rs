//! Environment overrides
//!
//! Every setting can be overridden from the environment:
//!
//! | Variable | Field |
//! |---|---|
//! | `PORTAL_API_BASE_URL` | `api.base_url` |
//! | `PORTAL_API_KEY` | `api.api_key` |
//! | `PORTAL_API_TIMEOUT_SECS` | `api.timeout_secs` |
//! | `PORTAL_FOLDER_CLOSE_DELAY_MS` | `bulk.folder_close_delay_ms` |
//! | `PORTAL_TAG_CLOSE_DELAY_MS` | `bulk.tag_close_delay_ms` |
//! | `PORTAL_LOG_LEVEL` | `logging.level` |
//! | `PORTAL_LOG_JSON` | `logging.json` |

use super::PortalConfig;
use crate::utils::error::{PortalError, Result};
use std::str::FromStr;
use tracing::debug;

impl PortalConfig {
    /// Apply overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("PORTAL_API_BASE_URL") {
            self.api.base_url = base_url;
        }
        if let Some(api_key) = lookup("PORTAL_API_KEY") {
            self.api.api_key = Some(api_key);
        }
        if let Some(timeout) = lookup("PORTAL_API_TIMEOUT_SECS") {
            self.api.timeout_secs = parse_var("PORTAL_API_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(delay) = lookup("PORTAL_FOLDER_CLOSE_DELAY_MS") {
            self.bulk.folder_close_delay_ms = parse_var("PORTAL_FOLDER_CLOSE_DELAY_MS", &delay)?;
        }
        if let Some(delay) = lookup("PORTAL_TAG_CLOSE_DELAY_MS") {
            self.bulk.tag_close_delay_ms = parse_var("PORTAL_TAG_CLOSE_DELAY_MS", &delay)?;
        }
        if let Some(level) = lookup("PORTAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("PORTAL_LOG_JSON") {
            self.logging.json = parse_var("PORTAL_LOG_JSON", &json)?;
        }

        debug!("Applied environment overrides");
        Ok(())
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| PortalError::config(format!("Invalid {}: {}", key, e)))
}
