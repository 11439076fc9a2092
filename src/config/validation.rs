//! Configuration validation

use super::models::*;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Validate for ApiConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url has invalid URL format: {}", e))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "base_url must use http:// or https:// scheme, got: {}",
                    scheme
                ));
            }
        }

        if url.host_str().is_none() {
            return Err("base_url must have a valid host".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.connect_timeout_secs == 0 {
            return Err("connect_timeout_secs must be greater than 0".to_string());
        }

        if self.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            return Err("api_key must not be blank when set".to_string());
        }

        Ok(())
    }
}

impl Validate for BulkConfig {
    fn validate(&self) -> Result<(), String> {
        // milliseconds, capped at one hour
        const MAX_DELAY_MS: u64 = 60 * 60 * 1000;

        if self.folder_close_delay_ms > MAX_DELAY_MS {
            return Err("folder_close_delay_ms is unreasonably large".to_string());
        }
        if self.tag_close_delay_ms > MAX_DELAY_MS {
            return Err("tag_close_delay_ms is unreasonably large".to_string());
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "unknown log level '{}', expected one of {:?}",
                self.level, LOG_LEVELS
            ));
        }
        Ok(())
    }
}
