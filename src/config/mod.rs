//! Configuration management for the portal
//!
//! This module handles loading, validation, and management of portal configuration.
//! Sources are layered: YAML file, then `.env`, then process environment.

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/portal.yaml";

/// Main configuration struct for the portal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    /// BI service API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Bulk dialog timings
    #[serde(default)]
    pub bulk: BulkConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PortalConfig {
    /// Load and validate configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path.as_ref()).await?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from a YAML string without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| PortalError::config(format!("Failed to parse config: {}", e)))
    }

    /// Resolve configuration the way the binary does.
    ///
    /// An explicit path must exist. Without one, the default path is used when
    /// present, otherwise defaults. `.env` is read first and environment
    /// overrides are applied last.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        if let Ok(env_path) = dotenvy::dotenv() {
            debug!("Loaded environment from {:?}", env_path);
        }
        Self::load_with(path, |key| std::env::var(key).ok()).await
    }

    /// [`load`](Self::load) with overrides read through `lookup`. Validation
    /// runs once, after the overrides.
    pub async fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::read_file(path).await?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::read_file(Path::new(DEFAULT_CONFIG_PATH)).await?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    async fn read_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PortalError::config(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml(&content)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.api
            .validate()
            .map_err(|e| PortalError::config(format!("API config error: {}", e)))?;

        self.bulk
            .validate()
            .map_err(|e| PortalError::config(format!("Bulk config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| PortalError::config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PortalError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
