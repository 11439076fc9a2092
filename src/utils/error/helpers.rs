//! Helper functions for creating and inspecting errors

use super::types::PortalError;

impl PortalError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn access_denied<S: Into<String>>(message: S) -> Self {
        Self::AccessDenied(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// The bare message without the category prefix.
    ///
    /// Batch reports render failures as `"<asset name>: <detail>"`, so this
    /// must not repeat the variant's label.
    pub fn detail(&self) -> String {
        match self {
            Self::Config(msg)
            | Self::Validation(msg)
            | Self::Auth(msg)
            | Self::AccessDenied(msg)
            | Self::NotFound(msg)
            | Self::RateLimit(msg)
            | Self::Timeout(msg)
            | Self::Network(msg)
            | Self::Conflict(msg)
            | Self::Internal(msg) => msg.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::HttpClient(e) => e.to_string(),
            Self::Serialization(e) => e.to_string(),
            Self::Yaml(e) => e.to_string(),
            Self::Io(e) => e.to_string(),
        }
    }

    /// Whether a later attempt of the same call could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Network(_) | Self::RateLimit(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::HttpClient(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Whether the error was raised before any call left the process
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
