//! Configuration validation module

use crate::config::{AuditConfig, AzureConfig, LoggingConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Azure configuration error: {message}")]
    Azure { message: String },

    #[error("Audit configuration error: {message}")]
    Audit { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },
}

impl ValidationError {
    pub fn azure(message: impl Into<String>) -> Self {
        Self::Azure {
            message: message.into(),
        }
    }

    pub fn audit(message: impl Into<String>) -> Self {
        Self::Audit {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl Validate for AzureConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.tenant_id.is_empty() {
            return Err(ValidationError::azure("Tenant id must be set"));
        }
        if self.client_id.is_empty() {
            return Err(ValidationError::azure("Client id must be set"));
        }
        if self.client_secret.is_empty() {
            return Err(ValidationError::azure("Client secret must be set"));
        }
        if self.timeout_seconds == 0 {
            return Err(ValidationError::azure(
                "Request timeout must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Validate for AuditConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.stale_after_days == 0 {
            return Err(ValidationError::audit(
                "Staleness window must be at least 1 day",
            ));
        }
        if self.interval_hours == Some(0) {
            return Err(ValidationError::audit(
                "Audit interval must be at least 1 hour",
            ));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ValidationError::logging(format!(
                "Unknown log format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}
