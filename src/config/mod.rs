//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub azure: AzureConfig,
    pub audit: AuditConfig,
    pub logging: LoggingConfig,
}

/// Azure AD and Resource Manager endpoints plus the service principal
/// credential used for the client-credentials token exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    pub authority: String,
    pub management_url: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    /// Timeout for individual requests (in seconds)
    pub timeout_seconds: u64,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            authority: "https://login.microsoftonline.com".to_string(),
            management_url: "https://management.azure.com".to_string(),
            tenant_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            timeout_seconds: 30,
        }
    }
}

/// Audit run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Subscription display names to audit
    pub subscriptions: Vec<String>,
    /// Maximum acceptable age of the last successful backup, in days
    pub stale_after_days: u32,
    /// Skip unresolvable subscription names instead of halting the run
    pub continue_on_missing_subscription: bool,
    /// Reserved for verbose diagnostics; forces debug-level logging
    pub debug: bool,
    /// Repeat the audit on this interval instead of running once
    pub interval_hours: Option<u64>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            subscriptions: vec![
                "Contoso Production".to_string(),
                "Contoso Staging".to_string(),
            ],
            stale_after_days: 5,
            continue_on_missing_subscription: false,
            debug: false,
            interval_hours: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.azure.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Layering, lowest priority first: `config/default`, `config/{ENV}`,
    /// `config/local`, `CUSTODIA__*` environment variables, then an explicit
    /// file when one is given.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CUSTODIA").separator("__"));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path));
        }

        let config: Config = builder.build()?.try_deserialize()?;

        // Validate the loaded configuration
        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
