//! API client traits and shared error type
//!
//! The audit talks to two collaborators: a subscription directory (resolve a
//! subscription by display name, list its web apps) and a backup provider
//! (per-app backup configuration and attempt history). Both are implemented
//! by [`AzureResourceClient`] against the Azure Resource Manager REST API;
//! tests substitute in-memory fakes.

mod azure;

pub use azure::AzureResourceClient;

use async_trait::async_trait;

use crate::domain::{AppIdentity, BackupAttempt, BackupConfiguration, Subscription};

/// Error from an external API collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Unexpected response shape: {0}")]
    Parse(String),
}

/// Resolve subscriptions and enumerate their hosted applications.
#[async_trait]
pub trait SubscriptionDirectory: Send + Sync {
    /// Look up a subscription by display name among those visible to the
    /// authenticated identity. `Ok(None)` means not visible.
    async fn resolve_subscription(&self, name: &str) -> Result<Option<Subscription>, ApiError>;

    /// List all web apps in the subscription. Empty is valid.
    async fn list_apps(&self, subscription: &Subscription) -> Result<Vec<AppIdentity>, ApiError>;
}

/// Read one application's backup configuration and attempt history.
#[async_trait]
pub trait BackupProvider: Send + Sync {
    /// Fetch the backup configuration. An app with no configuration at all
    /// yields [`BackupConfiguration::not_configured`], not an error.
    async fn backup_configuration(
        &self,
        subscription: &Subscription,
        app: &AppIdentity,
    ) -> Result<BackupConfiguration, ApiError>;

    /// List the known backup attempts for the app, in no particular order.
    async fn list_backup_attempts(
        &self,
        subscription: &Subscription,
        app: &AppIdentity,
    ) -> Result<Vec<BackupAttempt>, ApiError>;
}
