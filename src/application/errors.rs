//! Application error taxonomy
//!
//! Fatal errors halt the run: authentication failures, an unresolvable
//! subscription name, and enumeration failures. Per-application conditions
//! (missing configuration, unreadable attempt history) are handled leniently
//! inside the audit loop and never surface here.

use crate::infrastructure::api_clients::ApiError;

/// Run-aborting audit failure.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Subscription '{0}' is not visible to the authenticated identity")]
    SubscriptionNotVisible(String),

    #[error("Failed to enumerate web apps in subscription '{subscription}': {source}")]
    Enumeration {
        subscription: String,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}
