//! Domain value objects

use serde::{Deserialize, Serialize};

/// Whether automated backups are set up for an application.
///
/// "Not configured" is distinct from "configured but disabled": an app with
/// no backup configuration at all resolves to [`BackupEnablement::NotConfigured`],
/// never to an error. The two collapse to "not enabled" only at the
/// classification boundary via [`BackupEnablement::is_enabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackupEnablement {
    /// No backup configuration exists for the application
    NotConfigured,
    /// A configuration exists but backups are switched off
    Disabled,
    /// Backups are enabled
    Enabled,
}

impl BackupEnablement {
    /// Map the provider's optional enabled flag to the explicit tri-state.
    pub fn from_provider_flag(enabled: Option<bool>) -> Self {
        match enabled {
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
            None => Self::NotConfigured,
        }
    }

    /// Collapse the tri-state for classification and display.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl std::fmt::Display for BackupEnablement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "not configured"),
            Self::Disabled => write!(f, "disabled"),
            Self::Enabled => write!(f, "enabled"),
        }
    }
}

/// Terminal or in-progress state of one backup attempt.
///
/// Provider-defined values are carried opaquely; only `Succeeded` and
/// `Failed` have audit semantics, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptStatus {
    Succeeded,
    Failed,
    InProgress,
    /// Any other provider-defined status, preserved verbatim
    Other(String),
}

impl AttemptStatus {
    /// Parse a provider status string, matching the known states
    /// case-insensitively and keeping anything else verbatim.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("succeeded") {
            Self::Succeeded
        } else if raw.eq_ignore_ascii_case("failed") {
            Self::Failed
        } else if raw.eq_ignore_ascii_case("inprogress") {
            Self::InProgress
        } else {
            Self::Other(raw.to_string())
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_known_statuses_case_insensitively() {
        assert_eq!(AttemptStatus::parse("Succeeded"), AttemptStatus::Succeeded);
        assert_eq!(AttemptStatus::parse("SUCCEEDED"), AttemptStatus::Succeeded);
        assert_eq!(AttemptStatus::parse("failed"), AttemptStatus::Failed);
        assert_eq!(AttemptStatus::parse("InProgress"), AttemptStatus::InProgress);
    }

    #[test]
    fn parse_preserves_unknown_statuses() {
        let status = AttemptStatus::parse("PartiallySucceeded");
        assert_eq!(
            status,
            AttemptStatus::Other("PartiallySucceeded".to_string())
        );
        assert!(!status.is_succeeded());
        assert!(!status.is_failed());
        assert_eq!(status.to_string(), "PartiallySucceeded");
    }

    #[test]
    fn enablement_collapses_only_at_the_boundary() {
        assert!(BackupEnablement::Enabled.is_enabled());
        assert!(!BackupEnablement::Disabled.is_enabled());
        assert!(!BackupEnablement::NotConfigured.is_enabled());
        assert_ne!(BackupEnablement::Disabled, BackupEnablement::NotConfigured);
    }

    #[test]
    fn enablement_from_provider_flag() {
        assert_eq!(
            BackupEnablement::from_provider_flag(None),
            BackupEnablement::NotConfigured
        );
        assert_eq!(
            BackupEnablement::from_provider_flag(Some(false)),
            BackupEnablement::Disabled
        );
        assert_eq!(
            BackupEnablement::from_provider_flag(Some(true)),
            BackupEnablement::Enabled
        );
    }
}
