//! Domain entities for one audit run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{AttemptStatus, BackupEnablement};

/// An Azure subscription resolved by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Human-readable display name
    pub name: String,
    /// Unique subscription id
    pub id: String,
}

/// A hosted web application, unique within its subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdentity {
    pub resource_group: String,
    pub name: String,
}

impl std::fmt::Display for AppIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.resource_group, self.name)
    }
}

/// Backup settings held by the provider for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupConfiguration {
    pub enablement: BackupEnablement,
    /// Days a backup image is kept; None when no configuration exists
    pub retention_days: Option<u32>,
}

impl BackupConfiguration {
    /// The normal "no backup set up" state.
    pub fn not_configured() -> Self {
        Self {
            enablement: BackupEnablement::NotConfigured,
            retention_days: None,
        }
    }
}

/// One historical execution of the backup process for an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupAttempt {
    /// When the attempt started
    pub created_at: DateTime<Utc>,
    /// When the attempt finished; None while running or when aborted
    pub finished_at: Option<DateTime<Utc>>,
    pub status: AttemptStatus,
}

/// The set of known backup attempts for one application.
///
/// The audit only ever needs two selections from the set: the most recent
/// attempt overall and the most recent successful attempt.
#[derive(Debug, Clone, Default)]
pub struct AttemptHistory {
    attempts: Vec<BackupAttempt>,
}

impl AttemptHistory {
    pub fn new(attempts: Vec<BackupAttempt>) -> Self {
        Self { attempts }
    }

    /// The attempt with the greatest `created_at`, regardless of status.
    /// Ties go to the first encountered.
    pub fn latest(&self) -> Option<&BackupAttempt> {
        self.attempts
            .iter()
            .reduce(|best, a| if a.created_at > best.created_at { a } else { best })
    }

    /// Among attempts with status `Succeeded`, the one with the greatest
    /// `finished_at`. Attempts without a finish timestamp sort lowest.
    pub fn latest_successful(&self) -> Option<&BackupAttempt> {
        self.attempts
            .iter()
            .filter(|a| a.status.is_succeeded())
            .reduce(|best, a| if a.finished_at > best.finished_at { a } else { best })
    }
}

/// Everything the audit derives about one application in one run.
///
/// Never persisted; exists only to be classified, printed, and folded into
/// the run summary.
#[derive(Debug, Clone)]
pub struct AuditFinding {
    pub subscription: Subscription,
    pub app: AppIdentity,
    pub configuration: BackupConfiguration,
    pub latest_attempt: Option<BackupAttempt>,
    pub latest_successful: Option<BackupAttempt>,
}
