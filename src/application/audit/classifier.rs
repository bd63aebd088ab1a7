//! Compliance classification for one audit finding
//!
//! Pure and I/O-free so every rule is unit-testable in isolation from the
//! provider clients.

use chrono::{DateTime, Duration, Local};

use crate::domain::AuditFinding;

/// One compliance outcome for one application.
///
/// Signals are independent; more than one may fire for the same application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceSignal {
    /// Backups are not enabled (covers both "disabled" and "never configured")
    NotConfigured,
    /// The most recent backup attempt ended in failure
    LastAttemptFailed,
    /// The most recent successful backup is older than the staleness window,
    /// or no successful backup exists at all
    StaleBackup,
}

/// Evaluate the compliance rules for one finding, in fixed order.
///
/// `now` is the evaluation instant in local time; `stale_after` is the
/// maximum acceptable age of the last successful backup.
pub fn classify(
    finding: &AuditFinding,
    now: DateTime<Local>,
    stale_after: Duration,
) -> Vec<ComplianceSignal> {
    let mut signals = Vec::new();

    if !finding.configuration.enablement.is_enabled() {
        signals.push(ComplianceSignal::NotConfigured);
    }

    if let Some(latest) = &finding.latest_attempt {
        if latest.status.is_failed() {
            signals.push(ComplianceSignal::LastAttemptFailed);
        }
    }

    // No successful backup at all counts as infinitely stale.
    let fresh = finding
        .latest_successful
        .as_ref()
        .and_then(|a| a.finished_at)
        .is_some_and(|finished| finished.with_timezone(&Local) >= now - stale_after);
    if !fresh {
        signals.push(ComplianceSignal::StaleBackup);
    }

    signals
}
