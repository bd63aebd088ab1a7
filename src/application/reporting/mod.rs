//! Report rendering and delivery
//!
//! The audit emits a line-oriented text stream (signal lines and one detail
//! line per application) plus a final subject/body pair. Delivery mechanics
//! are behind [`ReportSink`]; the shipped sink writes to stdout, leaving
//! email or ticket forwarding to the surrounding automation.

use chrono::{DateTime, Utc};

use crate::application::audit::AuditSummary;
use crate::domain::AuditFinding;

/// Final report handed to the delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub subject: String,
    pub body: String,
}

/// Destination for audit output lines and the final report.
pub trait ReportSink: Send + Sync {
    /// Emit one status or detail line.
    fn line(&self, line: &str);

    /// Hand over the final report.
    fn deliver(&self, report: &Report);
}

/// Sink that prints to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn line(&self, line: &str) {
        println!("{}", line);
    }

    fn deliver(&self, report: &Report) {
        println!("{}", report.subject);
        println!("{}", report.body);
    }
}

/// Render the final report from the run counters.
pub fn render_report(summary: &AuditSummary) -> Report {
    let total = summary.total_issues();
    let subject = format!("Backup compliance audit: {} issue(s) found", total);

    let body = if total == 0 {
        "No backup compliance issues found.".to_string()
    } else {
        format!(
            "Apps without an enabled backup configuration: {}\n\
             Apps whose last backup attempt failed: {}\n\
             Total issues: {}",
            summary.not_configured, summary.failed_attempts, total
        )
    };

    Report { subject, body }
}

/// The unconditional per-application detail line.
///
/// Field set is stable for downstream log scraping: subscription name and id,
/// app identity, last-attempt start/finish/status, retention, enabled flag.
pub fn detail_line(finding: &AuditFinding) -> String {
    let latest = finding.latest_attempt.as_ref();
    format!(
        "{} ({}) {}: last attempt started={} finished={} status={} retention_days={} enabled={}",
        finding.subscription.name,
        finding.subscription.id,
        finding.app,
        latest.map_or_else(|| "none".to_string(), |a| a.created_at.to_rfc3339()),
        latest
            .and_then(|a| a.finished_at)
            .map_or_else(|| "none".to_string(), |t| t.to_rfc3339()),
        latest.map_or_else(|| "none".to_string(), |a| a.status.to_string()),
        finding
            .configuration
            .retention_days
            .map_or_else(|| "none".to_string(), |d| d.to_string()),
        finding.configuration.enablement.is_enabled(),
    )
}

/// Warning line for a stale (or absent) successful backup.
pub fn stale_line(finding: &AuditFinding, last_success: Option<DateTime<Utc>>) -> String {
    format!(
        "No recent successful backup for app {} (subscription {}): last success {}",
        finding.app,
        finding.subscription.name,
        last_success.map_or_else(|| "never".to_string(), |t| t.to_rfc3339()),
    )
}
