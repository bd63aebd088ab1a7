//! Audit orchestration
//!
//! Walks the configured subscriptions sequentially, assesses one application
//! at a time, and folds the per-application classification results into the
//! run summary. Strict at the subscription granularity, lenient at the
//! application granularity: a bad subscription name halts the run (unless the
//! skip policy is enabled), while a per-app fetch problem degrades to "no
//! data" and the loop moves on.

use std::sync::Arc;

use chrono::{Duration, Local};
use tracing::{info, warn};

use super::classifier::{classify, ComplianceSignal};
use super::summary::AuditSummary;
use crate::application::errors::AuditError;
use crate::application::reporting::{detail_line, render_report, stale_line, Report, ReportSink};
use crate::domain::{
    AppIdentity, AttemptHistory, AuditFinding, BackupConfiguration, Subscription,
};
use crate::infrastructure::api_clients::{BackupProvider, SubscriptionDirectory};

/// Per-run settings for the auditor.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Subscription display names to audit, in order
    pub subscriptions: Vec<String>,
    /// Maximum acceptable age of the last successful backup, in days
    pub stale_after_days: u32,
    /// Skip unresolvable subscription names instead of halting the run
    pub continue_on_missing_subscription: bool,
}

/// Result of one completed audit run.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub summary: AuditSummary,
    pub report: Report,
    pub apps_audited: usize,
}

/// The backup compliance auditor.
pub struct AuditRunner<D, P> {
    directory: Arc<D>,
    provider: Arc<P>,
    options: AuditOptions,
}

impl<D, P> AuditRunner<D, P>
where
    D: SubscriptionDirectory,
    P: BackupProvider,
{
    pub fn new(directory: Arc<D>, provider: Arc<P>, options: AuditOptions) -> Self {
        Self {
            directory,
            provider,
            options,
        }
    }

    /// Run one full audit pass over every configured subscription.
    pub async fn run(&self, sink: &dyn ReportSink) -> Result<AuditOutcome, AuditError> {
        let stale_after = Duration::days(i64::from(self.options.stale_after_days));
        let mut summary = AuditSummary::default();
        let mut apps_audited = 0;

        for name in &self.options.subscriptions {
            let Some(subscription) = self.directory.resolve_subscription(name).await? else {
                if self.options.continue_on_missing_subscription {
                    warn!(subscription = %name, "Subscription not visible, skipping");
                    sink.line(&format!(
                        "Skipping subscription '{}': not visible to the authenticated identity",
                        name
                    ));
                    continue;
                }
                return Err(AuditError::SubscriptionNotVisible(name.clone()));
            };

            info!(
                subscription = %subscription.name,
                id = %subscription.id,
                "Auditing subscription"
            );

            let apps = self
                .directory
                .list_apps(&subscription)
                .await
                .map_err(|source| AuditError::Enumeration {
                    subscription: subscription.name.clone(),
                    source,
                })?;

            for app in apps {
                let finding = self.assess(&subscription, &app).await;
                let signals = classify(&finding, Local::now(), stale_after);

                self.emit_signals(&finding, &signals, sink);
                summary.absorb(&signals);
                sink.line(&detail_line(&finding));
                apps_audited += 1;
            }
        }

        let report = render_report(&summary);
        sink.deliver(&report);

        info!(
            apps = apps_audited,
            not_configured = summary.not_configured,
            failed = summary.failed_attempts,
            "Audit run complete"
        );

        Ok(AuditOutcome {
            summary,
            report,
            apps_audited,
        })
    }

    /// Gather one application's backup state. Never fails: per-app fetch
    /// problems degrade to "not configured" / "no attempts known".
    async fn assess(&self, subscription: &Subscription, app: &AppIdentity) -> AuditFinding {
        let configuration = match self.provider.backup_configuration(subscription, app).await {
            Ok(configuration) => configuration,
            Err(e) => {
                warn!(app = %app, error = %e, "Failed to fetch backup configuration, treating as not configured");
                BackupConfiguration::not_configured()
            }
        };

        let attempts = match self.provider.list_backup_attempts(subscription, app).await {
            Ok(attempts) => attempts,
            Err(e) => {
                warn!(app = %app, error = %e, "Failed to fetch backup history, treating as no known attempts");
                Vec::new()
            }
        };

        let history = AttemptHistory::new(attempts);
        AuditFinding {
            latest_attempt: history.latest().cloned(),
            latest_successful: history.latest_successful().cloned(),
            subscription: subscription.clone(),
            app: app.clone(),
            configuration,
        }
    }

    fn emit_signals(
        &self,
        finding: &AuditFinding,
        signals: &[ComplianceSignal],
        sink: &dyn ReportSink,
    ) {
        for signal in signals {
            match signal {
                ComplianceSignal::NotConfigured => sink.line(&format!(
                    "Backup not configured for app {} (subscription {})",
                    finding.app, finding.subscription.name
                )),
                ComplianceSignal::LastAttemptFailed => sink.line(&format!(
                    "Last backup attempt failed for app {} (subscription {})",
                    finding.app, finding.subscription.name
                )),
                ComplianceSignal::StaleBackup => sink.line(&stale_line(
                    finding,
                    finding.latest_successful.as_ref().and_then(|a| a.finished_at),
                )),
            }
        }
    }
}
