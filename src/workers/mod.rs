//! Periodic scheduling for recurring audit runs
//!
//! Single-shot mode keeps the fatal-error semantics of the audit itself; in
//! periodic mode a failed cycle is logged and the schedule keeps going.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::application::audit::AuditRunner;
use crate::application::reporting::ReportSink;
use crate::infrastructure::api_clients::{BackupProvider, SubscriptionDirectory};

/// Run the audit immediately, then on every interval tick, until cancelled.
pub async fn run_periodic<D, P>(
    runner: &AuditRunner<D, P>,
    sink: &dyn ReportSink,
    interval_hours: u64,
    shutdown: CancellationToken,
) where
    D: SubscriptionDirectory,
    P: BackupProvider,
{
    info!(interval_hours, "Audit scheduler started");

    // The first tick completes immediately, giving one run on startup.
    let mut interval = tokio::time::interval(Duration::from_secs(interval_hours * 3600));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                info!("Starting scheduled audit run");
                if let Err(e) = runner.run(sink).await {
                    error!(error = %e, "Scheduled audit run failed");
                }
            }
            _ = shutdown.cancelled() => {
                info!("Audit scheduler shutting down");
                break;
            }
        }
    }
}
