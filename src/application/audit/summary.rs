//! Run-scoped issue counters

use serde::Serialize;

use super::classifier::ComplianceSignal;

/// Aggregate counters for one audit run.
///
/// Counters only ever grow during a run. Stale-backup signals are warnings
/// and deliberately do not count as issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    /// Applications with no enabled backup configuration
    pub not_configured: usize,
    /// Applications whose most recent backup attempt failed
    pub failed_attempts: usize,
}

impl AuditSummary {
    /// Fold one application's classification result into the counters.
    pub fn absorb(&mut self, signals: &[ComplianceSignal]) {
        for signal in signals {
            match signal {
                ComplianceSignal::NotConfigured => self.not_configured += 1,
                ComplianceSignal::LastAttemptFailed => self.failed_attempts += 1,
                ComplianceSignal::StaleBackup => {}
            }
        }
    }

    pub fn total_issues(&self) -> usize {
        self.not_configured + self.failed_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_always_the_sum_of_both_counters() {
        let mut summary = AuditSummary::default();
        summary.absorb(&[
            ComplianceSignal::NotConfigured,
            ComplianceSignal::StaleBackup,
        ]);
        summary.absorb(&[
            ComplianceSignal::LastAttemptFailed,
            ComplianceSignal::StaleBackup,
        ]);
        summary.absorb(&[ComplianceSignal::NotConfigured]);

        assert_eq!(summary.not_configured, 2);
        assert_eq!(summary.failed_attempts, 1);
        assert_eq!(summary.total_issues(), 3);
    }

    #[test]
    fn stale_signals_do_not_count_as_issues() {
        let mut summary = AuditSummary::default();
        summary.absorb(&[ComplianceSignal::StaleBackup]);

        assert_eq!(summary.total_issues(), 0);
    }

    #[test]
    fn empty_run_reports_zero_issues() {
        assert_eq!(AuditSummary::default().total_issues(), 0);
    }
}
