//! Command-line interface for the audit job

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Custodia - backup compliance auditing for Azure App Service
#[derive(Parser, Debug)]
#[command(
    name = "custodia",
    version,
    about = "Audit the backup configuration of Azure App Service web apps",
    long_about = "Custodia resolves each configured subscription, enumerates its web apps, \
                  and reports on backup enablement, retention, and the freshness of the \
                  most recent successful backup. The audit is read-only."
)]
pub struct Cli {
    /// Subscription display names to audit (overrides configuration)
    #[arg(short, long = "subscription")]
    pub subscriptions: Vec<String>,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose diagnostics (forces debug-level logging)
    #[arg(long)]
    pub debug: bool,

    /// Skip unresolvable subscription names instead of halting the run
    #[arg(long)]
    pub skip_missing: bool,

    /// Exit with a non-zero status when compliance issues are found
    #[arg(long)]
    pub fail_on_issues: bool,

    /// Repeat the audit every N hours until interrupted
    #[arg(long)]
    pub interval_hours: Option<u64>,
}

impl Cli {
    /// Overlay command-line flags onto the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if !self.subscriptions.is_empty() {
            config.audit.subscriptions = self.subscriptions.clone();
        }
        if self.debug {
            config.audit.debug = true;
            config.logging.level = "debug".to_string();
        }
        if self.skip_missing {
            config.audit.continue_on_missing_subscription = true;
        }
        if self.interval_hours.is_some() {
            config.audit.interval_hours = self.interval_hours;
        }
    }
}

/// Exit codes for CI integration
pub mod exit_codes {
    /// Audit completed without issues (or issues are informational)
    pub const SUCCESS: i32 = 0;
    /// Audit completed and found issues (with --fail-on-issues)
    pub const ISSUES_FOUND: i32 = 1;
    /// Configuration or input error
    pub const CONFIG_ERROR: i32 = 2;
    /// Authentication or API failure aborted the audit
    pub const AUDIT_FAILED: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("custodia").chain(args.iter().copied()))
    }

    #[test]
    fn flags_overlay_the_configuration() {
        let mut config = Config::default();
        cli(&[
            "--subscription",
            "Ops",
            "--debug",
            "--skip-missing",
            "--interval-hours",
            "12",
        ])
        .apply_to(&mut config);

        assert_eq!(config.audit.subscriptions, vec!["Ops"]);
        assert!(config.audit.debug);
        assert_eq!(config.logging.level, "debug");
        assert!(config.audit.continue_on_missing_subscription);
        assert_eq!(config.audit.interval_hours, Some(12));
    }

    #[test]
    fn absent_flags_leave_the_configuration_alone() {
        let mut config = Config::default();
        cli(&[]).apply_to(&mut config);

        assert_eq!(
            config.audit.subscriptions,
            vec!["Contoso Production", "Contoso Staging"]
        );
        assert!(!config.audit.debug);
        assert_eq!(config.logging.level, "info");
        assert!(config.audit.interval_hours.is_none());
    }

    #[test]
    fn repeated_subscription_flags_accumulate() {
        let parsed = cli(&["-s", "Production", "-s", "Staging"]);
        assert_eq!(parsed.subscriptions, vec!["Production", "Staging"]);
    }
}
