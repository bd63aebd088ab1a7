//! Custodia - Backup compliance auditing for Azure App Service
//!
//! Custodia walks a configured set of Azure subscriptions, enumerates their
//! App Service web applications, and reports on the health of each app's
//! automated backup setup: whether backups are enabled, the configured
//! retention window, and the timing and status of recent backup attempts.
//! It is a read-only compliance signal for operations teams, not a
//! monitoring or remediation system.
//!
//! # Modules
//!
//! - [`config`] — Strongly-typed configuration with TOML and environment variable support
//! - [`domain`] — Core domain entities and value objects
//! - [`application`] — Audit orchestration, classification, and reporting
//! - [`infrastructure`] — Azure AD authentication and Resource Manager API client
//! - [`workers`] — Periodic scheduling for recurring audit runs
//!
//! # Configuration
//!
//! Environment variables use the `CUSTODIA__` prefix with double underscore
//! separators:
//!
//! ```bash
//! CUSTODIA__AZURE__TENANT_ID=...
//! CUSTODIA__AUDIT__STALE_AFTER_DAYS=5
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod workers;

pub use config::Config;
pub use logging::init_tracing;
