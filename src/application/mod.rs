//! Application services: audit orchestration, classification, and reporting

pub mod audit;
pub mod errors;
pub mod reporting;

pub use audit::{AuditOptions, AuditOutcome, AuditRunner, AuditSummary, ComplianceSignal};
pub use errors::AuditError;
pub use reporting::{ConsoleSink, Report, ReportSink};
