//! Core domain model for backup compliance auditing
//!
//! Pure business types with no I/O. Everything here is transient: entities
//! live only for the duration of one audit run.

pub mod entities;
pub mod value_objects;

pub use entities::{
    AppIdentity, AttemptHistory, AuditFinding, BackupAttempt, BackupConfiguration, Subscription,
};
pub use value_objects::{AttemptStatus, BackupEnablement};
