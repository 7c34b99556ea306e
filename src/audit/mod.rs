//! Audit logging for selavu
//!
//! Every create, update and delete performed through a service is appended
//! to `audit.log` as one JSON object per line, together with the user who
//! made the change and the before/after state of the record.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends and reads entries
//! - `generate_diff`: field-level summary of an update

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
