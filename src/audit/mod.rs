//! Audit logging for billcover
//!
//! Records every add, modify and delete made through the editor with
//! before/after values in an append-only JSON-lines log.
//!
//! # Example
//!
//! ```rust,ignore
//! use billcover::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(EntityType::Expense, "expense-3", Some("Amex".into()), &expense);
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
