//! CLI command handlers
//!
//! This module contains the interactive session and the one-shot commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod console;
pub mod report;
pub mod session;

pub use audit::handle_audit_command;
pub use console::Console;
pub use report::{build_report, handle_list_command, handle_report_command};
pub use session::{MenuExit, Session, SessionOutcome};
