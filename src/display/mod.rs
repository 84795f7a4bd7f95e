//! Display formatting for terminal output

pub mod records;
pub mod report;

pub use records::{format_expense_table, format_income_table, format_suggestions};
pub use report::render_transfer_report;
