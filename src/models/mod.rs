//! Core data models for billcover
//!
//! Expenses, income/balance entries, money, dates and half-month windows.

pub mod date;
pub mod expense;
pub mod income;
pub mod money;
pub mod period;
pub mod selection;

pub use date::{format_date, parse_date};
pub use expense::{Expense, ExpenseUpdate};
pub use income::{IncomeEntry, IncomeUpdate};
pub use money::Money;
pub use period::{HalfMonth, HalfMonthWindow};
pub use selection::{pick_label, Selection};
