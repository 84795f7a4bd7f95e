//! billcover - half-month bill coverage planner
//!
//! This library keeps a flat list of upcoming bills and account balances,
//! reads and writes them as CSV, and computes how much money to move from
//! savings to checking so that the bills due in the current half of the
//! month are covered with a safety margin.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, dates, expenses, income)
//! - `storage`: In-memory record store and CSV import/export
//! - `services`: Transfer calculation and record editing
//! - `audit`: Audit logging of edits
//! - `display`: Tables and the transfer report
//! - `cli`: Interactive session and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use billcover::config::Settings;
//! use billcover::services::calculate_transfer;
//! use billcover::storage::read_records;
//!
//! let store = read_records("expense_income_data.csv")?;
//! let report = calculate_transfer(
//!     store.expenses(),
//!     store.income(),
//!     chrono::Local::now().date_naive(),
//!     &Settings::default().transfer_config(),
//! );
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::BillcoverError;
