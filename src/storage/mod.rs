//! Storage layer for billcover
//!
//! An in-memory record store for the session, plus the CSV adapter that
//! loads it from and saves it to the bill file with atomic writes.

pub mod csv_file;
pub mod file_io;
pub mod records;

pub use csv_file::{read_records, read_records_from, write_records, write_records_to};
pub use file_io::write_atomic;
pub use records::{RecordStore, UpsertOutcome};
