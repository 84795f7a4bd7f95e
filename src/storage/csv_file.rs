//! CSV import/export for the bill file
//!
//! The file has one header row (`Type,Payee,Bank,Amount,Due Date,Balance Date`)
//! and one row per expense or income entry. Unused columns for a row's kind
//! are left blank.

use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Writer};
use serde::Deserialize;

use crate::error::{BillcoverError, BillcoverResult};
use crate::models::{format_date, parse_date, Expense, IncomeEntry, Money};

use super::file_io::write_atomic;
use super::records::RecordStore;

/// Column headers, in file order
pub const HEADERS: [&str; 6] = ["Type", "Payee", "Bank", "Amount", "Due Date", "Balance Date"];

pub const EXPENSE_KIND: &str = "Expense";
pub const INCOME_KIND: &str = "Income";

/// One data row as read from the file; absent columns read as `None`
#[derive(Debug, Default, Deserialize)]
struct RawRow {
    #[serde(rename = "Type", default)]
    kind: Option<String>,
    #[serde(rename = "Payee", default)]
    payee: Option<String>,
    #[serde(rename = "Bank", default)]
    bank: Option<String>,
    #[serde(rename = "Amount", default)]
    amount: Option<String>,
    #[serde(rename = "Due Date", default)]
    due_date: Option<String>,
    #[serde(rename = "Balance Date", default)]
    balance_date: Option<String>,
}

/// A row after its kind has been recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRow {
    Expense(Expense),
    Income(IncomeEntry),
    /// A non-blank `Type` other than Expense or Income
    Skipped { row: usize, kind: String },
}

/// Fetch a required, non-blank field
fn required<'a>(value: &'a Option<String>, column: &str, row: usize) -> BillcoverResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BillcoverError::malformed_row(row, format!("missing {}", column)))
}

impl RawRow {
    fn into_parsed(self, row: usize) -> BillcoverResult<ParsedRow> {
        let kind = required(&self.kind, "Type", row)?;

        match kind {
            EXPENSE_KIND => {
                let payee = required(&self.payee, "Payee", row)?;
                let amount = Money::parse(required(&self.amount, "Amount", row)?)?;
                let due_date = parse_date(required(&self.due_date, "Due Date", row)?)?;
                Ok(ParsedRow::Expense(Expense::new(payee, amount, due_date)))
            }
            INCOME_KIND => {
                let bank = required(&self.bank, "Bank", row)?;
                let amount = Money::parse(required(&self.amount, "Amount", row)?)?;
                let as_of = parse_date(required(&self.balance_date, "Balance Date", row)?)?;
                Ok(ParsedRow::Income(IncomeEntry::new(bank, amount, as_of)))
            }
            other => Ok(ParsedRow::Skipped {
                row,
                kind: other.to_string(),
            }),
        }
    }
}

/// Parse records from any reader
///
/// Fails on the first bad row; no partial store is returned.
pub fn read_records_from<R: Read>(reader: R) -> BillcoverResult<RecordStore> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut store = RecordStore::new();

    for (idx, result) in csv_reader.deserialize::<RawRow>().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(|e| BillcoverError::malformed_row(row, e.to_string()))?;

        match raw.into_parsed(row)? {
            ParsedRow::Expense(expense) => store.push_expense(expense),
            ParsedRow::Income(entry) => {
                store.upsert_income(entry);
            }
            ParsedRow::Skipped { row, kind } => {
                tracing::warn!(row, kind = %kind, "skipping row with unrecognised type");
            }
        }
    }

    Ok(store)
}

/// Import a bill file from disk
pub fn read_records<P: AsRef<Path>>(path: P) -> BillcoverResult<RecordStore> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BillcoverError::file_not_found(path.display().to_string()));
    }

    let file = std::fs::File::open(path)
        .map_err(|e| BillcoverError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let store = read_records_from(file)?;
    tracing::info!(
        path = %path.display(),
        expenses = store.expenses().len(),
        income = store.income().len(),
        "imported records"
    );
    Ok(store)
}

/// Serialize records to any writer
pub fn write_records_to<W: Write>(writer: W, store: &RecordStore) -> BillcoverResult<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for expense in store.expenses() {
        csv_writer.write_record([
            EXPENSE_KIND,
            expense.payee.as_str(),
            "",
            expense.amount.to_plain_string().as_str(),
            format_date(expense.due_date).as_str(),
            "",
        ])?;
    }

    for entry in store.income() {
        csv_writer.write_record([
            INCOME_KIND,
            "",
            entry.source.as_str(),
            entry.amount.to_plain_string().as_str(),
            "",
            format_date(entry.as_of_date).as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export records to disk, fully replacing the target file
pub fn write_records<P: AsRef<Path>>(path: P, store: &RecordStore) -> BillcoverResult<()> {
    let path = path.as_ref();
    write_atomic(path, |writer| write_records_to(writer, store))?;
    tracing::info!(path = %path.display(), "saved records");
    Ok(())
}
