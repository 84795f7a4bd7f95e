//! Non-interactive report and listing commands

use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::config::Settings;
use crate::display::{format_expense_table, format_income_table, render_transfer_report};
use crate::error::BillcoverResult;
use crate::models::parse_date;
use crate::services::{calculate_transfer, TransferReport};
use crate::storage::read_records;

/// Import a file and compute its transfer report without saving anything
///
/// `date` overrides the reference date, which defaults to today.
pub fn build_report(
    settings: &Settings,
    file: &Path,
    date: Option<&str>,
) -> BillcoverResult<TransferReport> {
    let today: NaiveDate = match date {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };

    let store = read_records(file)?;
    tracing::debug!(
        expenses = store.expenses().len(),
        income = store.income().len(),
        %today,
        "computing transfer report"
    );

    Ok(calculate_transfer(
        store.expenses(),
        store.income(),
        today,
        &settings.transfer_config(),
    ))
}

/// Handle `billcover report`
pub fn handle_report_command(
    settings: &Settings,
    file: &Path,
    date: Option<&str>,
    json: bool,
) -> BillcoverResult<()> {
    let report = build_report(settings, file, date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_transfer_report(&report));
    }

    Ok(())
}

/// Handle `billcover list`
pub fn handle_list_command(file: &Path) -> BillcoverResult<()> {
    let store = read_records(file)?;

    println!("Expenses");
    println!("{}", format_expense_table(store.expenses()));
    println!();
    println!("Income");
    println!("{}", format_income_table(store.income()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BillcoverError;
    use crate::models::Money;
    use tempfile::TempDir;

    fn write_bills(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("bills.csv");
        std::fs::write(
            &path,
            "Type,Payee,Bank,Amount,Due Date,Balance Date\n\
             Expense,Amex,,500.00,2026-02-12,\n\
             Income,,SCCU Checking,1000.00,,2026-02-09\n\
             Income,,E-Trade Savings,5000.00,,2026-02-09\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_build_report_with_explicit_date() {
        let dir = TempDir::new().unwrap();
        let path = write_bills(&dir);

        let report = build_report(&Settings::default(), &path, Some("2026-02-10")).unwrap();

        assert_eq!(report.total_due, Money::from_dollars(500));
        assert_eq!(report.transfer_amount, Money::from_dollars(500));
    }

    #[test]
    fn test_json_amounts_are_decimal_strings() {
        let dir = TempDir::new().unwrap();
        let path = write_bills(&dir);

        let report = build_report(&Settings::default(), &path, Some("2026-02-10")).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["transfer_amount"], "500.00");
        assert_eq!(json["checking"]["before"], "1000.00");
        assert_eq!(json["relevant_expenses"][0]["amount"], "500.00");
    }

    #[test]
    fn test_build_report_accepts_us_date() {
        let dir = TempDir::new().unwrap();
        let path = write_bills(&dir);

        let report = build_report(&Settings::default(), &path, Some("2/13/2026")).unwrap();
        assert!(report.relevant_expenses.is_empty());
    }

    #[test]
    fn test_build_report_bad_date() {
        let dir = TempDir::new().unwrap();
        let path = write_bills(&dir);

        let err = build_report(&Settings::default(), &path, Some("soon")).unwrap_err();
        assert!(matches!(err, BillcoverError::InvalidDate(_)));
    }

    #[test]
    fn test_build_report_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = build_report(
            &Settings::default(),
            &dir.path().join("nope.csv"),
            Some("2026-02-10"),
        )
        .unwrap_err();
        assert!(matches!(err, BillcoverError::FileNotFound { .. }));
    }
}
