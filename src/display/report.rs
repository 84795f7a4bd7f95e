//! Transfer report formatting
//!
//! Turns a computed `TransferReport` into the text shown at the end of a
//! session. Formatting only; every number comes from the report.

use std::fmt::Write;

use crate::models::{format_date, Expense, Money};
use crate::services::TransferReport;

const WIDTH: usize = 60;

/// Format a separator line
pub fn separator(width: usize) -> String {
    "-".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "=".repeat(width)
}

fn expense_line(expense: &Expense) -> String {
    format!(
        "  {} | {:<20} | {:>11}",
        format_date(expense.due_date),
        expense.payee,
        expense.amount
    )
}

fn balance_line(label: &str, amount: Money) -> String {
    format!("  {:<18}{:>13}", format!("{}:", label), amount)
}

/// Render the full recommendation report
pub fn render_transfer_report(report: &TransferReport) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &TransferReport) -> std::fmt::Result {
    writeln!(out, "{}", double_separator(WIDTH))?;
    writeln!(out, "MONTHLY EXPENSE ANALYSIS")?;
    writeln!(out, "{}", double_separator(WIDTH))?;
    writeln!(out, "Analysis Date: {}", format_date(report.reference_date))?;
    writeln!(
        out,
        "Period: {} of the month ({} to {})",
        report.window.half.label().to_uppercase(),
        format_date(report.window.start),
        format_date(report.window.end)
    )?;
    writeln!(out)?;

    writeln!(out, "UPCOMING EXPENSES:")?;
    writeln!(out, "{}", separator(WIDTH))?;
    if report.relevant_expenses.is_empty() {
        writeln!(out, "  No upcoming expenses for this period.")?;
    } else {
        for expense in &report.relevant_expenses {
            writeln!(out, "{}", expense_line(expense))?;
        }
        writeln!(out, "{}", separator(WIDTH))?;
        writeln!(out, "  {:<33} | {:>11}", "TOTAL", report.total_due)?;
    }
    writeln!(out)?;

    if !report.next_month_expenses.is_empty() {
        writeln!(
            out,
            "NEXT MONTH EXPENSES (Not included in transfer calculation):"
        )?;
        writeln!(out, "{}", separator(WIDTH))?;
        for expense in &report.next_month_expenses {
            writeln!(out, "{}", expense_line(expense))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "ACCOUNT BALANCES:")?;
    writeln!(out, "{}", separator(WIDTH))?;
    writeln!(out, "BEFORE TRANSFER:")?;
    writeln!(out, "{}", balance_line(&report.checking.label, report.checking.before))?;
    writeln!(out, "{}", balance_line(&report.savings.label, report.savings.before))?;
    writeln!(out)?;

    if report.transfer_needed() {
        writeln!(out, "RECOMMENDED TRANSFER: {}", report.transfer_amount)?;
        writeln!(
            out,
            "  (Expenses: {} + Safety Margin: {})",
            report.total_due, report.safety_margin
        )?;
        writeln!(out)?;
        writeln!(out, "AFTER TRANSFER:")?;
        writeln!(out, "{}", balance_line(&report.checking.label, report.checking.after))?;
        writeln!(out, "{}", balance_line(&report.savings.label, report.savings.after))?;
    } else {
        writeln!(out, "NO TRANSFER NEEDED")?;
        writeln!(
            out,
            "  Current {} balance is sufficient (includes {} safety margin)",
            report.checking.label, report.safety_margin
        )?;
    }
    writeln!(out)?;

    writeln!(out, "AFTER PAYING EXPENSES:")?;
    writeln!(
        out,
        "{}",
        balance_line(&report.checking.label, report.checking_after_expenses)
    )?;
    writeln!(out, "    (Includes {} safety margin)", report.safety_margin)?;
    writeln!(out, "{}", double_separator(WIDTH))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomeEntry;
    use crate::services::{calculate_transfer, TransferConfig};
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    fn config() -> TransferConfig {
        TransferConfig {
            safety_margin: Money::from_dollars(1000),
            checking_label: "SCCU Checking".into(),
            savings_label: "E-Trade Savings".into(),
        }
    }

    fn report_with_checking(checking: i64) -> TransferReport {
        let expenses = vec![
            Expense::new("Amex", Money::from_dollars(500), d(2, 12)),
            Expense::new("HOA Q", Money::from_dollars(250), d(3, 2)),
        ];
        let income = vec![
            IncomeEntry::new("SCCU Checking", Money::from_dollars(checking), d(2, 9)),
            IncomeEntry::new("E-Trade Savings", Money::from_dollars(5000), d(2, 9)),
        ];
        calculate_transfer(&expenses, &income, d(2, 10), &config())
    }

    #[test]
    fn test_report_with_transfer() {
        let text = render_transfer_report(&report_with_checking(1000));

        assert!(text.contains("Analysis Date: 2026-02-10"));
        assert!(text.contains("Period: FIRST HALF of the month"));
        assert!(text.contains("2026-02-12 | Amex"));
        assert!(text.contains("RECOMMENDED TRANSFER: $500.00"));
        assert!(text.contains("(Expenses: $500.00 + Safety Margin: $1000.00)"));
        assert!(text.contains("AFTER TRANSFER:"));
        assert!(text.contains("$4500.00"));
        assert!(!text.contains("NO TRANSFER NEEDED"));
    }

    #[test]
    fn test_report_without_transfer() {
        let text = render_transfer_report(&report_with_checking(2000));

        assert!(text.contains("NO TRANSFER NEEDED"));
        assert!(text.contains("Current SCCU Checking balance is sufficient"));
        assert!(!text.contains("AFTER TRANSFER:"));
        assert!(text.contains("AFTER PAYING EXPENSES:"));
        assert!(text.contains("$1500.00"));
    }

    #[test]
    fn test_next_month_section_listed_separately() {
        let text = render_transfer_report(&report_with_checking(1000));

        let next_idx = text.find("NEXT MONTH EXPENSES").unwrap();
        let hoa_idx = text.find("HOA Q").unwrap();
        assert!(hoa_idx > next_idx);
    }

    #[test]
    fn test_empty_period_message() {
        let report = calculate_transfer(&[], &[], d(2, 20), &config());
        let text = render_transfer_report(&report);

        assert!(text.contains("No upcoming expenses for this period."));
        assert!(text.contains("SECOND HALF"));
        assert!(!text.contains("NEXT MONTH EXPENSES"));
    }

    #[test]
    fn test_rendering_does_not_change_report() {
        let report = report_with_checking(1000);
        let copy = report.clone();
        let _ = render_transfer_report(&report);
        assert_eq!(report, copy);
    }
}
