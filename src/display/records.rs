//! Record list formatting
//!
//! Numbered tables of expenses and income entries. The numbers are the
//! 1-based positions the editor accepts for modify and delete.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{format_date, Expense, IncomeEntry};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Payee")]
    payee: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Due Date")]
    due_date: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Bank")]
    bank: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Balance Date")]
    balance_date: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()));
    table.to_string()
}

/// Format expenses in store order
pub fn format_expense_table(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "  No expenses to display.".to_string();
    }

    let rows = expenses
        .iter()
        .enumerate()
        .map(|(i, e)| ExpenseRow {
            position: i + 1,
            payee: e.payee.clone(),
            amount: e.amount.to_string(),
            due_date: format_date(e.due_date),
        })
        .collect();

    render::<ExpenseRow>(rows)
}

/// Format income entries in store order
pub fn format_income_table(income: &[IncomeEntry]) -> String {
    if income.is_empty() {
        return "  No income to display.".to_string();
    }

    let rows = income
        .iter()
        .enumerate()
        .map(|(i, e)| IncomeRow {
            position: i + 1,
            bank: e.source.clone(),
            amount: e.amount.to_string(),
            balance_date: format_date(e.as_of_date),
        })
        .collect();

    render::<IncomeRow>(rows)
}

/// Numbered suggestion list, e.g. "  1. Amex"
pub fn format_suggestions(suggestions: &[String]) -> String {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("  {}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n")
}
