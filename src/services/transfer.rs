//! Transfer recommendation
//!
//! Works out how much to move from savings into checking so that checking
//! covers every bill still due in the current half-month plus a fixed
//! safety margin.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::period::is_later_month;
use crate::models::{Expense, HalfMonthWindow, IncomeEntry, Money};
use crate::storage::records::balance_for;

/// Constants the calculation depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    pub safety_margin: Money,
    pub checking_label: String,
    pub savings_label: String,
}

/// Balance of one account before and after the recommended transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalances {
    pub label: String,
    pub before: Money,
    pub after: Money,
}

/// Everything the report needs; computed once, formatted elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub reference_date: NaiveDate,
    pub window: HalfMonthWindow,
    /// Bills due in the window on or after the reference date, by due date
    pub relevant_expenses: Vec<Expense>,
    /// Bills due in a later month, by due date; not part of `total_due`
    pub next_month_expenses: Vec<Expense>,
    pub total_due: Money,
    pub safety_margin: Money,
    pub required_balance: Money,
    pub checking: AccountBalances,
    pub savings: AccountBalances,
    pub transfer_amount: Money,
    /// Checking balance once the relevant bills are paid
    pub checking_after_expenses: Money,
}

impl TransferReport {
    pub fn transfer_needed(&self) -> bool {
        self.transfer_amount.is_positive()
    }
}

fn sorted_by_due_date(mut expenses: Vec<Expense>) -> Vec<Expense> {
    expenses.sort_by_key(|e| e.due_date);
    expenses
}

/// Compute the transfer recommendation for `today`
///
/// Pure: depends only on its arguments.
pub fn calculate_transfer(
    expenses: &[Expense],
    income: &[IncomeEntry],
    today: NaiveDate,
    config: &TransferConfig,
) -> TransferReport {
    let window = HalfMonthWindow::containing(today);

    let relevant_expenses = sorted_by_due_date(
        expenses
            .iter()
            .filter(|e| window.contains(e.due_date) && e.due_date >= today)
            .cloned()
            .collect(),
    );

    let next_month_expenses = sorted_by_due_date(
        expenses
            .iter()
            .filter(|e| is_later_month(e.due_date, today))
            .cloned()
            .collect(),
    );

    let total_due: Money = relevant_expenses.iter().map(|e| e.amount).sum();

    let checking_before = balance_for(income, &config.checking_label);
    let savings_before = balance_for(income, &config.savings_label);

    let required_balance = total_due + config.safety_margin;
    let transfer_amount = (required_balance - checking_before).clamp_non_negative();
    let checking_after = checking_before + transfer_amount;

    TransferReport {
        reference_date: today,
        window,
        relevant_expenses,
        next_month_expenses,
        total_due,
        safety_margin: config.safety_margin,
        required_balance,
        checking: AccountBalances {
            label: config.checking_label.clone(),
            before: checking_before,
            after: checking_after,
        },
        savings: AccountBalances {
            label: config.savings_label.clone(),
            before: savings_before,
            after: savings_before - transfer_amount,
        },
        transfer_amount,
        checking_after_expenses: checking_after - total_due,
    }
}
