//! In-memory record store
//!
//! Holds the expense and income sequences for one session. Order is the
//! order entries were loaded or added, which is also the numbering shown
//! to the user.

use crate::models::{Expense, IncomeEntry, Money};

/// What an income upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added,
    /// An entry with the same source label was overwritten in place
    Replaced { index: usize },
}

/// The two record sequences owned by a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    expenses: Vec<Expense>,
    income: Vec<IncomeEntry>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn income(&self) -> &[IncomeEntry] {
        &self.income
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.income.is_empty()
    }

    pub fn push_expense(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    pub fn expense_mut(&mut self, index: usize) -> Option<&mut Expense> {
        self.expenses.get_mut(index)
    }

    pub fn remove_expense(&mut self, index: usize) -> Option<Expense> {
        (index < self.expenses.len()).then(|| self.expenses.remove(index))
    }

    /// Add an income entry, or replace amount and date of the entry that
    /// already carries the same source label
    pub fn upsert_income(&mut self, entry: IncomeEntry) -> UpsertOutcome {
        match self.income.iter().position(|e| e.is_source(&entry.source)) {
            Some(index) => {
                let existing = &mut self.income[index];
                existing.amount = entry.amount;
                existing.as_of_date = entry.as_of_date;
                UpsertOutcome::Replaced { index }
            }
            None => {
                self.income.push(entry);
                UpsertOutcome::Added
            }
        }
    }

    pub fn income_mut(&mut self, index: usize) -> Option<&mut IncomeEntry> {
        self.income.get_mut(index)
    }

    pub fn remove_income(&mut self, index: usize) -> Option<IncomeEntry> {
        (index < self.income.len()).then(|| self.income.remove(index))
    }

    /// Balance recorded for a source label, or zero when absent
    pub fn balance_for(&self, label: &str) -> Money {
        balance_for(&self.income, label)
    }
}

/// First matching entry wins; a missing source counts as a zero balance
pub fn balance_for(income: &[IncomeEntry], label: &str) -> Money {
    income
        .iter()
        .find(|e| e.is_source(label))
        .map(|e| e.amount)
        .unwrap_or_default()
}
