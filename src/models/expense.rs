//! Expense model
//!
//! A recurring bill: who gets paid, how much, and when it is due.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyPayee,
    NonPositiveAmount,
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPayee => write!(f, "Payee cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Expense amount must be greater than zero"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// A bill owed to a payee on a due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub payee: String,
    pub amount: Money,
    pub due_date: NaiveDate,
}

impl Expense {
    /// Create a new expense
    pub fn new(payee: impl Into<String>, amount: Money, due_date: NaiveDate) -> Self {
        Self {
            payee: payee.into(),
            amount,
            due_date,
        }
    }

    /// Validate the expense for manual entry
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.payee.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyPayee);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }

    /// One-line summary, e.g. "Amex - $120.00 due on 2026-02-12"
    pub fn summary(&self) -> String {
        format!("{} - {} due on {}", self.payee, self.amount, self.due_date)
    }
}

/// A partial update to an expense; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseUpdate {
    pub payee: Option<String>,
    pub amount: Option<Money>,
    pub due_date: Option<NaiveDate>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.payee.is_none() && self.amount.is_none() && self.due_date.is_none()
    }

    /// Apply the supplied fields, returning a change summary per field
    pub fn apply_to(&self, expense: &mut Expense) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(payee) = &self.payee {
            changes.push(format!("payee: {:?} -> {:?}", expense.payee, payee));
            expense.payee = payee.clone();
        }
        if let Some(amount) = self.amount {
            changes.push(format!("amount: {} -> {}", expense.amount, amount));
            expense.amount = amount;
        }
        if let Some(due_date) = self.due_date {
            changes.push(format!("due_date: {} -> {}", expense.due_date, due_date));
            expense.due_date = due_date;
        }
        changes
    }
}
