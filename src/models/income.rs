//! Income / balance entry model
//!
//! Records the balance of an account (identified by its source label) as of
//! a given date. The source label acts as the key among income entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Validation errors for income entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    EmptySource,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySource => write!(f, "Bank name cannot be empty"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// An account balance reported on a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub source: String,
    pub amount: Money,
    pub as_of_date: NaiveDate,
}

impl IncomeEntry {
    /// Create a new income entry
    pub fn new(source: impl Into<String>, amount: Money, as_of_date: NaiveDate) -> Self {
        Self {
            source: source.into(),
            amount,
            as_of_date,
        }
    }

    /// Validate the income entry
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.source.trim().is_empty() {
            return Err(IncomeValidationError::EmptySource);
        }
        Ok(())
    }

    /// Whether this entry belongs to the given source label
    pub fn is_source(&self, label: &str) -> bool {
        self.source == label
    }

    /// One-line summary, e.g. "SCCU Checking - $1000.00 as of 2026-02-10"
    pub fn summary(&self) -> String {
        format!("{} - {} as of {}", self.source, self.amount, self.as_of_date)
    }
}

/// A partial update to an income entry; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomeUpdate {
    pub amount: Option<Money>,
    pub as_of_date: Option<NaiveDate>,
}

impl IncomeUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.as_of_date.is_none()
    }

    /// Apply the supplied fields, returning a change summary per field
    pub fn apply_to(&self, entry: &mut IncomeEntry) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(amount) = self.amount {
            changes.push(format!("amount: {} -> {}", entry.amount, amount));
            entry.amount = amount;
        }
        if let Some(as_of_date) = self.as_of_date {
            changes.push(format!("as_of_date: {} -> {}", entry.as_of_date, as_of_date));
            entry.as_of_date = as_of_date;
        }
        changes
    }
}
