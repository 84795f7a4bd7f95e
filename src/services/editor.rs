//! Editor service
//!
//! Add, modify and delete expenses and income entries in the session's
//! record store. Every operation validates all of its input before touching
//! the store, so a rejected edit leaves the records exactly as they were.

use chrono::NaiveDate;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::Settings;
use crate::error::{BillcoverError, BillcoverResult};
use crate::models::{
    parse_date, pick_label, Expense, ExpenseUpdate, IncomeEntry, IncomeUpdate, Money, Selection,
};
use crate::storage::{RecordStore, UpsertOutcome};

/// Parse an optional field: blank input means "keep the current value"
fn optional<T>(
    input: &str,
    parse: impl FnOnce(&str) -> BillcoverResult<T>,
) -> BillcoverResult<Option<T>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        parse(trimmed).map(Some)
    }
}

fn positive_amount(input: &str) -> BillcoverResult<Money> {
    let amount = Money::parse(input)?;
    if !amount.is_positive() {
        return Err(BillcoverError::Validation(
            "Expense amount must be greater than zero".into(),
        ));
    }
    Ok(amount)
}

/// Build a partial expense update from raw prompt answers
pub fn parse_expense_update(
    payee: &str,
    amount: &str,
    due_date: &str,
) -> BillcoverResult<ExpenseUpdate> {
    Ok(ExpenseUpdate {
        payee: optional(payee, |s| Ok(s.to_string()))?,
        amount: optional(amount, positive_amount)?,
        due_date: optional(due_date, parse_date)?,
    })
}

/// Build a partial income update from raw prompt answers
pub fn parse_income_update(amount: &str, as_of_date: &str) -> BillcoverResult<IncomeUpdate> {
    Ok(IncomeUpdate {
        amount: optional(amount, Money::parse)?,
        as_of_date: optional(as_of_date, parse_date)?,
    })
}

/// Service for editing the session's records
pub struct EditorService<'a> {
    store: &'a mut RecordStore,
    settings: &'a Settings,
    audit: Option<&'a AuditLogger>,
}

impl<'a> EditorService<'a> {
    /// Create a new editor service
    pub fn new(store: &'a mut RecordStore, settings: &'a Settings) -> Self {
        Self {
            store,
            settings,
            audit: None,
        }
    }

    /// Record every mutation in the given audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn store(&self) -> &RecordStore {
        self.store
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(audit) = self.audit {
            if let Err(e) = audit.log(&entry) {
                tracing::warn!("failed to write audit entry: {e}");
            }
        }
    }

    /// Add an expense from raw input
    ///
    /// `payee_input` is a name or the number of a configured payee suggestion.
    pub fn add_expense(
        &mut self,
        payee_input: &str,
        amount_input: &str,
        date_input: &str,
    ) -> BillcoverResult<Expense> {
        let payee = pick_label(payee_input, &self.settings.payee_suggestions)?;
        let amount = positive_amount(amount_input)?;
        let due_date = parse_date(date_input)?;

        let expense = Expense::new(payee, amount, due_date);
        expense
            .validate()
            .map_err(|e| BillcoverError::Validation(e.to_string()))?;

        self.store.push_expense(expense.clone());
        self.record(AuditEntry::create(
            EntityType::Expense,
            AuditEntry::positional_id(EntityType::Expense, self.store.expenses().len()),
            Some(expense.payee.clone()),
            &expense,
        ));

        Ok(expense)
    }

    /// Add an income entry from raw input, replacing any entry with the
    /// same source label
    pub fn add_income(
        &mut self,
        source_input: &str,
        amount_input: &str,
        date_input: &str,
    ) -> BillcoverResult<(IncomeEntry, UpsertOutcome)> {
        let source = pick_label(source_input, &self.settings.income_sources)?;
        let amount = Money::parse(amount_input)?;
        let as_of_date = parse_date(date_input)?;
        self.set_income(IncomeEntry::new(source, amount, as_of_date))
    }

    /// Add or replace an already-parsed income entry
    pub fn set_income(
        &mut self,
        entry: IncomeEntry,
    ) -> BillcoverResult<(IncomeEntry, UpsertOutcome)> {
        entry
            .validate()
            .map_err(|e| BillcoverError::Validation(e.to_string()))?;

        let before = self
            .store
            .income()
            .iter()
            .find(|e| e.is_source(&entry.source))
            .cloned();

        let outcome = self.store.upsert_income(entry.clone());

        match (outcome, before) {
            (UpsertOutcome::Replaced { index }, Some(before)) => {
                self.record(AuditEntry::update(
                    EntityType::Income,
                    AuditEntry::positional_id(EntityType::Income, index + 1),
                    Some(entry.source.clone()),
                    &before,
                    &entry,
                    Some(format!("amount: {} -> {}", before.amount, entry.amount)),
                ));
            }
            _ => {
                self.record(AuditEntry::create(
                    EntityType::Income,
                    AuditEntry::positional_id(EntityType::Income, self.store.income().len()),
                    Some(entry.source.clone()),
                    &entry,
                ));
            }
        }

        Ok((entry, outcome))
    }

    /// Interpret a position typed by the user against the expense list
    pub fn select_expense(&self, input: &str) -> BillcoverResult<Selection> {
        Selection::parse(input, self.store.expenses().len())
    }

    /// Interpret a position typed by the user against the income list
    pub fn select_income(&self, input: &str) -> BillcoverResult<Selection> {
        Selection::parse(input, self.store.income().len())
    }

    /// Apply a partial update to the expense at `index` (zero-based)
    ///
    /// Blank inputs keep the current value. Nothing changes unless every
    /// supplied input is valid.
    pub fn modify_expense(
        &mut self,
        index: usize,
        payee_input: &str,
        amount_input: &str,
        date_input: &str,
    ) -> BillcoverResult<Expense> {
        let update = parse_expense_update(payee_input, amount_input, date_input)?;

        let expense = self
            .store
            .expense_mut(index)
            .ok_or_else(|| BillcoverError::InvalidSelection((index + 1).to_string()))?;
        let before = expense.clone();
        let changes = update.apply_to(expense);
        let after = expense.clone();

        if !changes.is_empty() {
            self.record(AuditEntry::update(
                EntityType::Expense,
                AuditEntry::positional_id(EntityType::Expense, index + 1),
                Some(after.payee.clone()),
                &before,
                &after,
                Some(changes.join(", ")),
            ));
        }

        Ok(after)
    }

    /// Apply a partial update to the income entry at `index` (zero-based)
    pub fn modify_income(
        &mut self,
        index: usize,
        amount_input: &str,
        date_input: &str,
    ) -> BillcoverResult<IncomeEntry> {
        let update = parse_income_update(amount_input, date_input)?;

        let entry = self
            .store
            .income_mut(index)
            .ok_or_else(|| BillcoverError::InvalidSelection((index + 1).to_string()))?;
        let before = entry.clone();
        let changes = update.apply_to(entry);
        let after = entry.clone();

        if !changes.is_empty() {
            self.record(AuditEntry::update(
                EntityType::Income,
                AuditEntry::positional_id(EntityType::Income, index + 1),
                Some(after.source.clone()),
                &before,
                &after,
                Some(changes.join(", ")),
            ));
        }

        Ok(after)
    }

    /// Delete the expense at a 1-based position typed by the user
    ///
    /// Returns `Ok(None)` when the user entered 0 to cancel.
    pub fn delete_expense(&mut self, position_input: &str) -> BillcoverResult<Option<Expense>> {
        let index = match self.select_expense(position_input)? {
            Selection::Cancel => return Ok(None),
            Selection::Index(index) => index,
        };

        let removed = self
            .store
            .remove_expense(index)
            .ok_or_else(|| BillcoverError::InvalidSelection(position_input.trim().to_string()))?;

        self.record(AuditEntry::delete(
            EntityType::Expense,
            AuditEntry::positional_id(EntityType::Expense, index + 1),
            Some(removed.payee.clone()),
            &removed,
        ));

        Ok(Some(removed))
    }

    /// Delete the income entry at a 1-based position typed by the user
    ///
    /// Returns `Ok(None)` when the user entered 0 to cancel.
    pub fn delete_income(&mut self, position_input: &str) -> BillcoverResult<Option<IncomeEntry>> {
        let index = match self.select_income(position_input)? {
            Selection::Cancel => return Ok(None),
            Selection::Index(index) => index,
        };

        let removed = self
            .store
            .remove_income(index)
            .ok_or_else(|| BillcoverError::InvalidSelection(position_input.trim().to_string()))?;

        self.record(AuditEntry::delete(
            EntityType::Income,
            AuditEntry::positional_id(EntityType::Income, index + 1),
            Some(removed.source.clone()),
            &removed,
        ));

        Ok(Some(removed))
    }
}

/// Placeholder balance used when manual income entry fails
pub fn zero_balance(source: &str, today: NaiveDate) -> IncomeEntry {
    IncomeEntry::new(source, Money::zero(), today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, day).unwrap()
    }

    fn seeded_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.push_expense(Expense::new("Amex", Money::from_dollars(120), d(12)));
        store.push_expense(Expense::new("HOA Q", Money::from_dollars(300), d(20)));
        store.upsert_income(IncomeEntry::new(
            "SCCU Checking",
            Money::from_dollars(1000),
            d(10),
        ));
        store
    }

    #[test]
    fn test_add_expense_by_suggestion_number() {
        let settings = Settings::default();
        let mut store = RecordStore::new();
        let mut editor = EditorService::new(&mut store, &settings);

        let expense = editor.add_expense("5", "120.50", "2026-02-12").unwrap();

        assert_eq!(expense.payee, "Amex");
        assert_eq!(expense.amount.cents(), 12050);
        assert_eq!(store.expenses().len(), 1);
    }

    #[test]
    fn test_add_expense_rejects_bad_input_without_mutation() {
        let settings = Settings::default();
        let mut store = seeded_store();
        let original = store.clone();
        let mut editor = EditorService::new(&mut store, &settings);

        assert!(matches!(
            editor.add_expense("99", "10", "2026-02-12"),
            Err(BillcoverError::InvalidSelection(_))
        ));
        assert!(matches!(
            editor.add_expense("Water", "ten", "2026-02-12"),
            Err(BillcoverError::InvalidAmount(_))
        ));
        assert!(matches!(
            editor.add_expense("Water", "0", "2026-02-12"),
            Err(BillcoverError::Validation(_))
        ));
        assert!(matches!(
            editor.add_expense("Water", "10", "someday"),
            Err(BillcoverError::InvalidDate(_))
        ));

        assert_eq!(store, original);
    }

    #[test]
    fn test_add_income_replaces_by_label() {
        let settings = Settings::default();
        let mut store = seeded_store();
        let mut editor = EditorService::new(&mut store, &settings);

        let (entry, outcome) = editor.add_income("1", "1800", "2026-02-14").unwrap();

        assert_eq!(outcome, UpsertOutcome::Replaced { index: 0 });
        assert_eq!(entry.source, "SCCU Checking");
        assert_eq!(store.income().len(), 1);
        assert_eq!(store.income()[0].amount, Money::from_dollars(1800));
        assert_eq!(store.income()[0].as_of_date, d(14));
    }

    #[test]
    fn test_add_income_new_label_appends() {
        let settings = Settings::default();
        let mut store = seeded_store();
        let mut editor = EditorService::new(&mut store, &settings);

        let (_, outcome) = editor.add_income("Credit Union", "-25", "2/10/2026").unwrap();

        assert_eq!(outcome, UpsertOutcome::Added);
        assert_eq!(store.income().len(), 2);
        assert_eq!(store.income()[1].amount.cents(), -2500);
    }

    #[test]
    fn test_modify_blank_fields_keep_values() {
        let settings = Settings::default();
        let mut store = seeded_store();
        let mut editor = EditorService::new(&mut store, &settings);

        let updated = editor.modify_expense(0, "", "150", "").unwrap();

        assert_eq!(updated.payee, "Amex");
        assert_eq!(updated.amount, Money::from_dollars(150));
        assert_eq!(updated.due_date, d(12));
        assert_eq!(store.expenses()[1], seeded_store().expenses()[1]);
    }

    #[test]
    fn test_modify_all_blank_changes_nothing() {
        let settings = Settings::default();
        let mut store = seeded_store();
        let mut editor = EditorService::new(&mut store, &settings);

        editor.modify_expense(1, "", "  ", "").unwrap();
        editor.modify_income(0, "", "").unwrap();

        assert_eq!(store, seeded_store());
    }

    #[test]
    fn test_modify_with_one_bad_field_changes_nothing() {
        let settings = Settings::default();
        let mut store = seeded_store();
        let mut editor = EditorService::new(&mut store, &settings);

        let result = editor.modify_expense(0, "Chase Visa", "200", "2026-13-45");

        assert!(matches!(result, Err(BillcoverError::InvalidDate(_))));
        assert_eq!(store, seeded_store());
    }

    #[test]
    fn test_modify_income_fields() {
        let settings = Settings::default();
        let mut store = seeded_store();
        let mut editor = EditorService::new(&mut store, &settings);

        let updated = editor.modify_income(0, "", "2026-02-15").unwrap();

        assert_eq!(updated.amount, Money::from_dollars(1000));
        assert_eq!(updated.as_of_date, d(15));
        assert!(matches!(
            editor.modify_income(5, "10", ""),
            Err(BillcoverError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_delete_zero_cancels() {
        let settings = Settings::default();
        let mut store = seeded_store();
        let mut editor = EditorService::new(&mut store, &settings);

        assert_eq!(editor.delete_expense("0").unwrap(), None);
        assert_eq!(editor.delete_income("0").unwrap(), None);
        assert_eq!(store, seeded_store());
    }

    #[test]
    fn test_delete_out_of_range_fails_without_mutation() {
        let settings = Settings::default();
        let mut store = seeded_store();
        let mut editor = EditorService::new(&mut store, &settings);

        assert!(matches!(
            editor.delete_expense("3"),
            Err(BillcoverError::InvalidSelection(_))
        ));
        assert!(matches!(
            editor.delete_income("x"),
            Err(BillcoverError::InvalidSelection(_))
        ));
        assert_eq!(store, seeded_store());
    }

    #[test]
    fn test_delete_by_position() {
        let settings = Settings::default();
        let mut store = seeded_store();
        let mut editor = EditorService::new(&mut store, &settings);

        let removed = editor.delete_expense("2").unwrap().unwrap();

        assert_eq!(removed.payee, "HOA Q");
        assert_eq!(store.expenses().len(), 1);
        assert_eq!(store.expenses()[0].payee, "Amex");
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let settings = Settings::default();
        let mut store = seeded_store();
        let mut editor = EditorService::new(&mut store, &settings).with_audit(&logger);

        editor.add_expense("Water", "40", "2026-02-25").unwrap();
        editor.modify_expense(0, "", "130", "").unwrap();
        editor.modify_expense(0, "", "", "").unwrap();
        editor.add_income("2", "5000", "2026-02-10").unwrap();
        editor.delete_expense("1").unwrap();
        editor.delete_expense("0").unwrap();

        let entries = logger.read_all().unwrap();
        let ops: Vec<Operation> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            ops,
            vec![
                Operation::Create,
                Operation::Update,
                Operation::Create,
                Operation::Delete
            ]
        );
        assert_eq!(entries[0].entity_id, "expense-3");
        assert_eq!(entries[2].entity_type, EntityType::Income);
    }
}
