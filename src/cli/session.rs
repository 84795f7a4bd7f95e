//! Interactive session
//!
//! Load or enter records, review them through the data management menu,
//! save them to the configured data file, then print the transfer
//! recommendation.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::audit::AuditLogger;
use crate::config::Settings;
use crate::display::{
    format_expense_table, format_income_table, format_suggestions, render_transfer_report,
};
use crate::error::BillcoverResult;
use crate::models::{parse_date, pick_label, IncomeEntry, Money, Selection};
use crate::services::editor::zero_balance;
use crate::services::{calculate_transfer, EditorService, TransferReport};
use crate::storage::{read_records, write_records, RecordStore, UpsertOutcome};

use super::console::Console;

/// How the data management menu was left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    /// Option 9: go on to save and analyse
    Continue,
    /// Option 0: stop without saving
    Exit,
}

/// How a session ended
#[derive(Debug)]
pub enum SessionOutcome {
    Completed {
        store: RecordStore,
        /// `None` when the save failed
        saved_to: Option<PathBuf>,
        report: TransferReport,
    },
    /// The user chose "exit" from the menu; nothing was written
    Aborted,
}

/// One interactive run of the program
pub struct Session<'a, R, W> {
    console: Console<R, W>,
    settings: &'a Settings,
    audit: Option<&'a AuditLogger>,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(console: Console<R, W>, settings: &'a Settings, today: NaiveDate) -> Self {
        Self {
            console,
            settings,
            audit: None,
            today,
        }
    }

    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn editor<'s>(&self, store: &'s mut RecordStore) -> EditorService<'s>
    where
        'a: 's,
    {
        let editor = EditorService::new(store, self.settings);
        match self.audit {
            Some(audit) => editor.with_audit(audit),
            None => editor,
        }
    }

    /// Run the whole session
    pub fn run(&mut self) -> BillcoverResult<SessionOutcome> {
        self.console.say("=".repeat(60))?;
        self.console.say("MONTHLY EXPENSE AND INCOME MANAGER")?;
        self.console.say("=".repeat(60))?;

        let mut store = RecordStore::new();
        let mut imported = false;

        if self
            .console
            .confirm("\nDo you have a CSV file for processing? (yes/no): ")?
        {
            let filename = self.console.prompt("Enter CSV filename: ")?;
            match read_records(&filename) {
                Ok(loaded) => {
                    self.console.say(format!(
                        "\n✓ Successfully loaded {} expense(s) and {} income source(s)",
                        loaded.expenses().len(),
                        loaded.income().len()
                    ))?;
                    store = loaded;
                    imported = true;

                    if self
                        .console
                        .confirm("\nWould you like to review/modify the imported data? (yes/no): ")?
                        && self.manage_data(&mut store)? == MenuExit::Exit
                    {
                        self.console.say("\nProgram terminated by user.")?;
                        return Ok(SessionOutcome::Aborted);
                    }
                }
                Err(e) => {
                    tracing::warn!(file = %filename, "import failed: {e}");
                    self.console.say(format!("Error: {}", e))?;
                    self.console
                        .say("Failed to read CSV. Please enter data manually.")?;
                }
            }
        }

        if !imported {
            self.enter_expenses(&mut store)?;
            self.enter_income(&mut store)?;

            if !store.is_empty()
                && self
                    .console
                    .confirm("\nWould you like to review/modify your entries? (yes/no): ")?
                && self.manage_data(&mut store)? == MenuExit::Exit
            {
                self.console.say("\nProgram terminated by user.")?;
                return Ok(SessionOutcome::Aborted);
            }
        }

        // The imported file is never written back
        let target = PathBuf::from(&self.settings.default_data_file);
        let saved_to = match write_records(&target, &store) {
            Ok(()) => {
                self.console
                    .say(format!("\nData saved to '{}'", target.display()))?;
                Some(target)
            }
            Err(e) => {
                tracing::error!(file = %target.display(), "save failed: {e}");
                self.console.say(format!("\nError saving data: {}", e))?;
                None
            }
        };

        let report = calculate_transfer(
            store.expenses(),
            store.income(),
            self.today,
            &self.settings.transfer_config(),
        );
        self.console.say("")?;
        self.console.say(render_transfer_report(&report))?;

        Ok(SessionOutcome::Completed {
            store,
            saved_to,
            report,
        })
    }

    /// Read expenses until a blank payee
    pub fn enter_expenses(&mut self, store: &mut RecordStore) -> BillcoverResult<()> {
        self.console.say("\n--- Enter Expense Data ---")?;
        self.console.say("Available payees:")?;
        self.console
            .say(format_suggestions(&self.settings.payee_suggestions))?;

        loop {
            self.console
                .say("\nEnter expense (or press Enter to finish):")?;
            let payee_input = self.console.prompt("  Payee name or number: ")?;
            if payee_input.is_empty() {
                return Ok(());
            }

            let payee = match pick_label(&payee_input, &self.settings.payee_suggestions) {
                Ok(payee) => payee,
                Err(_) => {
                    self.console
                        .say("Invalid payee number. Please try again.")?;
                    continue;
                }
            };

            let amount = self.console.prompt("  Amount: $")?;
            let due = self.console.prompt("  Due Date (YYYY-MM-DD): ")?;

            match self.editor(store).add_expense(&payee, &amount, &due) {
                Ok(expense) => self.console.say(format!("  Added: {}", expense.summary()))?,
                Err(e) => self
                    .console
                    .say(format!("Invalid input: {}. Please try again.", e))?,
            }
        }
    }

    /// Read one balance for each configured income source
    pub fn enter_income(&mut self, store: &mut RecordStore) -> BillcoverResult<()> {
        self.console.say("\n--- Enter Income Data ---")?;
        self.console.say("Available banks:")?;
        self.console
            .say(format_suggestions(&self.settings.income_sources))?;

        for bank in &self.settings.income_sources {
            self.console.say(format!("\nEnter data for {}:", bank))?;
            let amount = self.console.prompt("  Amount: $")?;
            let date = self.console.prompt("  Balance Date (YYYY-MM-DD): ")?;

            let entry = match (Money::parse(&amount), parse_date(&date)) {
                (Ok(amount), Ok(date)) => IncomeEntry::new(bank.as_str(), amount, date),
                (Err(e), _) | (_, Err(e)) => {
                    self.console
                        .say(format!("Invalid input: {}. Setting to 0.", e))?;
                    zero_balance(bank, self.today)
                }
            };

            if let Err(e) = self.editor(store).set_income(entry) {
                self.console.say(format!("Invalid input: {}", e))?;
            }
        }

        Ok(())
    }

    /// The data management menu
    pub fn manage_data(&mut self, store: &mut RecordStore) -> BillcoverResult<MenuExit> {
        loop {
            self.print_menu()?;
            let choice = self.console.prompt("\nSelect option: ")?;

            match choice.as_str() {
                "1" => {
                    self.console.say("\n--- Current Expenses ---")?;
                    self.console.say(format_expense_table(store.expenses()))?;
                }
                "2" => self.add_expense(store)?,
                "3" => self.modify_expense(store)?,
                "4" => self.delete_expense(store)?,
                "5" => {
                    self.console.say("\n--- Current Income ---")?;
                    self.console.say(format_income_table(store.income()))?;
                }
                "6" => self.add_income(store)?,
                "7" => self.modify_income(store)?,
                "8" => self.delete_income(store)?,
                "9" => return Ok(MenuExit::Continue),
                "0" => return Ok(MenuExit::Exit),
                _ => self.console.say("Invalid option. Please try again.")?,
            }
        }
    }

    fn print_menu(&mut self) -> BillcoverResult<()> {
        let rule = "=".repeat(60);
        self.console.say(format!(
            "\n{rule}\nDATA MANAGEMENT MENU\n{rule}\n\
             Expenses:\n  1. View expenses\n  2. Add expense\n  3. Modify expense\n  4. Delete expense\n\
             \nIncome:\n  5. View income\n  6. Add/Update income\n  7. Modify income\n  8. Delete income\n\
             \n  9. Continue to analysis\n  0. Exit program\n{rule}"
        ))
    }

    fn add_expense(&mut self, store: &mut RecordStore) -> BillcoverResult<()> {
        self.console.say("\n--- Add New Expense ---")?;
        self.console.say("Available payees:")?;
        self.console
            .say(format_suggestions(&self.settings.payee_suggestions))?;

        let payee = self.console.prompt("\nPayee name or number: ")?;
        let amount = self.console.prompt("Amount: $")?;
        let due = self.console.prompt("Due Date (YYYY-MM-DD): ")?;

        match self.editor(store).add_expense(&payee, &amount, &due) {
            Ok(expense) => self.console.say(format!("✓ Added: {}", expense.summary())),
            Err(e) => {
                tracing::warn!("add expense rejected: {e}");
                self.console.say(format!("Invalid input: {}", e))
            }
        }
    }

    fn modify_expense(&mut self, store: &mut RecordStore) -> BillcoverResult<()> {
        if store.expenses().is_empty() {
            return self.console.say("No expenses to modify.");
        }
        self.console.say(format_expense_table(store.expenses()))?;

        let choice = self
            .console
            .prompt("\nEnter expense number to modify (0 to cancel): ")?;
        let index = match self.editor(store).select_expense(&choice) {
            Ok(Selection::Index(index)) => index,
            Ok(Selection::Cancel) => return Ok(()),
            Err(e) => return self.console.say(format!("Invalid expense number: {}", e)),
        };

        let current = store.expenses()[index].clone();
        self.console.say(format!("\nModifying: {}", current.summary()))?;
        self.console.say("Press Enter to keep current value")?;
        let payee = self.console.prompt(&format!("Payee [{}]: ", current.payee))?;
        let amount = self
            .console
            .prompt(&format!("Amount [{}]: $", current.amount))?;
        let due = self
            .console
            .prompt(&format!("Due Date [{}]: ", current.due_date))?;

        match self.editor(store).modify_expense(index, &payee, &amount, &due) {
            Ok(_) => self.console.say("✓ Expense modified successfully"),
            Err(e) => {
                tracing::warn!("modify expense rejected: {e}");
                self.console
                    .say(format!("Invalid input: {}. No changes made.", e))
            }
        }
    }

    fn delete_expense(&mut self, store: &mut RecordStore) -> BillcoverResult<()> {
        if store.expenses().is_empty() {
            return self.console.say("No expenses to delete.");
        }
        self.console.say(format_expense_table(store.expenses()))?;

        let choice = self
            .console
            .prompt("\nEnter expense number to delete (0 to cancel): ")?;
        match self.editor(store).delete_expense(&choice) {
            Ok(Some(removed)) => self.console.say(format!(
                "✓ Deleted: {} - {}",
                removed.payee, removed.amount
            )),
            Ok(None) => Ok(()),
            Err(e) => self.console.say(format!("Invalid expense number: {}", e)),
        }
    }

    fn add_income(&mut self, store: &mut RecordStore) -> BillcoverResult<()> {
        self.console.say("\n--- Add/Update Income ---")?;
        self.console.say("Available banks:")?;
        self.console
            .say(format_suggestions(&self.settings.income_sources))?;

        let bank = self.console.prompt("\nBank name or number: ")?;
        let amount = self.console.prompt("Amount: $")?;
        let date = self.console.prompt("Balance Date (YYYY-MM-DD): ")?;

        match self.editor(store).add_income(&bank, &amount, &date) {
            Ok((entry, UpsertOutcome::Added)) => self
                .console
                .say(format!("✓ Added: {} - {}", entry.source, entry.amount)),
            Ok((entry, UpsertOutcome::Replaced { .. })) => self
                .console
                .say(format!("✓ Updated: {} - {}", entry.source, entry.amount)),
            Err(e) => {
                tracing::warn!("add income rejected: {e}");
                self.console.say(format!("Invalid input: {}", e))
            }
        }
    }

    fn modify_income(&mut self, store: &mut RecordStore) -> BillcoverResult<()> {
        if store.income().is_empty() {
            return self.console.say("No income to modify.");
        }
        self.console.say(format_income_table(store.income()))?;

        let choice = self
            .console
            .prompt("\nEnter income number to modify (0 to cancel): ")?;
        let index = match self.editor(store).select_income(&choice) {
            Ok(Selection::Index(index)) => index,
            Ok(Selection::Cancel) => return Ok(()),
            Err(e) => return self.console.say(format!("Invalid income number: {}", e)),
        };

        let current = store.income()[index].clone();
        self.console.say(format!("\nModifying: {}", current.summary()))?;
        self.console.say("Press Enter to keep current value")?;
        let amount = self
            .console
            .prompt(&format!("Amount [{}]: $", current.amount))?;
        let date = self
            .console
            .prompt(&format!("Balance Date [{}]: ", current.as_of_date))?;

        match self.editor(store).modify_income(index, &amount, &date) {
            Ok(_) => self.console.say("✓ Income modified successfully"),
            Err(e) => {
                tracing::warn!("modify income rejected: {e}");
                self.console
                    .say(format!("Invalid input: {}. No changes made.", e))
            }
        }
    }

    fn delete_income(&mut self, store: &mut RecordStore) -> BillcoverResult<()> {
        if store.income().is_empty() {
            return self.console.say("No income to delete.");
        }
        self.console.say(format_income_table(store.income()))?;

        let choice = self
            .console
            .prompt("\nEnter income number to delete (0 to cancel): ")?;
        match self.editor(store).delete_income(&choice) {
            Ok(Some(removed)) => self.console.say(format!(
                "✓ Deleted: {} - {}",
                removed.source, removed.amount
            )),
            Ok(None) => Ok(()),
            Err(e) => self.console.say(format!("Invalid income number: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    type TestSession<'a> = Session<'a, Cursor<Vec<u8>>, Vec<u8>>;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
    }

    fn session<'a>(settings: &'a Settings, input: &str) -> TestSession<'a> {
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Session::new(console, settings, today())
    }

    fn output(session: TestSession<'_>) -> String {
        String::from_utf8(session.into_console().into_output()).unwrap()
    }

    fn settings_in(dir: &TempDir) -> Settings {
        Settings {
            default_data_file: dir.path().join("out.csv").display().to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_manual_entry_session_saves_and_reports() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let input = "\
no
5
500
2026-02-12
Water
300
2026-02-08

1000
2026-02-10
5000
2026-02-10
no
";
        let mut s = session(&settings, input);
        let outcome = s.run().unwrap();

        match outcome {
            SessionOutcome::Completed {
                store,
                saved_to,
                report,
            } => {
                assert_eq!(store.expenses().len(), 2);
                assert_eq!(store.income().len(), 2);
                assert_eq!(saved_to, Some(dir.path().join("out.csv")));
                assert_eq!(report.transfer_amount, Money::from_dollars(500));
            }
            SessionOutcome::Aborted => panic!("session should complete"),
        }

        let text = output(s);
        assert!(text.contains("Added: Amex - $500.00 due on 2026-02-12"));
        assert!(text.contains("RECOMMENDED TRANSFER: $500.00"));
        assert!(dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_bad_manual_income_becomes_zero_balance() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let input = "no\n\nlots\n2026-02-10\n5000\n2026-02-10\nno\n";

        let mut s = session(&settings, input);
        let outcome = s.run().unwrap();

        let SessionOutcome::Completed { store, .. } = outcome else {
            panic!("session should complete");
        };
        assert_eq!(store.income()[0].amount, Money::zero());
        assert_eq!(store.income()[0].as_of_date, today());
        assert!(output(s).contains("Setting to 0."));
    }

    #[test]
    fn test_import_then_exit_without_saving() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let file = dir.path().join("bills.csv");
        let original = "Type,Payee,Bank,Amount,Due Date,Balance Date\nExpense,Amex,,120.00,2026-02-12,\n";
        std::fs::write(&file, original).unwrap();

        // review, delete #1, then exit
        let input = format!("yes\n{}\nyes\n4\n1\n0\n", file.display());
        let mut s = session(&settings, &input);
        let outcome = s.run().unwrap();

        assert!(matches!(outcome, SessionOutcome::Aborted));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), original);
        assert!(!dir.path().join("out.csv").exists());
        assert!(output(s).contains("Program terminated by user."));
    }

    #[test]
    fn test_import_review_edits_save_to_data_file() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let file = dir.path().join("bills.csv");
        let source = "Type,Payee,Bank,Amount,Due Date,Balance Date\n\
                      Expense,Amex,,120.00,2026-02-12,\n\
                      Income,,SCCU Checking,1000.00,,2026-02-09\n";
        std::fs::write(&file, source).unwrap();

        // modify expense 1 amount only, then continue
        let input = format!("y\n{}\ny\n3\n1\n\n150\n\n9\n", file.display());
        let mut s = session(&settings, &input);
        let outcome = s.run().unwrap();

        let SessionOutcome::Completed { store, saved_to, .. } = outcome else {
            panic!("session should complete");
        };
        assert_eq!(saved_to, Some(dir.path().join("out.csv")));
        assert_eq!(store.expenses()[0].payee, "Amex");
        assert_eq!(store.expenses()[0].amount, Money::from_dollars(150));

        let saved = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert!(saved.contains("Expense,Amex,,150.00,2026-02-12,"));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), source);
    }

    #[test]
    fn test_import_leaves_source_file_untouched() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let file = dir.path().join("bills.csv");
        let source = "Type,Payee,Bank,Amount,Due Date,Balance Date\n\
                      Expense,Amex,,120.00,2/12/2026,\n\
                      Transfer,note,,5,,\n";
        std::fs::write(&file, source).unwrap();

        let input = format!("yes\n{}\nno\n", file.display());
        let mut s = session(&settings, &input);
        let outcome = s.run().unwrap();

        assert!(matches!(outcome, SessionOutcome::Completed { .. }));
        assert_eq!(std::fs::read(&file).unwrap(), source.as_bytes());

        let saved = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert!(saved.contains("Expense,Amex,,120.00,2026-02-12,"));
        assert!(!saved.contains("Transfer"));
    }

    #[test]
    fn test_failed_import_falls_back_to_manual_entry() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let missing = dir.path().join("missing.csv");
        // no expenses, two balances, then decline the review
        let input = format!(
            "yes\n{}\n\n1\n2026-02-10\n2\n2026-02-10\nno\n",
            missing.display()
        );

        let mut s = session(&settings, &input);
        let outcome = s.run().unwrap();

        assert!(matches!(outcome, SessionOutcome::Completed { .. }));
        let text = output(s);
        assert!(text.contains("File not found"));
        assert!(text.contains("Failed to read CSV. Please enter data manually."));
    }

    #[test]
    fn test_menu_rejects_bad_choices_without_mutation() {
        let settings = Settings::default();
        let mut store = RecordStore::new();
        store.push_expense(crate::models::Expense::new(
            "Amex",
            Money::from_dollars(120),
            today(),
        ));
        let before = store.clone();

        // bad option, delete out of range, modify with bad date, exit
        let input = "42\n4\n7\n3\n1\n\n\nnot-a-date\n0\n";
        let mut s = session(&settings, input);
        let exit = s.manage_data(&mut store).unwrap();

        assert_eq!(exit, MenuExit::Exit);
        assert_eq!(store, before);
        let text = output(s);
        assert!(text.contains("Invalid option. Please try again."));
        assert!(text.contains("Invalid expense number"));
        assert!(text.contains("No changes made."));
    }

    #[test]
    fn test_menu_add_income_updates_existing_bank() {
        let settings = Settings::default();
        let mut store = RecordStore::new();
        store.upsert_income(IncomeEntry::new(
            "SCCU Checking",
            Money::from_dollars(1000),
            today(),
        ));

        let input = "6\n1\n1800\n2026-02-11\n5\n9\n";
        let mut s = session(&settings, input);
        let exit = s.manage_data(&mut store).unwrap();

        assert_eq!(exit, MenuExit::Continue);
        assert_eq!(store.income().len(), 1);
        assert_eq!(store.income()[0].amount, Money::from_dollars(1800));
        assert!(output(s).contains("✓ Updated: SCCU Checking - $1800.00"));
    }
}
