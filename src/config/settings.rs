//! User settings for billcover
//!
//! Holds the constants the transfer calculation depends on (safety margin,
//! which income sources are checking and savings) plus the suggestion lists
//! shown during data entry.

use serde::{Deserialize, Serialize};

use super::paths::BillcoverPaths;
use crate::error::BillcoverError;
use crate::models::Money;
use crate::services::transfer::TransferConfig;

/// User settings for billcover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Buffer kept in checking on top of upcoming bills
    #[serde(default = "default_safety_margin")]
    pub safety_margin: Money,

    /// Income source label treated as the checking account
    #[serde(default = "default_checking_label")]
    pub checking_label: String,

    /// Income source label treated as the savings account
    #[serde(default = "default_savings_label")]
    pub savings_label: String,

    /// Payee names offered by number when adding an expense
    #[serde(default = "default_payee_suggestions")]
    pub payee_suggestions: Vec<String>,

    /// Bank names offered by number when adding income
    #[serde(default = "default_income_sources")]
    pub income_sources: Vec<String>,

    /// File written when the session did not start from an imported file
    #[serde(default = "default_data_file")]
    pub default_data_file: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_safety_margin() -> Money {
    Money::from_dollars(1000)
}

fn default_checking_label() -> String {
    "SCCU Checking".to_string()
}

fn default_savings_label() -> String {
    "E-Trade Savings".to_string()
}

fn default_payee_suggestions() -> Vec<String> {
    [
        "Ameritus",
        "Capital One",
        "Chase Visa",
        "Medicare N",
        "Amex",
        "HOA Q",
        "HOA M",
        "Citibank Visa",
        "Apple card RG",
        "Apple card YG",
        "United Health",
        "Medicare Pre",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_income_sources() -> Vec<String> {
    vec![default_checking_label(), default_savings_label()]
}

fn default_data_file() -> String {
    "expense_income_data.csv".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            safety_margin: default_safety_margin(),
            checking_label: default_checking_label(),
            savings_label: default_savings_label(),
            payee_suggestions: default_payee_suggestions(),
            income_sources: default_income_sources(),
            default_data_file: default_data_file(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BillcoverPaths) -> Result<Self, BillcoverError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BillcoverError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BillcoverError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BillcoverPaths) -> Result<(), BillcoverError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BillcoverError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            BillcoverError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject settings the calculation cannot work with
    pub fn validate(&self) -> Result<(), BillcoverError> {
        if self.checking_label.trim().is_empty() || self.savings_label.trim().is_empty() {
            return Err(BillcoverError::Config(
                "checking_label and savings_label must not be empty".into(),
            ));
        }
        if self.checking_label == self.savings_label {
            return Err(BillcoverError::Config(
                "checking_label and savings_label must differ".into(),
            ));
        }
        if self.safety_margin.is_negative() {
            return Err(BillcoverError::Config(
                "safety_margin cannot be negative".into(),
            ));
        }
        Ok(())
    }

    /// The constants the transfer calculator needs
    pub fn transfer_config(&self) -> TransferConfig {
        TransferConfig {
            safety_margin: self.safety_margin,
            checking_label: self.checking_label.clone(),
            savings_label: self.savings_label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.safety_margin, Money::from_dollars(1000));
        assert_eq!(settings.payee_suggestions.len(), 12);
        assert_eq!(
            settings.income_sources,
            vec!["SCCU Checking".to_string(), "E-Trade Savings".to_string()]
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillcoverPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.safety_margin = Money::from_dollars(750);
        settings.checking_label = "Main Checking".into();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"safety_margin": 50000}"#).unwrap();
        assert_eq!(settings.safety_margin, Money::from_dollars(500));
        assert_eq!(settings.checking_label, "SCCU Checking");
        assert_eq!(settings.default_data_file, "expense_income_data.csv");
    }

    #[test]
    fn test_identical_labels_rejected() {
        let settings = Settings {
            savings_label: "SCCU Checking".into(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(BillcoverError::Config(_))
        ));
    }

    #[test]
    fn test_transfer_config() {
        let config = Settings::default().transfer_config();
        assert_eq!(config.safety_margin, Money::from_dollars(1000));
        assert_eq!(config.savings_label, "E-Trade Savings");
    }
}
