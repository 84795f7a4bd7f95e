//! Path management for billcover
//!
//! ## Path Resolution Order
//!
//! 1. `BILLCOVER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/billcover` or `~/.config/billcover`
//! 3. Windows: `%APPDATA%\billcover`

use std::path::PathBuf;

use crate::error::BillcoverError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BILLCOVER_DATA_DIR";

/// Manages all paths used by billcover
#[derive(Debug, Clone)]
pub struct BillcoverPaths {
    base_dir: PathBuf,
}

impl BillcoverPaths {
    /// Create a new BillcoverPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BillcoverError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BillcoverPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), BillcoverError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BillcoverError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if billcover has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BillcoverError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("billcover"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| BillcoverError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join("billcover"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BillcoverError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BillcoverError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("billcover"))
}
