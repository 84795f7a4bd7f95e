//! Configuration module for billcover
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BillcoverPaths;
pub use settings::Settings;
