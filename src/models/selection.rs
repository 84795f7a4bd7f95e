//! Numbered-list selections
//!
//! Lists are shown to the user numbered from 1. Entering 0 cancels.

use crate::error::{BillcoverError, BillcoverResult};

/// The outcome of choosing an entry by its displayed position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The user entered 0
    Cancel,
    /// Zero-based index into the list
    Index(usize),
}

impl Selection {
    /// Interpret user input against a list of `len` entries
    pub fn parse(input: &str, len: usize) -> BillcoverResult<Self> {
        let trimmed = input.trim();
        let position: usize = trimmed
            .parse()
            .map_err(|_| BillcoverError::InvalidSelection(trimmed.to_string()))?;
        Self::from_position(position, len)
    }

    /// Interpret an already-numeric 1-based position
    pub fn from_position(position: usize, len: usize) -> BillcoverResult<Self> {
        match position {
            0 => Ok(Self::Cancel),
            p if p <= len => Ok(Self::Index(p - 1)),
            p => Err(BillcoverError::InvalidSelection(p.to_string())),
        }
    }
}

/// Resolve a "name or number" answer against a list of suggestions
///
/// All-digit input selects by 1-based position; anything else is taken
/// as a free-text name.
pub fn pick_label(input: &str, suggestions: &[String]) -> BillcoverResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BillcoverError::Validation("Name cannot be empty".into()));
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return match Selection::parse(trimmed, suggestions.len())? {
            Selection::Index(idx) => Ok(suggestions[idx].clone()),
            Selection::Cancel => Err(BillcoverError::InvalidSelection(trimmed.to_string())),
        };
    }

    Ok(trimmed.to_string())
}
