//! Date parsing
//!
//! Accepts the handful of date spellings found in hand-maintained bill
//! files. The format order is significant: "03/04/2026" reads as March 4
//! because month/day/year is tried before day/month/year. Changing the
//! order changes what existing files mean.

use chrono::NaiveDate;

use crate::error::{BillcoverError, BillcoverResult};

/// Canonical format for display and export
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Accepted input formats, in priority order
pub const ACCEPTED_FORMATS: [&str; 6] = [
    ISO_FORMAT, // 2026-02-10
    "%m/%d/%Y", // 2/10/2026
    "%m-%d-%Y", // 2-10-2026
    "%Y/%m/%d", // 2026/02/10
    "%d/%m/%Y", // 25/02/2026
    "%d-%m-%Y", // 25-02-2026
];

/// Parse a date using the first accepted format that matches
pub fn parse_date(token: &str) -> BillcoverResult<NaiveDate> {
    let trimmed = token.trim();

    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| BillcoverError::InvalidDate(trimmed.to_string()))
}

/// Render a date in canonical ISO form
pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}
