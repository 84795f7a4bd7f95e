//! Audit log viewing command

use crate::audit::AuditLogger;
use crate::config::BillcoverPaths;
use crate::error::BillcoverResult;

/// Format the most recent `limit` audit entries, newest last
pub fn format_recent_entries(logger: &AuditLogger, limit: usize) -> BillcoverResult<String> {
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        return Ok("No audit entries recorded yet.".to_string());
    }

    Ok(entries
        .iter()
        .map(|e| e.format_human_readable())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Handle `billcover audit`
pub fn handle_audit_command(paths: &BillcoverPaths, limit: usize) -> BillcoverResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    println!("{}", format_recent_entries(&logger, limit)?);
    Ok(())
}
