//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use super::error::{LedgerError, LedgerResult};

// ── Text length limits ──────────────────────────────────────────────

/// Period titles
pub const MAX_TITLE_LEN: usize = 200;

/// Entry notes
pub const MAX_NOTE_LEN: usize = 500;

/// Caller-supplied ids (player ids, entry ids)
pub const MAX_ID_LEN: usize = 128;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> LedgerResult<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(LedgerError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> LedgerResult<()> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(LedgerError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Validate a caller-supplied identifier.
pub fn validate_id(value: &str, field: &str) -> LedgerResult<()> {
    validate_required_text(value, field, MAX_ID_LEN)
}
