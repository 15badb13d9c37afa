//! Input validation utilities.
//!
//! Record identifiers are free-form text, which is fine for in-memory keys but not when
//! an ID becomes part of a path on disk.

use crate::error::{ClinicError, ClinicResult};

/// Validates that a record ID can be embedded in a single file name component.
///
/// - Rejects empty or whitespace-only strings
/// - Bounds the length to avoid pathological inputs
/// - Rejects path separators, `..` and control characters
///
/// # Errors
///
/// Returns a `ClinicError::InvalidInput` if the ID is unsafe.
pub fn validate_id_safe_for_file_name(id: &str) -> ClinicResult<()> {
    const MAX_ID_LEN: usize = 128;

    if id.trim().is_empty() {
        return Err(ClinicError::InvalidInput("id cannot be empty".into()));
    }

    if id.len() > MAX_ID_LEN {
        return Err(ClinicError::InvalidInput(format!(
            "id exceeds maximum length of {} characters",
            MAX_ID_LEN
        )));
    }

    if id.contains("..") {
        return Err(ClinicError::InvalidInput(
            "id must not contain '..'".into(),
        ));
    }

    if id.chars().any(|c| matches!(c, '/' | '\\') || c.is_control()) {
        return Err(ClinicError::InvalidInput(
            "id contains path separators or control characters".into(),
        ));
    }

    Ok(())
}
