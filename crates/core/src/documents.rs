//! Plain-text documents for handing a single record to someone outside the system.
//!
//! Document format produced:
//! ```text
//! Referral R1
//! Generated: 2024-03-01T09:30:00+00:00
//! ===========
//! Referral ID: R1
//! Patient ID: P1
//! Notes: first line
//! second line
//! ```
//!
//! One labelled line per field, in column order. Values are written verbatim, so a
//! multi-line value continues on the following lines unchanged.

use crate::constants::{DOCUMENT_EXTENSION, REFERRAL_FILE_PREFIX};
use crate::entities::{Record, Referral};
use crate::error::{ClinicError, ClinicResult};
use crate::validation::validate_id_safe_for_file_name;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

/// Renders a record as a labelled plain-text document.
pub fn render_document<T: Record>(record: &T, generated_at: DateTime<Utc>) -> String {
    let title = format!("{} {}", T::KIND.title(), record.id());
    let mut out = String::new();

    out.push_str(&title);
    out.push('\n');
    out.push_str(&format!("Generated: {}\n", generated_at.to_rfc3339()));
    out.push_str(&"=".repeat(title.chars().count()));
    out.push('\n');

    for (label, value) in T::KIND.labels().iter().zip(record.values()) {
        out.push_str(label);
        out.push(':');
        if !value.is_empty() {
            out.push(' ');
            out.push_str(value);
        }
        out.push('\n');
    }

    out
}

/// Writes the document for `record` to `output_path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ClinicError::FileWrite`] if the file cannot be written.
pub fn generate_file<T: Record>(record: &T, output_path: &Path) -> ClinicResult<()> {
    let document = render_document(record, Utc::now());
    fs::write(output_path, document).map_err(ClinicError::FileWrite)?;

    tracing::info!(
        "wrote {} {} document to {}",
        T::KIND,
        record.id(),
        output_path.display()
    );
    Ok(())
}

/// Writes a referral document to `output_path`.
///
/// # Errors
///
/// Returns [`ClinicError::FileWrite`] if the file cannot be written.
pub fn generate_referral_file(referral: &Referral, output_path: &Path) -> ClinicResult<()> {
    generate_file(referral, output_path)
}

/// Conventional file name for a referral document: `referral_<id>.txt`.
///
/// # Errors
///
/// Returns [`ClinicError::InvalidInput`] if the ID cannot be embedded in a file name.
pub fn referral_file_name(referral_id: &str) -> ClinicResult<String> {
    validate_id_safe_for_file_name(referral_id)?;
    Ok(format!(
        "{REFERRAL_FILE_PREFIX}{referral_id}.{DOCUMENT_EXTENSION}"
    ))
}
