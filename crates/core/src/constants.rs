//! Constants used throughout the clinic core crate.
//!
//! File names and defaults live here so the loader, the exporter and the runner
//! agree on the on-disk layout of a data directory.

/// Default data directory when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default directory for generated documents.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Field delimiter for bulk load and export files.
pub const DELIMITER: u8 = b',';

/// Filename for patient records.
pub const PATIENTS_FILENAME: &str = "patients.csv";

/// Filename for clinician records.
pub const CLINICIANS_FILENAME: &str = "clinicians.csv";

/// Filename for facility records.
pub const FACILITIES_FILENAME: &str = "facilities.csv";

/// Filename for appointment records.
pub const APPOINTMENTS_FILENAME: &str = "appointments.csv";

/// Filename for prescription records.
pub const PRESCRIPTIONS_FILENAME: &str = "prescriptions.csv";

/// Filename for referral records.
pub const REFERRALS_FILENAME: &str = "referrals.csv";

/// Filename for staff records.
pub const STAFF_FILENAME: &str = "staff.csv";

/// Prefix for generated referral documents: `referral_<id>.txt`.
pub const REFERRAL_FILE_PREFIX: &str = "referral_";

/// Extension for generated documents.
pub const DOCUMENT_EXTENSION: &str = "txt";
