//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into
//! [`crate::ClinicService`]. Nothing in the core reads environment variables itself.

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR};
use crate::error::{ClinicError, ClinicResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    output_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `data_dir` is not required to exist yet; loading reports that. `output_dir` must
    /// not name an existing non-directory file.
    pub fn new(data_dir: PathBuf, output_dir: PathBuf) -> ClinicResult<Self> {
        if output_dir.as_os_str().is_empty() {
            return Err(ClinicError::InvalidInput(
                "output_dir cannot be empty".into(),
            ));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(ClinicError::InvalidInput(format!(
                "output_dir is not a directory: {}",
                output_dir.display()
            )));
        }

        Ok(Self {
            data_dir,
            output_dir,
        })
    }

    /// Directory the bulk loader reads from and the exporter writes to.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory generated documents are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Resolve the data directory from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    dir_or_default(value, DEFAULT_DATA_DIR)
}

/// Resolve the document output directory from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_OUTPUT_DIR`].
pub fn output_dir_from_env_value(value: Option<String>) -> PathBuf {
    dir_or_default(value, DEFAULT_OUTPUT_DIR)
}

fn dir_or_default(value: Option<String>, default: &str) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
