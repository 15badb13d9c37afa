//! # Clinic Core
//!
//! Core data layer for the clinic record-management application.
//!
//! This crate contains the in-memory store and everything that operates on it:
//! - Seven entity types (patients, clinicians, facilities, appointments,
//!   prescriptions, referrals, staff) keyed by caller-assigned IDs
//! - A generic ordered [`Repository`] per entity type and the [`ClinicStore`] holding them
//! - Advisory referential consistency reporting
//! - Bulk load from, and export to, a directory of delimited files
//! - Plain-text document generation for a single record (referral letters)
//!
//! **No presentation concerns**: tables, forms and dialogs are consumers of this crate.

pub mod config;
pub mod consistency;
pub mod constants;
pub mod documents;
pub mod entities;
pub mod error;
pub mod export;
pub mod loader;
pub mod repository;
pub mod store;
pub mod validation;

pub use clinic_types::{NonEmptyText, TextError};
pub use config::CoreConfig;
pub use consistency::{find_dangling_references, DanglingReference};
pub use documents::{generate_file, generate_referral_file, referral_file_name, render_document};
pub use entities::{
    Appointment, Clinician, EntityKind, Facility, Patient, Prescription, Record, Referral, Staff,
};
pub use error::{ClinicError, ClinicResult};
pub use export::save_data;
pub use loader::{load_data, FileLoad, LoadReport, LoadWarning};
pub use repository::Repository;
pub use store::ClinicStore;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Controller facade over a [`ClinicStore`] bound to a [`CoreConfig`].
///
/// Data-directory and output-directory operations use the configured paths; record
/// CRUD goes through [`ClinicService::store`] / [`ClinicService::store_mut`].
#[derive(Clone, Debug)]
pub struct ClinicService {
    cfg: Arc<CoreConfig>,
    store: ClinicStore,
}

impl ClinicService {
    /// Creates a service with an empty store.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            store: ClinicStore::new(),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn store(&self) -> &ClinicStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ClinicStore {
        &mut self.store
    }

    /// Loads the configured data directory; see [`loader::load_data`].
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::DataDirRead`] if the data directory is inaccessible.
    pub fn load(&mut self) -> ClinicResult<LoadReport> {
        load_data(&mut self.store, self.cfg.data_dir())
    }

    /// Exports the store into the configured data directory; see [`export::save_data`].
    pub fn save(&self) -> ClinicResult<()> {
        save_data(&self.store, self.cfg.data_dir())
    }

    /// Reports references whose target record is missing.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        find_dangling_references(&self.store)
    }

    /// Writes `referral_<id>.txt` for the stored referral into the output directory.
    ///
    /// # Returns
    ///
    /// The path written, or `None` if no referral is stored under `referral_id`.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError` if:
    /// - the ID cannot be used in a file name ([`ClinicError::InvalidInput`]),
    /// - the output directory cannot be created ([`ClinicError::StorageDirCreation`]),
    /// - the file cannot be written ([`ClinicError::FileWrite`]).
    pub fn generate_referral(&self, referral_id: &str) -> ClinicResult<Option<PathBuf>> {
        let Some(referral) = self.store.find::<Referral>(referral_id) else {
            tracing::warn!("no referral {} to generate", referral_id);
            return Ok(None);
        };

        let file_name = referral_file_name(referral.id())?;
        let output_dir = self.cfg.output_dir();
        fs::create_dir_all(output_dir).map_err(ClinicError::StorageDirCreation)?;

        let path = output_dir.join(file_name);
        generate_referral_file(referral, &path)?;
        Ok(Some(path))
    }
}
