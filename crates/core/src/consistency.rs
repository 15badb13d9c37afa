//! Referential consistency reporting.
//!
//! References between records are advisory: an appointment may be stored before its
//! patient exists. This module only reports links whose target is missing. It never
//! blocks or repairs anything.

use crate::entities::{EntityKind, Record};
use crate::repository::Repository;
use crate::store::ClinicStore;
use std::fmt;

/// A reference field whose target record is not present in the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingReference {
    /// Kind of the record holding the reference.
    pub entity: EntityKind,
    /// Key of the record holding the reference.
    pub entity_id: String,
    /// Column name of the reference field.
    pub field: &'static str,
    /// Kind the field points at.
    pub target: EntityKind,
    /// The referenced key that could not be found.
    pub missing_id: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} -> missing {} {}",
            self.entity, self.entity_id, self.field, self.target, self.missing_id
        )
    }
}

/// Lists every dangling reference in the store.
///
/// Results are ordered by entity kind (canonical order), then by record insertion
/// order, then by field order within the record. Blank reference fields are not
/// considered references.
pub fn find_dangling_references(store: &ClinicStore) -> Vec<DanglingReference> {
    let mut dangling = Vec::new();

    collect(store, store.patients(), &mut dangling);
    collect(store, store.clinicians(), &mut dangling);
    collect(store, store.facilities(), &mut dangling);
    collect(store, store.appointments(), &mut dangling);
    collect(store, store.prescriptions(), &mut dangling);
    collect(store, store.referrals(), &mut dangling);
    collect(store, store.staff(), &mut dangling);

    dangling
}

fn collect<T: Record>(
    store: &ClinicStore,
    repository: &Repository<T>,
    out: &mut Vec<DanglingReference>,
) {
    for record in repository {
        for reference in record.references() {
            if !store.contains(reference.target, reference.id) {
                out.push(DanglingReference {
                    entity: T::KIND,
                    entity_id: record.id().to_string(),
                    field: reference.field,
                    target: reference.target,
                    missing_id: reference.id.to_string(),
                });
            }
        }
    }
}
