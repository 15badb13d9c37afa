//! The in-memory clinic store: one repository per entity type.
//!
//! All CRUD entry points are generic over [`Record`], so `store.add(patient)` and
//! `store.delete::<Referral>("R1")` share the same code path for every entity kind.

use crate::entities::{
    Appointment, Clinician, EntityKind, Facility, Patient, Prescription, Record, Referral, Staff,
};
use crate::error::ClinicResult;
use crate::repository::Repository;
use std::collections::BTreeMap;

/// Holds the seven entity repositories.
///
/// The store is single-owner and synchronous. Sharing it between threads requires
/// wrapping the whole store in a lock so that every operation stays serialised.
#[derive(Clone, Debug, Default)]
pub struct ClinicStore {
    patients: Repository<Patient>,
    clinicians: Repository<Clinician>,
    facilities: Repository<Facility>,
    appointments: Repository<Appointment>,
    prescriptions: Repository<Prescription>,
    referrals: Repository<Referral>,
    staff: Repository<Staff>,
}

impl ClinicStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Generic CRUD
    // ------------------------------------------------------------------------

    /// Adds a record; see [`Repository::add`].
    pub fn add<T: Record>(&mut self, record: T) -> ClinicResult<()> {
        T::repository_mut(self).add(record)
    }

    /// Inserts or replaces a record; see [`Repository::upsert`].
    pub fn upsert<T: Record>(&mut self, record: T) -> ClinicResult<Option<T>> {
        T::repository_mut(self).upsert(record)
    }

    /// Replaces the record stored under `old_id`; see [`Repository::update`].
    pub fn update<T: Record>(&mut self, old_id: &str, record: T) -> ClinicResult<Option<T>> {
        T::repository_mut(self).update(old_id, record)
    }

    /// Deletes a record by key. Absent keys are ignored.
    pub fn delete<T: Record>(&mut self, id: &str) -> Option<T> {
        T::repository_mut(self).delete(id)
    }

    /// Returns a copy of all records of type `T`, in insertion order.
    pub fn get_all<T: Record>(&self) -> Vec<T> {
        T::repository(self).get_all()
    }

    pub fn find<T: Record>(&self, id: &str) -> Option<&T> {
        T::repository(self).find(id)
    }

    /// Whether a record of the given kind exists under `id`.
    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        match kind {
            EntityKind::Patient => self.patients.contains(id),
            EntityKind::Clinician => self.clinicians.contains(id),
            EntityKind::Facility => self.facilities.contains(id),
            EntityKind::Appointment => self.appointments.contains(id),
            EntityKind::Prescription => self.prescriptions.contains(id),
            EntityKind::Referral => self.referrals.contains(id),
            EntityKind::Staff => self.staff.contains(id),
        }
    }

    /// Number of records held for a kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Patient => self.patients.len(),
            EntityKind::Clinician => self.clinicians.len(),
            EntityKind::Facility => self.facilities.len(),
            EntityKind::Appointment => self.appointments.len(),
            EntityKind::Prescription => self.prescriptions.len(),
            EntityKind::Referral => self.referrals.len(),
            EntityKind::Staff => self.staff.len(),
        }
    }

    /// Record counts for every kind.
    pub fn counts(&self) -> BTreeMap<EntityKind, usize> {
        EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, self.count(kind)))
            .collect()
    }

    /// Empties every repository.
    pub fn clear(&mut self) {
        self.patients.clear();
        self.clinicians.clear();
        self.facilities.clear();
        self.appointments.clear();
        self.prescriptions.clear();
        self.referrals.clear();
        self.staff.clear();
    }

    // ------------------------------------------------------------------------
    // Typed repository access
    // ------------------------------------------------------------------------

    pub fn patients(&self) -> &Repository<Patient> {
        &self.patients
    }

    pub fn patients_mut(&mut self) -> &mut Repository<Patient> {
        &mut self.patients
    }

    pub fn clinicians(&self) -> &Repository<Clinician> {
        &self.clinicians
    }

    pub fn clinicians_mut(&mut self) -> &mut Repository<Clinician> {
        &mut self.clinicians
    }

    pub fn facilities(&self) -> &Repository<Facility> {
        &self.facilities
    }

    pub fn facilities_mut(&mut self) -> &mut Repository<Facility> {
        &mut self.facilities
    }

    pub fn appointments(&self) -> &Repository<Appointment> {
        &self.appointments
    }

    pub fn appointments_mut(&mut self) -> &mut Repository<Appointment> {
        &mut self.appointments
    }

    pub fn prescriptions(&self) -> &Repository<Prescription> {
        &self.prescriptions
    }

    pub fn prescriptions_mut(&mut self) -> &mut Repository<Prescription> {
        &mut self.prescriptions
    }

    pub fn referrals(&self) -> &Repository<Referral> {
        &self.referrals
    }

    pub fn referrals_mut(&mut self) -> &mut Repository<Referral> {
        &mut self.referrals
    }

    pub fn staff(&self) -> &Repository<Staff> {
        &self.staff
    }

    pub fn staff_mut(&mut self) -> &mut Repository<Staff> {
        &mut self.staff
    }
}
