//! Appointment records.

use super::{references, EntityKind, Record, Reference};
use crate::repository::Repository;
use crate::store::ClinicStore;
use serde::{Deserialize, Serialize};

/// A booked appointment linking a patient, a clinician and a facility.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "appointmentID")]
    pub appointment_id: String,
    #[serde(rename = "patientID")]
    pub patient_id: String,
    #[serde(rename = "clinicianID")]
    pub clinician_id: String,
    #[serde(rename = "facilityID")]
    pub facility_id: String,
    pub date: String,
    pub time: String,
    /// Semantically an integer, stored as entered.
    pub duration_minutes: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: String,
    pub reason: String,
    pub notes: String,
    pub created_date: String,
    pub last_modified: String,
}

impl Record for Appointment {
    const KIND: EntityKind = EntityKind::Appointment;

    fn id(&self) -> &str {
        &self.appointment_id
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.appointment_id.as_str(),
            self.patient_id.as_str(),
            self.clinician_id.as_str(),
            self.facility_id.as_str(),
            self.date.as_str(),
            self.time.as_str(),
            self.duration_minutes.as_str(),
            self.appointment_type.as_str(),
            self.status.as_str(),
            self.reason.as_str(),
            self.notes.as_str(),
            self.created_date.as_str(),
            self.last_modified.as_str(),
        ]
    }

    fn references(&self) -> Vec<Reference<'_>> {
        references([
            ("patientID", EntityKind::Patient, self.patient_id.as_str()),
            ("clinicianID", EntityKind::Clinician, self.clinician_id.as_str()),
            ("facilityID", EntityKind::Facility, self.facility_id.as_str()),
        ])
    }

    fn repository(store: &ClinicStore) -> &Repository<Self> {
        store.appointments()
    }

    fn repository_mut(store: &mut ClinicStore) -> &mut Repository<Self> {
        store.appointments_mut()
    }
}
