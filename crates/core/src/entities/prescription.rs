//! Prescription records.

use super::{references, EntityKind, Record, Reference};
use crate::repository::Repository;
use crate::store::ClinicStore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(rename = "prescriptionID")]
    pub prescription_id: String,
    #[serde(rename = "patientID")]
    pub patient_id: String,
    #[serde(rename = "clinicianID")]
    pub clinician_id: String,
    #[serde(rename = "appointmentID")]
    pub appointment_id: String,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub duration_days: String,
    /// Semantically an integer, stored as entered.
    pub quantity: String,
    pub pharmacy: String,
    pub date_prescribed: String,
    pub issue_date: String,
    pub collection_date: String,
    pub collection_status: String,
    pub notes: String,
}

impl Record for Prescription {
    const KIND: EntityKind = EntityKind::Prescription;

    fn id(&self) -> &str {
        &self.prescription_id
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.prescription_id.as_str(),
            self.patient_id.as_str(),
            self.clinician_id.as_str(),
            self.appointment_id.as_str(),
            self.medication.as_str(),
            self.dosage.as_str(),
            self.frequency.as_str(),
            self.duration_days.as_str(),
            self.quantity.as_str(),
            self.pharmacy.as_str(),
            self.date_prescribed.as_str(),
            self.issue_date.as_str(),
            self.collection_date.as_str(),
            self.collection_status.as_str(),
            self.notes.as_str(),
        ]
    }

    fn references(&self) -> Vec<Reference<'_>> {
        references([
            ("patientID", EntityKind::Patient, self.patient_id.as_str()),
            ("clinicianID", EntityKind::Clinician, self.clinician_id.as_str()),
            (
                "appointmentID",
                EntityKind::Appointment,
                self.appointment_id.as_str(),
            ),
        ])
    }

    fn repository(store: &ClinicStore) -> &Repository<Self> {
        store.prescriptions()
    }

    fn repository_mut(store: &mut ClinicStore) -> &mut Repository<Self> {
        store.prescriptions_mut()
    }
}
