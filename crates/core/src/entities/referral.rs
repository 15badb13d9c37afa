//! Referral records.
//!
//! A referral hands a patient over from one clinician and facility to another. It is
//! the only record kind the application renders into a standalone document; see
//! [`crate::documents::generate_referral_file`].

use super::{references, EntityKind, Record, Reference};
use crate::repository::Repository;
use crate::store::ClinicStore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    #[serde(rename = "referralID")]
    pub referral_id: String,
    #[serde(rename = "patientID")]
    pub patient_id: String,
    #[serde(rename = "referringClinicianID")]
    pub referring_clinician_id: String,
    #[serde(rename = "receivingClinicianID")]
    pub receiving_clinician_id: String,
    /// Facility ID of the referring site.
    pub referring_facility: String,
    /// Facility ID of the receiving site.
    pub receiving_facility: String,
    pub date: String,
    pub urgency: String,
    pub referral_reason: String,
    pub clinical_summary: String,
    pub requested_investigations: String,
    #[serde(rename = "appointmentID")]
    pub appointment_id: String,
    pub notes: String,
    pub status: String,
    pub created_date: String,
    pub last_updated: String,
}

impl Record for Referral {
    const KIND: EntityKind = EntityKind::Referral;

    fn id(&self) -> &str {
        &self.referral_id
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.referral_id.as_str(),
            self.patient_id.as_str(),
            self.referring_clinician_id.as_str(),
            self.receiving_clinician_id.as_str(),
            self.referring_facility.as_str(),
            self.receiving_facility.as_str(),
            self.date.as_str(),
            self.urgency.as_str(),
            self.referral_reason.as_str(),
            self.clinical_summary.as_str(),
            self.requested_investigations.as_str(),
            self.appointment_id.as_str(),
            self.notes.as_str(),
            self.status.as_str(),
            self.created_date.as_str(),
            self.last_updated.as_str(),
        ]
    }

    fn references(&self) -> Vec<Reference<'_>> {
        references([
            ("patientID", EntityKind::Patient, self.patient_id.as_str()),
            (
                "referringClinicianID",
                EntityKind::Clinician,
                self.referring_clinician_id.as_str(),
            ),
            (
                "receivingClinicianID",
                EntityKind::Clinician,
                self.receiving_clinician_id.as_str(),
            ),
            (
                "referringFacility",
                EntityKind::Facility,
                self.referring_facility.as_str(),
            ),
            (
                "receivingFacility",
                EntityKind::Facility,
                self.receiving_facility.as_str(),
            ),
            (
                "appointmentID",
                EntityKind::Appointment,
                self.appointment_id.as_str(),
            ),
        ])
    }

    fn repository(store: &ClinicStore) -> &Repository<Self> {
        store.referrals()
    }

    fn repository_mut(store: &mut ClinicStore) -> &mut Repository<Self> {
        store.referrals_mut()
    }
}
