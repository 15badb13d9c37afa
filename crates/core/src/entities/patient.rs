//! Patient records.

use super::{EntityKind, Record};
use crate::repository::Repository;
use crate::store::ClinicStore;
use serde::{Deserialize, Serialize};

/// A registered patient. Patients reference no other record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Date of birth as entered.
    pub dob: String,
    pub gender: String,
    pub nhs_number: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub postcode: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub registration_date: String,
    pub gp_surgery: String,
}

impl Record for Patient {
    const KIND: EntityKind = EntityKind::Patient;

    fn id(&self) -> &str {
        &self.patient_id
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.patient_id.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.dob.as_str(),
            self.gender.as_str(),
            self.nhs_number.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.address.as_str(),
            self.postcode.as_str(),
            self.emergency_contact_name.as_str(),
            self.emergency_contact_phone.as_str(),
            self.registration_date.as_str(),
            self.gp_surgery.as_str(),
        ]
    }

    fn repository(store: &ClinicStore) -> &Repository<Self> {
        store.patients()
    }

    fn repository_mut(store: &mut ClinicStore) -> &mut Repository<Self> {
        store.patients_mut()
    }
}
