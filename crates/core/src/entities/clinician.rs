use super::{EntityKind, Record};
use crate::repository::Repository;
use crate::store::ClinicStore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clinician {
    #[serde(rename = "clinicianID")]
    pub clinician_id: String,
    pub first_name: String,
    pub last_name: String,
    pub qualification: String,
    pub specialty: String,
    /// General Medical Council registration number.
    pub gmc_number: String,
    pub workplace: String,
    pub workplace_type: String,
    pub employment_status: String,
    pub start_date: String,
    pub email: String,
    pub phone: String,
}

impl Record for Clinician {
    const KIND: EntityKind = EntityKind::Clinician;

    fn id(&self) -> &str {
        &self.clinician_id
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.clinician_id.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.qualification.as_str(),
            self.specialty.as_str(),
            self.gmc_number.as_str(),
            self.workplace.as_str(),
            self.workplace_type.as_str(),
            self.employment_status.as_str(),
            self.start_date.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        ]
    }

    fn repository(store: &ClinicStore) -> &Repository<Self> {
        store.clinicians()
    }

    fn repository_mut(store: &mut ClinicStore) -> &mut Repository<Self> {
        store.clinicians_mut()
    }
}
