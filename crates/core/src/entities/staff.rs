use super::{references, EntityKind, Record, Reference};
use crate::repository::Repository;
use crate::store::ClinicStore;
use serde::{Deserialize, Serialize};

/// A non-clinical staff member attached to a facility.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(rename = "staffID")]
    pub staff_id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub department: String,
    #[serde(rename = "facilityID")]
    pub facility_id: String,
    pub email: String,
    pub phone: String,
    pub employment_status: String,
    pub start_date: String,
    pub line_manager: String,
    pub access_level: String,
}

impl Record for Staff {
    const KIND: EntityKind = EntityKind::Staff;

    fn id(&self) -> &str {
        &self.staff_id
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.staff_id.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.role.as_str(),
            self.department.as_str(),
            self.facility_id.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.employment_status.as_str(),
            self.start_date.as_str(),
            self.line_manager.as_str(),
            self.access_level.as_str(),
        ]
    }

    fn references(&self) -> Vec<Reference<'_>> {
        references([("facilityID", EntityKind::Facility, self.facility_id.as_str())])
    }

    fn repository(store: &ClinicStore) -> &Repository<Self> {
        store.staff()
    }

    fn repository_mut(store: &mut ClinicStore) -> &mut Repository<Self> {
        store.staff_mut()
    }
}
