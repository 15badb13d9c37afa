//! Facility records (surgeries, hospitals, clinics).

use super::{EntityKind, Record};
use crate::repository::Repository;
use crate::store::ClinicStore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    #[serde(rename = "facilityID")]
    pub facility_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: String,
    pub address: String,
    pub postcode: String,
    pub phone: String,
    pub email: String,
    pub opening_hours: String,
    pub manager_name: String,
    pub services: String,
    /// Semantically an integer, stored as entered.
    pub capacity: String,
}

impl Record for Facility {
    const KIND: EntityKind = EntityKind::Facility;

    fn id(&self) -> &str {
        &self.facility_id
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.facility_id.as_str(),
            self.name.as_str(),
            self.facility_type.as_str(),
            self.address.as_str(),
            self.postcode.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.opening_hours.as_str(),
            self.manager_name.as_str(),
            self.services.as_str(),
            self.capacity.as_str(),
        ]
    }

    fn repository(store: &ClinicStore) -> &Repository<Self> {
        store.facilities()
    }

    fn repository_mut(store: &mut ClinicStore) -> &mut Repository<Self> {
        store.facilities_mut()
    }
}
