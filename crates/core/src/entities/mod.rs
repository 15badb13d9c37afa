//! Record types held by the clinic store.
//!
//! Every entity is a flat record keyed by a caller-assigned textual identifier. Fields
//! are declared in the same order as the columns of the entity's bulk-load file, and
//! all of them are strings: numeric-looking values such as durations, capacities and
//! quantities are kept exactly as entered.
//!
//! Cross-entity links (an appointment's patient, a staff member's facility, ...) are
//! advisory. They are exposed through [`Record::references`] so the consistency layer
//! can report dangling links, but nothing prevents storing a record whose referents do
//! not exist yet.

pub mod appointment;
pub mod clinician;
pub mod facility;
pub mod patient;
pub mod prescription;
pub mod referral;
pub mod staff;

pub use appointment::Appointment;
pub use clinician::Clinician;
pub use facility::Facility;
pub use patient::Patient;
pub use prescription::Prescription;
pub use referral::Referral;
pub use staff::Staff;

use crate::constants::{
    APPOINTMENTS_FILENAME, CLINICIANS_FILENAME, FACILITIES_FILENAME, PATIENTS_FILENAME,
    PRESCRIPTIONS_FILENAME, REFERRALS_FILENAME, STAFF_FILENAME,
};
use crate::repository::Repository;
use crate::store::ClinicStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ENTITY KINDS
// ============================================================================

/// The seven record kinds managed by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Patient,
    Clinician,
    Facility,
    Appointment,
    Prescription,
    Referral,
    Staff,
}

impl EntityKind {
    /// All kinds in canonical order. Loading, exporting and consistency reports walk
    /// the kinds in this order.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Patient,
        EntityKind::Clinician,
        EntityKind::Facility,
        EntityKind::Appointment,
        EntityKind::Prescription,
        EntityKind::Referral,
        EntityKind::Staff,
    ];

    /// Lower-case singular name, as used in log lines and reports.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Patient => "patient",
            EntityKind::Clinician => "clinician",
            EntityKind::Facility => "facility",
            EntityKind::Appointment => "appointment",
            EntityKind::Prescription => "prescription",
            EntityKind::Referral => "referral",
            EntityKind::Staff => "staff",
        }
    }

    /// Capitalised name used as a document title.
    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Patient => "Patient",
            EntityKind::Clinician => "Clinician",
            EntityKind::Facility => "Facility",
            EntityKind::Appointment => "Appointment",
            EntityKind::Prescription => "Prescription",
            EntityKind::Referral => "Referral",
            EntityKind::Staff => "Staff",
        }
    }

    /// Name of the bulk-load file holding records of this kind.
    pub fn file_name(self) -> &'static str {
        match self {
            EntityKind::Patient => PATIENTS_FILENAME,
            EntityKind::Clinician => CLINICIANS_FILENAME,
            EntityKind::Facility => FACILITIES_FILENAME,
            EntityKind::Appointment => APPOINTMENTS_FILENAME,
            EntityKind::Prescription => PRESCRIPTIONS_FILENAME,
            EntityKind::Referral => REFERRALS_FILENAME,
            EntityKind::Staff => STAFF_FILENAME,
        }
    }

    /// Header names of the bulk-load file, in field order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::Patient => &[
                "patientID",
                "firstName",
                "lastName",
                "dob",
                "gender",
                "nhsNumber",
                "email",
                "phone",
                "address",
                "postcode",
                "emergencyContactName",
                "emergencyContactPhone",
                "registrationDate",
                "gpSurgery",
            ],
            EntityKind::Clinician => &[
                "clinicianID",
                "firstName",
                "lastName",
                "qualification",
                "specialty",
                "gmcNumber",
                "workplace",
                "workplaceType",
                "employmentStatus",
                "startDate",
                "email",
                "phone",
            ],
            EntityKind::Facility => &[
                "facilityID",
                "name",
                "type",
                "address",
                "postcode",
                "phone",
                "email",
                "openingHours",
                "managerName",
                "services",
                "capacity",
            ],
            EntityKind::Appointment => &[
                "appointmentID",
                "patientID",
                "clinicianID",
                "facilityID",
                "date",
                "time",
                "durationMinutes",
                "type",
                "status",
                "reason",
                "notes",
                "createdDate",
                "lastModified",
            ],
            EntityKind::Prescription => &[
                "prescriptionID",
                "patientID",
                "clinicianID",
                "appointmentID",
                "medication",
                "dosage",
                "frequency",
                "durationDays",
                "quantity",
                "pharmacy",
                "datePrescribed",
                "issueDate",
                "collectionDate",
                "collectionStatus",
                "notes",
            ],
            EntityKind::Referral => &[
                "referralID",
                "patientID",
                "referringClinicianID",
                "receivingClinicianID",
                "referringFacility",
                "receivingFacility",
                "date",
                "urgency",
                "referralReason",
                "clinicalSummary",
                "requestedInvestigations",
                "appointmentID",
                "notes",
                "status",
                "createdDate",
                "lastUpdated",
            ],
            EntityKind::Staff => &[
                "staffID",
                "firstName",
                "lastName",
                "role",
                "department",
                "facilityID",
                "email",
                "phone",
                "employmentStatus",
                "startDate",
                "lineManager",
                "accessLevel",
            ],
        }
    }

    /// Human-readable field labels, parallel to [`EntityKind::columns`].
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            EntityKind::Patient => &[
                "Patient ID",
                "First Name",
                "Last Name",
                "Date of Birth",
                "Gender",
                "NHS Number",
                "Email",
                "Phone",
                "Address",
                "Postcode",
                "Emergency Contact Name",
                "Emergency Contact Phone",
                "Registration Date",
                "GP Surgery",
            ],
            EntityKind::Clinician => &[
                "Clinician ID",
                "First Name",
                "Last Name",
                "Qualification",
                "Specialty",
                "GMC Number",
                "Workplace",
                "Workplace Type",
                "Employment Status",
                "Start Date",
                "Email",
                "Phone",
            ],
            EntityKind::Facility => &[
                "Facility ID",
                "Name",
                "Type",
                "Address",
                "Postcode",
                "Phone",
                "Email",
                "Opening Hours",
                "Manager",
                "Services",
                "Capacity",
            ],
            EntityKind::Appointment => &[
                "Appointment ID",
                "Patient ID",
                "Clinician ID",
                "Facility ID",
                "Date",
                "Time",
                "Duration (minutes)",
                "Type",
                "Status",
                "Reason",
                "Notes",
                "Created",
                "Last Modified",
            ],
            EntityKind::Prescription => &[
                "Prescription ID",
                "Patient ID",
                "Clinician ID",
                "Appointment ID",
                "Medication",
                "Dosage",
                "Frequency",
                "Duration (days)",
                "Quantity",
                "Pharmacy",
                "Date Prescribed",
                "Issue Date",
                "Collection Date",
                "Collection Status",
                "Notes",
            ],
            EntityKind::Referral => &[
                "Referral ID",
                "Patient ID",
                "Referring Clinician ID",
                "Receiving Clinician ID",
                "Referring Facility",
                "Receiving Facility",
                "Date",
                "Urgency",
                "Referral Reason",
                "Clinical Summary",
                "Requested Investigations",
                "Appointment ID",
                "Notes",
                "Status",
                "Created",
                "Last Updated",
            ],
            EntityKind::Staff => &[
                "Staff ID",
                "First Name",
                "Last Name",
                "Role",
                "Department",
                "Facility ID",
                "Email",
                "Phone",
                "Employment Status",
                "Start Date",
                "Line Manager",
                "Access Level",
            ],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known entity kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind '{0}' (expected one of: patients, clinicians, facilities, appointments, prescriptions, referrals, staff)")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    /// Accepts singular or plural names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" | "patients" => Ok(EntityKind::Patient),
            "clinician" | "clinicians" => Ok(EntityKind::Clinician),
            "facility" | "facilities" => Ok(EntityKind::Facility),
            "appointment" | "appointments" => Ok(EntityKind::Appointment),
            "prescription" | "prescriptions" => Ok(EntityKind::Prescription),
            "referral" | "referrals" => Ok(EntityKind::Referral),
            "staff" => Ok(EntityKind::Staff),
            _ => Err(UnknownEntityKind(s.to_string())),
        }
    }
}

// ============================================================================
// RECORD TRAIT
// ============================================================================

/// An advisory link from one record to another record's identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Column name of the referencing field (e.g. `patientID`).
    pub field: &'static str,
    /// Kind of record the field points at.
    pub target: EntityKind,
    /// The referenced identifier, verbatim.
    pub id: &'a str,
}

/// Behaviour shared by all seven entity types.
///
/// `values()` must yield exactly one value per entry of `KIND.columns()`, in the same
/// order; the loader, the exporter and document rendering all rely on that.
pub trait Record: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    /// The record's key.
    fn id(&self) -> &str;

    /// Field values in column order.
    fn values(&self) -> Vec<&str>;

    /// Advisory references to other records. Blank fields are omitted.
    fn references(&self) -> Vec<Reference<'_>> {
        Vec::new()
    }

    /// The repository holding records of this type.
    fn repository(store: &ClinicStore) -> &Repository<Self>;

    /// Mutable access to the repository holding records of this type.
    fn repository_mut(store: &mut ClinicStore) -> &mut Repository<Self>;
}

/// Builds the reference list for a record, dropping blank referenced IDs.
pub(crate) fn references<'a>(
    links: impl IntoIterator<Item = (&'static str, EntityKind, &'a str)>,
) -> Vec<Reference<'a>> {
    links
        .into_iter()
        .filter(|(_, _, id)| !id.trim().is_empty())
        .map(|(field, target, id)| Reference { field, target, id })
        .collect()
}
