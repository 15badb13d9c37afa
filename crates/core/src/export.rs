//! Bulk export to a directory of delimited files.
//!
//! Writes the same layout [`crate::loader::load_data`] reads: one file per entity
//! kind, a header row, then one row per record in insertion order. Fields containing
//! the delimiter, quotes or line breaks are quoted.

use crate::constants::DELIMITER;
use crate::entities::Record;
use crate::error::{ClinicError, ClinicResult};
use crate::repository::Repository;
use crate::store::ClinicStore;
use std::fs;
use std::path::Path;

/// Writes every repository of `store` into `dir`, creating the directory if needed.
///
/// Existing entity files in `dir` are overwritten. All seven files are written, empty
/// repositories producing a header-only file.
///
/// # Errors
///
/// Returns `ClinicError` if:
/// - the directory cannot be created ([`ClinicError::StorageDirCreation`]),
/// - a file cannot be created or written ([`ClinicError::Csv`], [`ClinicError::FileWrite`]).
pub fn save_data(store: &ClinicStore, dir: &Path) -> ClinicResult<()> {
    fs::create_dir_all(dir).map_err(ClinicError::StorageDirCreation)?;

    let mut written = 0;
    written += write_repository(store.patients(), dir)?;
    written += write_repository(store.clinicians(), dir)?;
    written += write_repository(store.facilities(), dir)?;
    written += write_repository(store.appointments(), dir)?;
    written += write_repository(store.prescriptions(), dir)?;
    written += write_repository(store.referrals(), dir)?;
    written += write_repository(store.staff(), dir)?;

    tracing::info!("exported {} records to {}", written, dir.display());
    Ok(())
}

fn write_repository<T: Record>(repository: &Repository<T>, dir: &Path) -> ClinicResult<usize> {
    let path = dir.join(T::KIND.file_name());
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_path(&path)?;

    writer.write_record(T::KIND.columns())?;
    for record in repository {
        writer.write_record(record.values())?;
    }
    writer.flush().map_err(ClinicError::FileWrite)?;

    Ok(repository.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityKind, Facility, Patient, Prescription, Referral};
    use crate::loader::load_data;
    use tempfile::TempDir;

    fn populated_store() -> ClinicStore {
        let mut store = ClinicStore::new();
        store
            .add(Patient {
                patient_id: "P1".into(),
                first_name: "John".into(),
                last_name: "Doe".into(),
                address: "1 High St, Leeds".into(),
                ..Default::default()
            })
            .unwrap();
        store
            .add(Facility {
                facility_id: "F1".into(),
                name: "Park \"Central\" Surgery".into(),
                capacity: "forty".into(),
                ..Default::default()
            })
            .unwrap();
        store
            .add(Prescription {
                prescription_id: "RX1".into(),
                patient_id: "P1".into(),
                medication: "Amoxicillin".into(),
                quantity: "21".into(),
                notes: "Take with food.\nFinish the course.".into(),
                ..Default::default()
            })
            .unwrap();
        store
            .add(Referral {
                referral_id: "R1".into(),
                patient_id: "P1".into(),
                urgency: "Urgent".into(),
                ..Default::default()
            })
            .unwrap();
        store
    }

    #[test]
    fn test_save_then_load_reproduces_store() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let out = temp_dir.path().join("export");
        let original = populated_store();

        save_data(&original, &out).expect("save should succeed");

        let mut reloaded = ClinicStore::new();
        let report = load_data(&mut reloaded, &out).expect("load should succeed");

        assert!(report.is_clean(), "unexpected warnings: {:?}", report.warnings());
        assert_eq!(report.loaded_kinds().len(), EntityKind::ALL.len());
        assert_eq!(reloaded.get_all::<Patient>(), original.get_all::<Patient>());
        assert_eq!(reloaded.get_all::<Facility>(), original.get_all::<Facility>());
        assert_eq!(
            reloaded.get_all::<Prescription>(),
            original.get_all::<Prescription>()
        );
        assert_eq!(reloaded.get_all::<Referral>(), original.get_all::<Referral>());
        assert_eq!(reloaded.counts(), original.counts());
    }

    #[test]
    fn test_padded_keys_and_values_never_reach_an_export() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = populated_store();

        let padded_id = Patient {
            patient_id: " P1".into(),
            first_name: "Shadow".into(),
            ..Default::default()
        };
        let padded_value = Patient {
            patient_id: "P2".into(),
            first_name: " padded ".into(),
            ..Default::default()
        };
        assert!(matches!(
            store.add(padded_id),
            Err(ClinicError::UntrimmedValue { .. })
        ));
        assert!(matches!(
            store.add(padded_value),
            Err(ClinicError::UntrimmedValue { .. })
        ));
        store
            .add(Patient {
                patient_id: "P2".into(),
                first_name: "padded".into(),
                ..Default::default()
            })
            .unwrap();

        save_data(&store, temp_dir.path()).expect("save should succeed");
        let mut reloaded = ClinicStore::new();
        let report = load_data(&mut reloaded, temp_dir.path()).expect("load should succeed");

        assert!(report.is_clean(), "unexpected warnings: {:?}", report.warnings());
        assert_eq!(reloaded.patients().ids(), vec!["P1", "P2"]);
        assert_eq!(reloaded.get_all::<Patient>(), store.get_all::<Patient>());
    }

    #[test]
    fn test_save_writes_header_for_empty_repositories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        save_data(&ClinicStore::new(), temp_dir.path()).expect("save should succeed");

        let staff = fs::read_to_string(temp_dir.path().join("staff.csv"))
            .expect("staff file should exist");
        assert_eq!(
            staff.trim_end(),
            "staffID,firstName,lastName,role,department,facilityID,email,phone,employmentStatus,startDate,lineManager,accessLevel"
        );
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = save_data(&populated_store(), &blocker).expect_err("save should fail");

        assert!(matches!(err, ClinicError::StorageDirCreation(_)));
    }
}
