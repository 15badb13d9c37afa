//! Bulk load from a directory of delimited files.
//!
//! A data directory holds at most one file per entity kind (see
//! [`EntityKind::file_name`]). Each file starts with a header row naming the columns
//! in [`EntityKind::columns`] order, followed by one record per line.
//!
//! ## Replace semantics
//!
//! A file that is present replaces the matching repository wholesale. A file that is
//! absent leaves its repository untouched. Loading the same directory twice therefore
//! yields the same store contents.
//!
//! ## Failure isolation
//!
//! - An inaccessible directory fails the whole load before anything is touched.
//! - A file that cannot be read to the end is skipped with a warning and its repository
//!   keeps its previous contents. A zero-byte file counts as unreadable: it has no header.
//! - A malformed row (wrong column count, blank or duplicated ID, undecodable text) is
//!   skipped with a warning; the remaining rows still load.
//!
//! Each file is parsed into a fresh repository which is swapped into the store only
//! once the file has been read completely.

use crate::constants::DELIMITER;
use crate::entities::{
    Appointment, Clinician, EntityKind, Facility, Patient, Prescription, Record, Referral, Staff,
};
use crate::error::{ClinicError, ClinicResult};
use crate::repository::Repository;
use crate::store::ClinicStore;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// A non-fatal problem encountered while loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadWarning {
    pub kind: EntityKind,
    /// 1-based line number in the source file, when known.
    pub line: Option<u64>,
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} line {}: {}", self.kind.file_name(), line, self.message),
            None => write!(f, "{}: {}", self.kind.file_name(), self.message),
        }
    }
}

/// Outcome of loading a single file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileLoad {
    /// Records now held by the repository.
    pub loaded: usize,
    /// Rows that were skipped.
    pub skipped: usize,
}

/// Summary of a directory load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    files: BTreeMap<EntityKind, FileLoad>,
    warnings: Vec<LoadWarning>,
}

impl LoadReport {
    /// Result for a kind whose file was loaded, or `None` if the file was absent or
    /// unreadable.
    pub fn file(&self, kind: EntityKind) -> Option<FileLoad> {
        self.files.get(&kind).copied()
    }

    /// Kinds whose repositories were replaced, in canonical order.
    pub fn loaded_kinds(&self) -> Vec<EntityKind> {
        self.files.keys().copied().collect()
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn total_loaded(&self) -> usize {
        self.files.values().map(|f| f.loaded).sum()
    }

    /// True when every present file loaded without warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn warn(&mut self, kind: EntityKind, line: Option<u64>, message: impl Into<String>) {
        let warning = LoadWarning {
            kind,
            line,
            message: message.into(),
        };
        tracing::warn!("load warning: {}", warning);
        self.warnings.push(warning);
    }
}

/// Loads every entity file found in `dir` into `store`.
///
/// # Arguments
///
/// * `store` - Store whose repositories are replaced by the files present.
/// * `dir` - Directory containing the delimited files.
///
/// # Returns
///
/// A [`LoadReport`] listing the files loaded, row counts and any warnings.
///
/// # Errors
///
/// Returns [`ClinicError::DataDirRead`] if `dir` does not exist, is not a directory, or
/// cannot be read. In that case no repository is modified.
pub fn load_data(store: &mut ClinicStore, dir: &Path) -> ClinicResult<LoadReport> {
    fs::read_dir(dir).map_err(|source| ClinicError::DataDirRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut report = LoadReport::default();

    load_kind::<Patient>(store, dir, &mut report);
    load_kind::<Clinician>(store, dir, &mut report);
    load_kind::<Facility>(store, dir, &mut report);
    load_kind::<Appointment>(store, dir, &mut report);
    load_kind::<Prescription>(store, dir, &mut report);
    load_kind::<Referral>(store, dir, &mut report);
    load_kind::<Staff>(store, dir, &mut report);

    tracing::info!(
        "loaded {} records from {} ({} files, {} warnings)",
        report.total_loaded(),
        dir.display(),
        report.files.len(),
        report.warnings.len()
    );

    Ok(report)
}

fn load_kind<T: Record>(store: &mut ClinicStore, dir: &Path, report: &mut LoadReport) {
    let path = dir.join(T::KIND.file_name());
    if !path.is_file() {
        tracing::debug!(
            "{} not present, keeping existing {} records",
            path.display(),
            T::KIND
        );
        return;
    }

    if let Some((repository, skipped)) = read_file::<T>(&path, report) {
        report.files.insert(
            T::KIND,
            FileLoad {
                loaded: repository.len(),
                skipped,
            },
        );
        *T::repository_mut(store) = repository;
    }
}

/// Parses one file. Returns `None` when the file as a whole could not be read.
fn read_file<T: Record>(path: &Path, report: &mut LoadReport) -> Option<(Repository<T>, usize)> {
    let kind = T::KIND;
    let expected = kind.columns();

    let mut reader = match csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
    {
        Ok(reader) => reader,
        Err(e) => {
            report.warn(kind, None, format!("cannot open file: {e}"));
            return None;
        }
    };

    match reader.headers() {
        Ok(headers) if headers.is_empty() => {
            report.warn(kind, Some(1), "no header row, file ignored".to_string());
            return None;
        }
        Ok(headers) => {
            if !header_matches(headers, expected) {
                report.warn(
                    kind,
                    Some(1),
                    format!(
                        "unexpected header, reading columns positionally as: {}",
                        expected.join(",")
                    ),
                );
            }
        }
        Err(e) => {
            report.warn(kind, Some(1), format!("cannot read header: {e}"));
            return None;
        }
    }

    let mut repository = Repository::new();
    let mut skipped = 0;

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => {
                report.warn(kind, None, format!("read failed, file ignored: {e}"));
                return None;
            }
            Err(e) => {
                skipped += 1;
                let line = e.position().map(|p| p.line());
                report.warn(kind, line, format!("malformed row: {e}"));
                continue;
            }
        };
        let line = row.position().map(|p| p.line());

        if row.len() != expected.len() {
            skipped += 1;
            report.warn(
                kind,
                line,
                format!("expected {} columns, found {}", expected.len(), row.len()),
            );
            continue;
        }

        let record: T = match row.deserialize(None) {
            Ok(record) => record,
            Err(e) => {
                skipped += 1;
                report.warn(kind, line, format!("malformed row: {e}"));
                continue;
            }
        };

        if let Err(e) = repository.add(record) {
            skipped += 1;
            report.warn(kind, line, e.to_string());
        }
    }

    Some((repository, skipped))
}

fn header_matches(headers: &csv::StringRecord, expected: &[&str]) -> bool {
    headers.len() == expected.len()
        && headers
            .iter()
            .zip(expected)
            .all(|(found, want)| found.eq_ignore_ascii_case(want))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Appointment, Referral};
    use tempfile::TempDir;

    const PATIENT_HEADER: &str = "patientID,firstName,lastName,dob,gender,nhsNumber,email,phone,address,postcode,emergencyContactName,emergencyContactPhone,registrationDate,gpSurgery";

    fn patient_row(id: &str, first_name: &str) -> String {
        format!(
            "{id},{first_name},Doe,1990-01-01,M,943 476 5919,{first_name}@example.com,07700 900123,\"1 High St, Leeds\",LS1 1AA,Jane Doe,07700 900456,2020-05-01,Park Surgery"
        )
    }

    fn write_file(dir: &Path, name: &str, lines: &[String]) {
        fs::write(dir.join(name), lines.join("\n")).expect("should write fixture file");
    }

    fn facility_lines() -> Vec<String> {
        vec![
            "facilityID,name,type,address,postcode,phone,email,openingHours,managerName,services,capacity".into(),
            "F1,Park Surgery,GP,2 Park Rd,LS2 2BB,0113 000,park@example.com,08:00-18:00,Ann Lee,\"GP, Nursing\",40".into(),
        ]
    }

    #[test]
    fn test_load_single_patient_then_delete() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_file(
            temp_dir.path(),
            "patients.csv",
            &[PATIENT_HEADER.into(), patient_row("P1", "John")],
        );
        let mut store = ClinicStore::new();

        let report = load_data(&mut store, temp_dir.path()).expect("load should succeed");

        assert!(report.is_clean(), "unexpected warnings: {:?}", report.warnings());
        let patients = store.get_all::<Patient>();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].patient_id, "P1");
        assert_eq!(patients[0].first_name, "John");
        assert_eq!(patients[0].address, "1 High St, Leeds");
        assert_eq!(patients[0].gp_surgery, "Park Surgery");

        store.delete::<Patient>("P1");
        assert!(store.get_all::<Patient>().is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error_and_store_untouched() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = ClinicStore::new();
        store
            .add(Patient {
                patient_id: "P1".into(),
                ..Default::default()
            })
            .unwrap();

        let err = load_data(&mut store, &temp_dir.path().join("nope"))
            .expect_err("missing directory should fail");

        assert!(matches!(err, ClinicError::DataDirRead { .. }));
        assert_eq!(store.count(EntityKind::Patient), 1);
    }

    #[test]
    fn test_file_path_instead_of_directory_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = temp_dir.path().join("patients.csv");
        fs::write(&file, PATIENT_HEADER).unwrap();

        let err = load_data(&mut ClinicStore::new(), &file).expect_err("file path should fail");

        assert!(matches!(err, ClinicError::DataDirRead { .. }));
    }

    #[test]
    fn test_malformed_rows_are_skipped_and_others_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_file(
            temp_dir.path(),
            "patients.csv",
            &[
                PATIENT_HEADER.into(),
                patient_row("P1", "John"),
                "P2,Short,Row".into(),
                patient_row("", "Nobody"),
                patient_row("P1", "Duplicate"),
                patient_row("P3", "Alice"),
            ],
        );
        write_file(temp_dir.path(), "facilities.csv", &facility_lines());
        let mut store = ClinicStore::new();

        let report = load_data(&mut store, temp_dir.path()).expect("load should succeed");

        let ids: Vec<_> = store.patients().ids().into_iter().map(String::from).collect();
        assert_eq!(ids, vec!["P1", "P3"]);
        assert_eq!(store.find::<Patient>("P1").unwrap().first_name, "John");
        assert_eq!(
            report.file(EntityKind::Patient),
            Some(FileLoad {
                loaded: 2,
                skipped: 3
            })
        );
        assert_eq!(report.warnings().len(), 3);
        assert_eq!(report.warnings()[0].line, Some(3));
        assert!(report.warnings()[0].message.contains("expected 14 columns"));

        // A bad row in one file does not affect other files.
        assert_eq!(store.count(EntityKind::Facility), 1);
        assert_eq!(store.find::<Facility>("F1").unwrap().services, "GP, Nursing");
    }

    #[test]
    fn test_absent_file_leaves_repository_untouched() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_file(temp_dir.path(), "facilities.csv", &facility_lines());
        let mut store = ClinicStore::new();
        store
            .add(Referral {
                referral_id: "R1".into(),
                ..Default::default()
            })
            .unwrap();

        let report = load_data(&mut store, temp_dir.path()).expect("load should succeed");

        assert_eq!(report.loaded_kinds(), vec![EntityKind::Facility]);
        assert!(report.file(EntityKind::Referral).is_none());
        assert_eq!(store.count(EntityKind::Referral), 1);
    }

    #[test]
    fn test_empty_file_leaves_repository_untouched() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("staff.csv"), "").expect("should write empty file");
        let mut store = ClinicStore::new();
        store
            .add(Staff {
                staff_id: "S1".into(),
                ..Default::default()
            })
            .unwrap();

        let report = load_data(&mut store, temp_dir.path()).expect("load should succeed");

        assert_eq!(store.staff().ids(), vec!["S1"]);
        assert!(report.file(EntityKind::Staff).is_none());
        assert_eq!(report.warnings().len(), 1);
        assert_eq!(report.warnings()[0].kind, EntityKind::Staff);
        assert!(report.warnings()[0].message.contains("no header row"));
    }

    #[test]
    fn test_present_file_replaces_repository() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_file(
            temp_dir.path(),
            "patients.csv",
            &[PATIENT_HEADER.into(), patient_row("P2", "Loaded")],
        );
        let mut store = ClinicStore::new();
        store
            .add(Patient {
                patient_id: "P1".into(),
                ..Default::default()
            })
            .unwrap();

        load_data(&mut store, temp_dir.path()).expect("load should succeed");

        assert_eq!(store.patients().ids(), vec!["P2"]);
    }

    #[test]
    fn test_loading_twice_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_file(
            temp_dir.path(),
            "patients.csv",
            &[
                PATIENT_HEADER.into(),
                patient_row("P1", "John"),
                patient_row("P2", "Jane"),
            ],
        );
        write_file(temp_dir.path(), "facilities.csv", &facility_lines());
        let mut store = ClinicStore::new();

        load_data(&mut store, temp_dir.path()).expect("first load should succeed");
        let first_patients = store.get_all::<Patient>();
        let first_facilities = store.get_all::<Facility>();

        load_data(&mut store, temp_dir.path()).expect("second load should succeed");

        assert_eq!(store.get_all::<Patient>(), first_patients);
        assert_eq!(store.get_all::<Facility>(), first_facilities);
        assert_eq!(store.count(EntityKind::Patient), 2);
    }

    #[test]
    fn test_header_mismatch_warns_but_reads_positionally() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_file(
            temp_dir.path(),
            "appointments.csv",
            &[
                "id,patient,clinician,facility,date,time,duration,type,status,reason,notes,created,modified".into(),
                "A1,P404,C1,F1,2024-03-01,09:30,15,GP,Booked,Cough,,2024-02-01,2024-02-02".into(),
            ],
        );
        let mut store = ClinicStore::new();

        let report = load_data(&mut store, temp_dir.path()).expect("load should succeed");

        assert_eq!(report.warnings().len(), 1);
        assert_eq!(report.warnings()[0].line, Some(1));
        let appointment = store.find::<Appointment>("A1").expect("row should load");
        assert_eq!(appointment.patient_id, "P404");
        assert_eq!(appointment.duration_minutes, "15");
        assert_eq!(appointment.notes, "");
    }

    #[test]
    fn test_header_only_file_clears_repository() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_file(temp_dir.path(), "patients.csv", &[PATIENT_HEADER.into()]);
        let mut store = ClinicStore::new();
        store
            .add(Patient {
                patient_id: "P1".into(),
                ..Default::default()
            })
            .unwrap();

        let report = load_data(&mut store, temp_dir.path()).expect("load should succeed");

        assert_eq!(
            report.file(EntityKind::Patient),
            Some(FileLoad {
                loaded: 0,
                skipped: 0
            })
        );
        assert!(store.patients().is_empty());
    }
}
