//! Generic keyed, ordered record collection.
//!
//! One [`Repository`] exists per entity type. Records are kept in insertion order for
//! stable listing, with a key index on the side for lookups. Records are never mutated
//! in place through this API: replacement goes through [`Repository::upsert`] or
//! [`Repository::update`], both of which swap the whole record in a single step.
//!
//! ## Duplicate keys
//!
//! [`Repository::add`] rejects a key that is already present. Callers that want
//! overwrite semantics use [`Repository::upsert`] explicitly.
//!
//! ## Stored form
//!
//! Keys must be non-blank, and no field may carry leading or trailing whitespace.
//! The loader trims every field, so only this form survives a save and reload.

use crate::entities::Record;
use crate::error::{ClinicError, ClinicResult};
use clinic_types::NonEmptyText;
use std::collections::HashMap;

/// Ordered collection of records of one entity type, keyed by record ID.
#[derive(Clone, Debug)]
pub struct Repository<T> {
    records: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Repository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Record> Repository<T> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Looks up a record by key.
    pub fn find(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    /// Returns a copy of every record, in insertion order.
    ///
    /// The returned vector is owned by the caller; changing it has no effect on the
    /// repository.
    pub fn get_all(&self) -> Vec<T> {
        self.records.clone()
    }

    /// Record keys in insertion order.
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(Record::id).collect()
    }

    /// Inserts a record at the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError`:
    /// - [`ClinicError::EmptyId`] if the record's key is blank,
    /// - [`ClinicError::UntrimmedValue`] if a field has surrounding whitespace,
    /// - [`ClinicError::DuplicateId`] if a record with the same key is already stored.
    pub fn add(&mut self, record: T) -> ClinicResult<()> {
        check_record(&record)?;

        if self.index.contains_key(record.id()) {
            return Err(ClinicError::DuplicateId {
                kind: T::KIND,
                id: record.id().to_string(),
            });
        }

        tracing::debug!("adding {} {}", T::KIND, record.id());
        self.push(record);
        Ok(())
    }

    /// Inserts or replaces a record in one step.
    ///
    /// An existing record with the same key is overwritten at its current position;
    /// otherwise the record is appended. Returns the record that was replaced, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::EmptyId`] if the record's key is blank, or
    /// [`ClinicError::UntrimmedValue`] if a field has surrounding whitespace.
    pub fn upsert(&mut self, record: T) -> ClinicResult<Option<T>> {
        check_record(&record)?;

        match self.index.get(record.id()) {
            Some(&pos) => {
                tracing::debug!("replacing {} {}", T::KIND, record.id());
                Ok(Some(std::mem::replace(&mut self.records[pos], record)))
            }
            None => {
                tracing::debug!("adding {} {}", T::KIND, record.id());
                self.push(record);
                Ok(None)
            }
        }
    }

    /// Replaces the record stored under `old_id` with `record`, which may carry a
    /// different key.
    ///
    /// The replacement takes the old record's position. When `old_id` is not present
    /// this behaves like [`Repository::add`]. Returns the record that was replaced.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError`:
    /// - [`ClinicError::EmptyId`] if the new key is blank,
    /// - [`ClinicError::UntrimmedValue`] if a field has surrounding whitespace,
    /// - [`ClinicError::DuplicateId`] if the new key belongs to a record other than
    ///   the one being replaced. The repository is left unchanged.
    pub fn update(&mut self, old_id: &str, record: T) -> ClinicResult<Option<T>> {
        check_record(&record)?;

        let Some(&pos) = self.index.get(old_id) else {
            self.add(record)?;
            return Ok(None);
        };

        let new_id = record.id().to_string();
        if new_id != old_id && self.index.contains_key(&new_id) {
            return Err(ClinicError::DuplicateId {
                kind: T::KIND,
                id: new_id,
            });
        }

        tracing::debug!("updating {} {} -> {}", T::KIND, old_id, new_id);
        let previous = std::mem::replace(&mut self.records[pos], record);
        if new_id != old_id {
            self.index.remove(old_id);
            self.index.insert(new_id, pos);
        }
        Ok(Some(previous))
    }

    /// Removes the record with the given key.
    ///
    /// Deleting an absent key is a no-op and returns `None`. Survivors keep their
    /// relative order.
    pub fn delete(&mut self, id: &str) -> Option<T> {
        let pos = self.index.remove(id)?;
        let removed = self.records.remove(pos);

        for (offset, record) in self.records[pos..].iter().enumerate() {
            if let Some(slot) = self.index.get_mut(record.id()) {
                *slot = pos + offset;
            }
        }

        tracing::debug!("deleted {} {}", T::KIND, id);
        Some(removed)
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }

    fn push(&mut self, record: T) {
        self.index.insert(record.id().to_string(), self.records.len());
        self.records.push(record);
    }
}

impl<'a, T> IntoIterator for &'a Repository<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn check_record<T: Record>(record: &T) -> ClinicResult<()> {
    NonEmptyText::new(record.id()).map_err(|_| ClinicError::EmptyId { kind: T::KIND })?;

    let untrimmed = T::KIND
        .columns()
        .iter()
        .zip(record.values())
        .find(|(_, value)| value.trim() != *value);

    match untrimmed {
        Some((field, _)) => Err(ClinicError::UntrimmedValue {
            kind: T::KIND,
            id: record.id().to_string(),
            field: *field,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityKind, Patient};

    fn patient(id: &str, first_name: &str) -> Patient {
        Patient {
            patient_id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            ..Default::default()
        }
    }

    fn repo_with(ids: &[&str]) -> Repository<Patient> {
        let mut repo = Repository::new();
        for id in ids {
            repo.add(patient(id, "John")).expect("add should succeed");
        }
        repo
    }

    #[test]
    fn test_add_then_find_and_get_all() {
        let mut repo = Repository::new();
        let p = patient("P1", "John");

        repo.add(p.clone()).expect("add should succeed");

        let all = repo.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], p);
        assert_eq!(repo.find("P1"), Some(&p));
        assert!(repo.contains("P1"));
    }

    #[test]
    fn test_add_rejects_blank_id() {
        let mut repo = Repository::new();

        let err = repo
            .add(patient("   ", "John"))
            .expect_err("blank id should be rejected");

        assert!(matches!(
            err,
            ClinicError::EmptyId {
                kind: EntityKind::Patient
            }
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_insert_paths_reject_padded_id_and_values() {
        let mut repo = repo_with(&["P1"]);

        let err = repo
            .add(patient(" P1", "John"))
            .expect_err("padded id should be rejected");
        assert!(matches!(
            err,
            ClinicError::UntrimmedValue { ref id, field: "patientID", .. } if id == " P1"
        ));

        let err = repo
            .upsert(patient("P2", " padded "))
            .expect_err("padded value should be rejected");
        assert!(matches!(
            err,
            ClinicError::UntrimmedValue { field: "firstName", .. }
        ));

        assert!(repo.update("P1", patient("P1", "Jane\n")).is_err());

        let mut multi_line = patient("P3", "John");
        multi_line.address = "1 High St\nLeeds".into();
        repo.add(multi_line).expect("inner whitespace is kept");

        assert_eq!(repo.ids(), vec!["P1", "P3"]);
        assert_eq!(repo.find("P1").unwrap().first_name, "John");
    }

    #[test]
    fn test_add_rejects_duplicate_id_and_keeps_original() {
        let mut repo = repo_with(&["P1"]);

        let err = repo
            .add(patient("P1", "Jane"))
            .expect_err("duplicate id should be rejected");

        assert!(matches!(err, ClinicError::DuplicateId { ref id, .. } if id == "P1"));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find("P1").unwrap().first_name, "John");
    }

    #[test]
    fn test_delete_preserves_order_of_survivors() {
        let mut repo = repo_with(&["P1", "P2", "P3", "P4", "P5"]);

        repo.delete("P2").expect("P2 should be removed");
        repo.delete("P4").expect("P4 should be removed");
        repo.add(patient("P6", "New")).expect("add should succeed");

        assert_eq!(repo.ids(), vec!["P1", "P3", "P5", "P6"]);
        // Index must follow the shifted positions.
        assert_eq!(repo.find("P5").unwrap().patient_id, "P5");
        assert_eq!(repo.find("P6").unwrap().first_name, "New");
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut repo = repo_with(&["P1", "P2"]);
        let before = repo.get_all();

        assert!(repo.delete("P404").is_none());

        assert_eq!(repo.get_all(), before);
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut repo = repo_with(&["P1", "P2", "P3"]);

        let replaced = repo
            .upsert(patient("P2", "Updated"))
            .expect("upsert should succeed");

        assert_eq!(replaced.map(|p| p.first_name), Some("John".to_string()));
        assert_eq!(repo.ids(), vec!["P1", "P2", "P3"]);
        assert_eq!(repo.find("P2").unwrap().first_name, "Updated");
    }

    #[test]
    fn test_upsert_appends_new_record() {
        let mut repo = repo_with(&["P1"]);

        let replaced = repo.upsert(patient("P2", "Jane")).expect("upsert should succeed");

        assert!(replaced.is_none());
        assert_eq!(repo.ids(), vec!["P1", "P2"]);
    }

    #[test]
    fn test_update_with_new_id_keeps_position() {
        let mut repo = repo_with(&["P1", "P2", "P3"]);

        repo.update("P2", patient("P9", "Renamed"))
            .expect("update should succeed");

        assert_eq!(repo.ids(), vec!["P1", "P9", "P3"]);
        assert!(!repo.contains("P2"));
        assert_eq!(repo.find("P9").unwrap().first_name, "Renamed");
    }

    #[test]
    fn test_update_rejects_collision_without_changes() {
        let mut repo = repo_with(&["P1", "P2"]);
        let before = repo.get_all();

        let err = repo
            .update("P1", patient("P2", "Clash"))
            .expect_err("colliding id should be rejected");

        assert!(matches!(err, ClinicError::DuplicateId { .. }));
        assert_eq!(repo.get_all(), before);
    }

    #[test]
    fn test_update_missing_old_id_adds() {
        let mut repo = repo_with(&["P1"]);

        let previous = repo
            .update("P404", patient("P2", "Jane"))
            .expect("update should succeed");

        assert!(previous.is_none());
        assert_eq!(repo.ids(), vec!["P1", "P2"]);
    }

    #[test]
    fn test_get_all_returns_detached_copy() {
        let repo = repo_with(&["P1"]);

        let mut all = repo.get_all();
        all[0].first_name = "Changed".to_string();
        all.clear();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find("P1").unwrap().first_name, "John");
    }
}
