// sfplanner-core/src/ledger.rs
//! Session state owned by the caller: the record list and the identifier
//! sequence that goes with it.
//!
//! The ledger is the only place records are created, edited or removed.
//! Every write path runs the full field validation first.

use chrono::{DateTime, Utc};
use log::debug;

use crate::errors::PlannerError;
use crate::record::{IdSequence, Record, DEFAULT_ID_PREFIX};
use crate::validators::{validate_record_input, RecordInput};

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<Record>,
    sequence: IdSequence,
}

impl Ledger {
    pub fn new(records: Vec<Record>) -> Self {
        let sequence = IdSequence::from_records(&records);
        Self { records, sequence }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// The id the next added record will receive.
    pub fn next_id(&self) -> String {
        let mut preview = self.sequence;
        preview.mint(DEFAULT_ID_PREFIX)
    }

    /// Validates `input` and appends a new record stamped with `now`.
    pub fn add(&mut self, input: &RecordInput, now: DateTime<Utc>) -> Result<&Record, PlannerError> {
        let fields = validate_record_input(input)
            .into_fields()
            .map_err(PlannerError::InvalidRecord)?;
        let id = self.sequence.mint(DEFAULT_ID_PREFIX);
        debug!("Adding record '{}'.", id);
        self.records.push(Record::new(id, fields, now));
        let idx = self.records.len() - 1;
        Ok(&self.records[idx])
    }

    /// Validates `input` and replaces the editable fields of record `id`.
    pub fn update(
        &mut self,
        id: &str,
        input: &RecordInput,
        now: DateTime<Utc>,
    ) -> Result<&Record, PlannerError> {
        let fields = validate_record_input(input)
            .into_fields()
            .map_err(PlannerError::InvalidRecord)?;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| PlannerError::RecordNotFound(id.to_string()))?;
        debug!("Updating record '{}'.", id);
        record.apply(fields, now);
        Ok(record)
    }

    /// Removes record `id` and returns it.
    pub fn delete(&mut self, id: &str) -> Result<Record, PlannerError> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| PlannerError::RecordNotFound(id.to_string()))?;
        debug!("Deleting record '{}'.", id);
        Ok(self.records.remove(idx))
    }

    /// Replaces every record and re-derives the id sequence.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.sequence = IdSequence::from_records(&records);
        self.records = records;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input(description: &str, amount: &str) -> RecordInput {
        RecordInput {
            description: description.into(),
            amount: amount.into(),
            category: "Food".into(),
            date: "2024-01-01".into(),
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn add_mints_sequential_ids() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.next_id(), "txn_0001");
        let first = ledger.add(&input("Coffee", "3.50"), at(1)).unwrap().id.clone();
        let second = ledger.add(&input("Tea", "2"), at(2)).unwrap().id.clone();
        assert_eq!(first, "txn_0001");
        assert_eq!(second, "txn_0002");
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("txn_0001").unwrap().amount, 3.5);
    }

    #[test]
    fn add_rejects_invalid_input_without_consuming_an_id() {
        let mut ledger = Ledger::default();
        let err = ledger.add(&input("the the", "01"), at(1)).unwrap_err();
        match err {
            PlannerError::InvalidRecord(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(ledger.is_empty());
        assert_eq!(ledger.next_id(), "txn_0001");
    }

    #[test]
    fn update_keeps_id_and_created_at() {
        let mut ledger = Ledger::default();
        ledger.add(&input("Coffee", "3"), at(1)).unwrap();
        let updated = ledger.update("txn_0001", &input("Latte", "4.25"), at(5)).unwrap();
        assert_eq!(updated.id, "txn_0001");
        assert_eq!(updated.description, "Latte");
        assert_eq!(updated.created_at, at(1));
        assert_eq!(updated.updated_at, at(5));
    }

    #[test]
    fn update_and_delete_unknown_ids_fail() {
        let mut ledger = Ledger::default();
        assert!(matches!(
            ledger.update("txn_0404", &input("Coffee", "1"), at(1)),
            Err(PlannerError::RecordNotFound(id)) if id == "txn_0404"
        ));
        assert!(matches!(ledger.delete("txn_0404"), Err(PlannerError::RecordNotFound(_))));
    }

    #[test]
    fn delete_removes_record() {
        let mut ledger = Ledger::default();
        ledger.add(&input("Coffee", "3"), at(1)).unwrap();
        ledger.add(&input("Tea", "2"), at(1)).unwrap();
        let removed = ledger.delete("txn_0001").unwrap();
        assert_eq!(removed.description, "Coffee");
        assert_eq!(ledger.records().len(), 1);
        // Deleting never rewinds the sequence.
        assert_eq!(ledger.next_id(), "txn_0003");
    }

    #[test]
    fn replace_all_resyncs_sequence() {
        let mut donor = Ledger::default();
        for _ in 0..5 {
            donor.add(&input("Coffee", "1"), at(1)).unwrap();
        }
        let mut ledger = Ledger::default();
        ledger.replace_all(donor.into_records());
        assert_eq!(ledger.next_id(), "txn_0006");
    }
}
