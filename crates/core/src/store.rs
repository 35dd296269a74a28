//! Append-only record store.
//!
//! Insertion order is display order. Display indices are 1-based and derived from position, so a
//! record's index never changes once appended.

use crate::record::{Record, RecordRow};

#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its 1-based display index.
    pub fn append(&mut self, record: Record) -> usize {
        self.records.push(record);
        let index = self.records.len();
        tracing::debug!("record {index} appended");
        index
    }

    /// Read-only view of every record in insertion order.
    pub fn list_all(&self) -> &[Record] {
        &self.records
    }

    /// Records paired with their 1-based display index.
    pub fn listing(&self) -> impl Iterator<Item = (usize, &Record)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(position, record)| (position + 1, record))
    }

    /// Looks up a record by 1-based display index.
    pub fn get(&self, display_index: usize) -> Option<&Record> {
        display_index
            .checked_sub(1)
            .and_then(|position| self.records.get(position))
    }

    /// Display rows for the record table.
    pub fn rows(&self) -> Vec<RecordRow> {
        self.listing()
            .map(|(index, record)| record.summary_row(index))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
