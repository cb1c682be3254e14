//! Chronological preprocessing of merged patient data.

use std::collections::BTreeMap;

use crate::domain::ports::DataProcessor;
use crate::domain::{DataRecord, ProcessedData};

/// Orders records by time and summarises them per type.
///
/// Records sharing a timestamp keep their merge order, so device data stays
/// ahead of notes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChronologicalProcessor;

impl DataProcessor for ChronologicalProcessor {
    fn process(&self, mut records: Vec<DataRecord>) -> ProcessedData {
        records.sort_by_key(|record| record.time);

        let mut counts_by_type = BTreeMap::new();
        for record in &records {
            *counts_by_type.entry(record.kind.clone()).or_insert(0) += 1;
        }

        ProcessedData {
            start: records.first().map(|record| record.time),
            end: records.last().map(|record| record.time),
            counts_by_type,
            records,
        }
    }
}
