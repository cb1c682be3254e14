//! Physiological time-series records and the display-ready structure built
//! from them.
//!
//! Device data and team notes arrive as two independent collections of
//! [`DataRecord`]s. They are merged by set union on the record identifier and
//! handed to a [`crate::domain::ports::DataProcessor`] which produces
//! [`ProcessedData`]. The result is regenerated on every fetch.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record type used for team notes.
pub const NOTE_RECORD_TYPE: &str = "message";

/// One time-stamped datum: a device reading or a team note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Identifier used for de-duplication on merge.
    pub id: String,
    /// Record type, such as `cbg`, `smbg` or `message`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Instant of the reading or note.
    pub time: DateTime<Utc>,
    /// Numeric reading, absent for notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Type-specific attributes the viewer passes through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DataRecord {
    /// Whether this record is a team note rather than device data.
    pub fn is_note(&self) -> bool {
        self.kind == NOTE_RECORD_TYPE
    }
}

/// Union of device data and notes.
///
/// Records are identified by `id`; the first occurrence wins and the
/// relative order of survivors is preserved (device data first).
pub fn merge_records(device_data: Vec<DataRecord>, notes: Vec<DataRecord>) -> Vec<DataRecord> {
    let mut seen = HashSet::with_capacity(device_data.len() + notes.len());
    device_data
        .into_iter()
        .chain(notes)
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}

/// Display-ready patient data produced by the preprocessing step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedData {
    /// Records in display order.
    pub records: Vec<DataRecord>,
    /// Number of records per type.
    pub counts_by_type: BTreeMap<String, usize>,
    /// Earliest record time.
    pub start: Option<DateTime<Utc>>,
    /// Latest record time.
    pub end: Option<DateTime<Utc>>,
}

impl ProcessedData {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(id: &str, kind: &str, minute: u32) -> DataRecord {
    use chrono::TimeZone;

    DataRecord {
        id: id.to_owned(),
        kind: kind.to_owned(),
        time: Utc
            .with_ymd_and_hms(2026, 10, 1, 8, minute, 0)
            .single()
            .unwrap_or_default(),
        value: None,
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn union_removes_duplicates_by_identity() {
        let device = vec![record("a", "smbg", 0), record("b", "cbg", 5)];
        let notes = vec![record("n1", NOTE_RECORD_TYPE, 3), record("b", "cbg", 5)];

        let merged = merge_records(device, notes);
        let ids: Vec<_> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "n1"]);
    }

    #[rstest]
    fn union_of_empty_inputs_is_empty() {
        assert!(merge_records(Vec::new(), Vec::new()).is_empty());
    }

    #[rstest]
    fn decodes_device_payload_with_passthrough_fields() {
        let record: DataRecord = serde_json::from_value(json!({
            "id": "r1",
            "type": "smbg",
            "time": "2026-10-01T08:00:00Z",
            "value": 6.2,
            "units": "mmol/L"
        }))
        .expect("record decodes");
        assert_eq!(record.kind, "smbg");
        assert_eq!(record.value, Some(6.2));
        assert_eq!(record.extra.get("units"), Some(&json!("mmol/L")));
        assert!(!record.is_note());
    }
}
