//! Port for the time-series preprocessing step applied to merged records.

use crate::domain::{DataRecord, ProcessedData};

/// Preprocessing of merged records into the displayed data set.
#[cfg_attr(test, mockall::automock)]
pub trait DataProcessor: Send + Sync {
    /// Turn merged device records and notes into the viewer's data set.
    fn process(&self, records: Vec<DataRecord>) -> ProcessedData;
}
