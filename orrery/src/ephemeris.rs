use orrery_types::prelude::*;
use std::{fs, io, path::Path};
use tracing::{debug, info};

/// Matches this close to the end of the data mean the data set needs refreshing
pub const STALE_RECORD_WINDOW: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum EphemerisError {
    #[error("Failed to read ephemeris file '{path}'")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Time ordered ephemeris records for one body
#[derive(Clone, PartialEq, Debug, Default)]
pub struct EphemerisStore {
    label: String,
    records: Vec<EphemerisRecord>,
}

/// Result of a nearest-at-or-before lookup
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct NearestRecord<'a> {
    pub record: &'a EphemerisRecord,
    /// Position of the record within the store
    pub position: usize,
    /// The match is within the last [`STALE_RECORD_WINDOW`] records
    pub stale: bool,
    pub records_remaining: usize,
}

impl EphemerisStore {
    pub fn new<S: Into<String>>(label: S, records: Vec<EphemerisRecord>) -> Self {
        EphemerisStore {
            label: label.into(),
            records,
        }
    }

    /// Read a Horizons vector table
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EphemerisError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| EphemerisError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = horizons::parse_vector_table(&content);
        if !table.start_marker_seen {
            debug!(path = %path.display(), "No $$SOE marker in ephemeris file");
        }
        info!(
            path = %path.display(),
            records = table.len(),
            ignored = table.ignored_lines,
            "Loaded ephemeris"
        );
        Ok(Self::new(path.display().to_string(), table.into()))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Records must be appended in time order
    pub fn push(&mut self, record: EphemerisRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EphemerisRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&EphemerisRecord> {
        self.records.last()
    }

    /// The record with the largest time index not after `time_index`.
    ///
    /// Never interpolates and never returns a future record.
    pub fn nearest_at_or_before(&self, time_index: TimeIndex) -> Option<NearestRecord<'_>> {
        // TODO: binary search once stores are guaranteed sorted on load
        let (position, record) = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.time_index <= time_index)
            .max_by_key(|(idx, r)| (r.time_index, std::cmp::Reverse(*idx)))?;

        let len = self.records.len();
        Some(NearestRecord {
            record,
            position,
            stale: len < STALE_RECORD_WINDOW || position > len - STALE_RECORD_WINDOW,
            records_remaining: len - 1 - position,
        })
    }
}
