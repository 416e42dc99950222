use orrery_types::prelude::*;

#[derive(Clone, PartialEq, Debug, Default)]
pub struct VectorTable {
    /// Records in file order
    pub records: Vec<EphemerisRecord>,

    /// Data lines between the markers that were not records
    pub ignored_lines: usize,

    /// Whether a $$SOE marker was seen at all
    pub start_marker_seen: bool,
}

impl VectorTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_time_index(&self) -> Option<TimeIndex> {
        self.records.first().map(|r| r.time_index)
    }

    pub fn last_time_index(&self) -> Option<TimeIndex> {
        self.records.last().map(|r| r.time_index)
    }
}

impl From<VectorTable> for Vec<EphemerisRecord> {
    fn from(value: VectorTable) -> Self {
        value.records
    }
}
