use chrono::{DateTime, TimeZone, Utc};
use derive_more::Display;

pub type UtcTimestamp = DateTime<Utc>;

/// Ordering key for ephemeris records.
///
/// Milliseconds since the Unix epoch of the record's calendar date, so
/// comparing two indexes compares the instants they name.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Display)]
#[display(fmt = "{}", _0)]
pub struct TimeIndex(pub i64);

impl TimeIndex {
    pub const fn from_millis(millis: i64) -> Self {
        TimeIndex(millis)
    }

    pub fn from_utc(utc: &UtcTimestamp) -> Self {
        TimeIndex(utc.timestamp_millis())
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// None when the index is outside chrono's representable range
    pub fn to_utc(self) -> Option<UtcTimestamp> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl From<UtcTimestamp> for TimeIndex {
    fn from(value: UtcTimestamp) -> Self {
        TimeIndex::from_utc(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn utc_round_trip_orders_by_instant() {
        let early = NaiveDate::from_ymd_opt(2018, 6, 13)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
            .and_utc();
        let late = NaiveDate::from_ymd_opt(2018, 6, 13)
            .and_then(|d| d.and_hms_opt(12, 30, 0))
            .unwrap()
            .and_utc();
        let a = TimeIndex::from(early);
        let b = TimeIndex::from(late);
        assert!(a < b);
        assert_eq!(b.as_millis() - a.as_millis(), 45_000_000);
        assert_eq!(a.to_utc(), Some(early));
    }
}
