//! Line oriented parser for the Horizons vector table CSV format
//!
//! Only the rows between the `$$SOE` and `$$EOE` markers carry data. Each row is
//! `JDTDB, Calendar Date (TDB), X, Y, Z, VX, VY, VZ, LT, RG, RR,`.
//! The reader is lenient: numeric fields that fail to parse become 0 and an
//! unreadable date becomes time index 0, the row itself is kept.

use crate::{
    VectorTable, EOE_TOKEN, FIELD_DELIMITER, METERS_PER_KILOMETER, MIN_RECORD_FIELDS, SOE_TOKEN,
};
use chrono::NaiveDate;
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{alpha1, char, i32, space0, space1, u32},
    combinator::{all_consuming, opt},
    error::ErrorKind,
    multi::separated_list1,
    number::complete::double,
    Err::Error,
};
use orrery_types::prelude::*;
use tracing::{debug, warn};

pub type Result<I, O, E = ParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError<I> {
    #[error("Line has no field delimiter")]
    NotARecord,
    #[error("Record has {0} fields, expected at least 11")]
    ShortRecord(usize),
    #[error("Unknown month name")]
    Month,
    #[error("Invalid calendar date")]
    CalendarDate,
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

/// Collect every record of a Horizons vector table.
///
/// Blank lines are skipped, as is anything outside the `$$SOE`/`$$EOE` markers.
pub fn parse_vector_table(input: &str) -> VectorTable {
    let mut table = VectorTable::default();
    let mut inside_data = false;

    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with(SOE_TOKEN) {
            inside_data = true;
            table.start_marker_seen = true;
            continue;
        }
        if line.starts_with(EOE_TOKEN) {
            inside_data = false;
            continue;
        }
        if !inside_data {
            continue;
        }

        match record(line) {
            Ok((_, rec)) => table.records.push(rec),
            Err(e) => {
                debug!(line, error = %e, "Ignoring ephemeris line");
                table.ignored_lines += 1;
            }
        }
    }

    table
}

/// Parse a single data row
pub fn record(s: &str) -> Result<&str, EphemerisRecord> {
    let (s, fields) = separated_list1(char(FIELD_DELIMITER), field)(s)?;
    if fields.len() < 2 {
        return Err(Error(ParseError::NotARecord));
    }
    if fields.len() < MIN_RECORD_FIELDS {
        return Err(Error(ParseError::ShortRecord(fields.len())));
    }

    let km = |idx: usize| number(fields[idx]) * METERS_PER_KILOMETER;

    let time_index = match calendar_date(fields[1].trim()) {
        Ok((_, t)) => t,
        Err(e) => {
            warn!(date = fields[1].trim(), error = %e, "Unreadable calendar date");
            TimeIndex::default()
        }
    };

    Ok((
        s,
        EphemerisRecord {
            julian_day: number(fields[0]),
            time_index,
            position: na::Vector3::new(km(2), km(3), km(4)),
            velocity: na::Vector3::new(km(5), km(6), km(7)),
            light_time: number(fields[8]),
            range: km(9),
            range_rate: km(10),
        },
    ))
}

fn field(s: &str) -> Result<&str, &str> {
    take_till(|c| c == FIELD_DELIMITER)(s)
}

fn number(s: &str) -> f64 {
    let s = s.trim();
    match all_consuming(double::<&str, ParseError<&str>>)(s) {
        Ok((_, v)) => v,
        Err(_) => {
            debug!(field = s, "Unparseable numeric field, using 0");
            0.0
        }
    }
}

/// `A.D. 2018-Jun-13 00:00:00.0000`, fractional seconds are truncated
fn calendar_date(s: &str) -> Result<&str, TimeIndex> {
    let (s, _) = opt(tag("A.D."))(s)?;
    let (s, _) = space0(s)?;
    let (s, year) = i32(s)?;
    let (s, _) = char('-')(s)?;
    let (s, month) = month(s)?;
    let (s, _) = char('-')(s)?;
    let (s, day) = u32(s)?;
    let (s, _) = space1(s)?;
    let (s, hour) = u32(s)?;
    let (s, _) = char(':')(s)?;
    let (s, minute) = u32(s)?;
    let (s, _) = char(':')(s)?;
    let (s, seconds) = double(s)?;

    let utc = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, seconds.trunc() as u32))
        .ok_or(Error(ParseError::CalendarDate))?
        .and_utc();
    Ok((s, TimeIndex::from_utc(&utc)))
}

fn month(s: &str) -> Result<&str, u32> {
    let (s, name) = alpha1(s)?;
    let m = match name {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return Err(Error(ParseError::Month)),
    };
    Ok((s, m))
}

impl<I> nom::error::ParseError<I> for ParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        ParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const TABLE: &str = indoc! {r#"
        *******************************************************************************
        Ephemeris / WWW_USER Wed Jun 13 12:00:00 2018 Pasadena, USA      / Horizons
        *******************************************************************************
        Target body name: Earth (399)                     {source: DE431mx}
        Center body name: Solar System Barycenter (0)     {source: DE431mx}
        Output units    : KM-S
        *******************************************************************************
                    JDTDB,            Calendar Date (TDB),                      X,                      Y,                      Z,                     VX,                     VY,                     VZ,                     LT,                     RG,                     RR,
        **************************************************************************************************************************************************************************************************************************************************************
        $$SOE
        2458282.500000000, A.D. 2018-Jun-13 00:00:00.0000, -2.179945319184925E+07, -1.494093564869417E+08,  9.180457476446032E+03,  2.882042458624862E+01, -4.263212812706839E+00, -4.094094036434069E-04,  5.037648212700618E+02,  1.510251458591064E+08,  1.076218658378640E-01,
        2458282.541666667, A.D. 2018-Jun-13 01:00:00.0000, -2.169568008034024E+07, -1.494246868163024E+08,  9.178946834389539E+03,  2.882480693779463E+01, -4.253965929002064E+00, -4.096474131449028E-04,  5.037661132548237E+02,  1.510255331990021E+08,  1.075887693925462E-01,

        2458282.583333333, A.D. 2018-Jun-13 02:00:00.0000, -2.159189120851474E+07, -1.494399838634516E+08,  9.177427644290089E+03,  2.882918153023963E+01, -4.244713683052834E+00, -4.098894476099452E-04,  5.037674051367419E+02,  1.510259204200826E+08,  1.075556247155183E-01,
        $$EOE
        **************************************************************************************************************************************************************************************************************************************************************
        2458282.625000000, A.D. 2018-Jun-13 03:00:00.0000, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,
    "#};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> TimeIndex {
        TimeIndex::from_utc(
            &NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|d| d.and_hms_opt(h, min, s))
                .unwrap()
                .and_utc(),
        )
    }

    #[test]
    fn parse_calendar_date() {
        assert_eq!(
            calendar_date("A.D. 2018-Jun-13 00:00:00.0000"),
            Ok(("", utc(2018, 6, 13, 0, 0, 0)))
        );
        assert_eq!(
            calendar_date("A.D. 2019-Dec-31 23:59:59.9999"),
            Ok(("", utc(2019, 12, 31, 23, 59, 59)))
        );
        assert_eq!(
            calendar_date("A.D. 2018-Jux-13 00:00:00.0000"),
            Err(Error(ParseError::Month))
        );
        assert_eq!(
            calendar_date("A.D. 2018-Feb-30 00:00:00.0000"),
            Err(Error(ParseError::CalendarDate))
        );
    }

    #[test]
    fn parse_record_converts_to_meters() {
        let (_, rec) = record(
            "2458282.500000000, A.D. 2018-Jun-13 00:00:00.0000, 1.5, -2.0, 3.0, 0.5, 0.25, -1.0, 500.0, 2.0, 0.125,",
        )
        .unwrap();
        assert_eq!(rec.julian_day, 2458282.5);
        assert_eq!(rec.time_index, utc(2018, 6, 13, 0, 0, 0));
        assert_eq!(rec.position, na::Vector3::new(1500.0, -2000.0, 3000.0));
        assert_eq!(rec.velocity, na::Vector3::new(500.0, 250.0, -1000.0));
        // Light time stays in seconds
        assert_eq!(rec.light_time, 500.0);
        assert_eq!(rec.range, 2000.0);
        assert_eq!(rec.range_rate, 125.0);
    }

    #[test]
    fn malformed_numbers_become_zero() {
        let (_, rec) = record(
            "2458282.5, A.D. 2018-Jun-13 00:00:00.0000, abc, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0",
        )
        .unwrap();
        assert_eq!(rec.position.x, 0.0);
        assert_eq!(rec.position.y, 1000.0);
    }

    #[test]
    fn malformed_date_keeps_record() {
        let (_, rec) =
            record("2458282.5, sometime, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0").unwrap();
        assert_eq!(rec.time_index, TimeIndex::default());
        assert_eq!(rec.range, 1000.0);
    }

    #[test]
    fn short_and_non_records() {
        assert_eq!(
            record("2458282.5, A.D. 2018-Jun-13 00:00:00.0000, 1.0"),
            Err(Error(ParseError::ShortRecord(3)))
        );
        assert_eq!(
            record("Target body name: Earth (399)"),
            Err(Error(ParseError::NotARecord))
        );
    }

    #[test]
    fn table_only_reads_between_markers() {
        let table = parse_vector_table(TABLE);
        assert!(table.start_marker_seen);
        assert_eq!(table.len(), 3);
        assert_eq!(table.ignored_lines, 0);
        assert_eq!(table.first_time_index(), Some(utc(2018, 6, 13, 0, 0, 0)));
        assert_eq!(table.last_time_index(), Some(utc(2018, 6, 13, 2, 0, 0)));
        let dt = table.records[1].time_index.as_millis() - table.records[0].time_index.as_millis();
        assert_eq!(dt, 3_600_000);
    }

    #[test]
    fn table_without_markers_is_empty() {
        let table = parse_vector_table("1.0, A.D. 2018-Jun-13 00:00:00.0000, 1, 2, 3, 4, 5, 6, 7, 8, 9");
        assert!(!table.start_marker_seen);
        assert!(table.is_empty());
    }
}
