use crate::time::TimeIndex;
use derive_more::Display;

/// One row of a Horizons vector table, converted to SI units
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display)]
#[display(
    fmt = "{{time_index: {}, position: {}, velocity: {}}}",
    "time_index",
    "position",
    "velocity"
)]
pub struct EphemerisRecord {
    /// Julian day number (TDB)
    pub julian_day: f64,

    /// Calendar date as an ordering key
    pub time_index: TimeIndex,

    /// Position, [m], ICRF
    pub position: na::Vector3<f64>,

    /// Velocity, [m/s], ICRF
    pub velocity: na::Vector3<f64>,

    /// One-way down-leg light time, [s]
    pub light_time: f64,

    /// Range from the coordinate center, [m]
    pub range: f64,

    /// Range rate, [m/s]
    pub range_rate: f64,
}
