//! Reader for JPL Horizons vector tables exported as CSV

extern crate nalgebra as na;

pub use crate::parser::{parse_vector_table, record, ParseError};
pub use crate::table::VectorTable;

pub mod parser;
pub mod table;

/// Start of ephemeris marker
pub const SOE_TOKEN: &str = "$$SOE";
/// End of ephemeris marker
pub const EOE_TOKEN: &str = "$$EOE";
pub const FIELD_DELIMITER: char = ',';

/// JDTDB, Calendar Date, X, Y, Z, VX, VY, VZ, LT, RG, RR
pub const MIN_RECORD_FIELDS: usize = 11;

/// Horizons distances are in km and speeds in km/s
pub const METERS_PER_KILOMETER: f64 = 1000.0;
