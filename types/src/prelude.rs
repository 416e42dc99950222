pub use crate::ephemeris::EphemerisRecord;
pub use crate::planet::Planet;
pub use crate::time::{TimeIndex, UtcTimestamp};
