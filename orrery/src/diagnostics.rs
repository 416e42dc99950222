//! Non-fatal conditions raised while building meshes or seeding bodies.
//!
//! Components report into whatever [`Diagnostics`] they are handed instead of
//! reaching for a global status sink. The binaries use [`TracingDiagnostics`],
//! tests collect into a `Vec<Diagnostic>`.

use orrery_types::prelude::TimeIndex;
use tracing::warn;

#[derive(Clone, PartialEq, Debug)]
pub enum Diagnostic {
    /// Two adjacent rings could not be stitched and the seam was left open
    SeamSkipped {
        upper_row: usize,
        lower_row: usize,
        upper_len: usize,
        lower_len: usize,
    },
    /// The nearest record is close to the end of the available data
    StaleEphemeris {
        source: String,
        time_index: TimeIndex,
        records_remaining: usize,
    },
    /// No record at or before the requested time
    NoEphemeris { body: String, time_index: TimeIndex },
    /// A rebuild failed and the previous mesh was kept
    MeshRebuildFailed { body: String, reason: String },
}

pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl Diagnostics for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards every diagnostic to the tracing subscriber
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        use Diagnostic::*;
        match diagnostic {
            SeamSkipped {
                upper_row,
                lower_row,
                upper_len,
                lower_len,
            } => warn!(
                upper_row,
                lower_row,
                upper_len,
                lower_len,
                "Ring lengths do not fit a seam pattern, seam skipped"
            ),
            StaleEphemeris {
                source,
                time_index,
                records_remaining,
            } => warn!(
                source = %source,
                time_index = time_index.as_millis(),
                records_remaining,
                "Need new ephemeris data"
            ),
            NoEphemeris { body, time_index } => warn!(
                body = %body,
                time_index = time_index.as_millis(),
                "No ephemeris record at or before the requested time"
            ),
            MeshRebuildFailed { body, reason } => {
                warn!(body = %body, reason = %reason, "Mesh rebuild failed, keeping the previous mesh")
            }
        }
    }
}
