use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::ephemeris::EphemerisStore;
use crate::math::Vector3;
use crate::units::Mass;
use orrery_types::prelude::*;

/// Kinematic state of one gravitating body, in meters and seconds
#[derive(Clone, PartialEq, Debug)]
pub struct BodyState {
    pub name: String,
    pub position: Vector3,
    pub velocity: Vector3,
    pub acceleration: Vector3,
    pub mass: Mass,
    pub ephemeris: EphemerisStore,
}

impl BodyState {
    pub fn new<S: Into<String>>(name: S, mass: Mass, ephemeris: EphemerisStore) -> Self {
        BodyState {
            name: name.into(),
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            mass,
            ephemeris,
        }
    }

    /// Position and velocity from the nearest record at or before `time_index`.
    ///
    /// Returns false, leaving the state untouched, when there is no such record.
    pub fn seed_from_ephemeris(
        &mut self,
        time_index: TimeIndex,
        diagnostics: &mut dyn Diagnostics,
    ) -> bool {
        let nearest = match self.ephemeris.nearest_at_or_before(time_index) {
            Some(n) => n,
            None => {
                diagnostics.report(Diagnostic::NoEphemeris {
                    body: self.name.clone(),
                    time_index,
                });
                return false;
            }
        };

        if nearest.stale {
            diagnostics.report(Diagnostic::StaleEphemeris {
                source: self.ephemeris.label().to_owned(),
                time_index,
                records_remaining: nearest.records_remaining,
            });
        }

        self.position = nearest.record.position;
        self.velocity = nearest.record.velocity;
        self.acceleration = Vector3::zeros();
        true
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass.as_kilograms() * self.velocity.norm_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EphemerisStore {
        let recs = (0..20)
            .map(|i| EphemerisRecord {
                time_index: TimeIndex::from_millis(i * 1000),
                position: Vector3::new(i as f64, 0.0, 0.0),
                velocity: Vector3::new(0.0, i as f64, 0.0),
                ..Default::default()
            })
            .collect();
        EphemerisStore::new("moon.txt", recs)
    }

    #[test]
    fn seed_takes_nearest_earlier_record() {
        let mut diags: Vec<Diagnostic> = Vec::new();
        let mut b = BodyState::new("Moon", Mass::from_kilograms(7.342E22), store());
        b.acceleration = Vector3::new(1.0, 1.0, 1.0);
        assert!(b.seed_from_ephemeris(TimeIndex::from_millis(3500), &mut diags));
        assert_eq!(b.position, Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(b.velocity, Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(b.acceleration, Vector3::zeros());
        assert!(diags.is_empty());
    }

    #[test]
    fn seed_reports_stale_and_missing_data() {
        let mut diags: Vec<Diagnostic> = Vec::new();
        let mut b = BodyState::new("Moon", Mass::from_kilograms(7.342E22), store());
        assert!(b.seed_from_ephemeris(TimeIndex::from_millis(18_000), &mut diags));
        assert!(matches!(
            diags.as_slice(),
            [Diagnostic::StaleEphemeris { records_remaining: 1, .. }]
        ));

        diags.clear();
        b.position = Vector3::new(9.0, 9.0, 9.0);
        assert!(!b.seed_from_ephemeris(TimeIndex::from_millis(-1), &mut diags));
        assert_eq!(b.position, Vector3::new(9.0, 9.0, 9.0));
        assert!(matches!(diags.as_slice(), [Diagnostic::NoEphemeris { .. }]));
    }
}
