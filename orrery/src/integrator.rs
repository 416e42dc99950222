use crate::body::BodyState;
use crate::math::Vector3;
use crate::units::Time;
use orrery_types::prelude::Planet;

/// Bodies closer than this exert no force on each other [m]
pub const MIN_SEPARATION: f64 = 1.0;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum IntegratorError {
    #[error("Body '{name}' has mass {mass} kg, a gravitational source must have positive mass")]
    MasslessSource { name: String, mass: f64 },
}

/// Semi-implicit Euler over pairwise Newtonian gravity
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct NBodyIntegrator {
    pub dt: Time,
    pub gravitational_constant: f64,
}

impl Default for NBodyIntegrator {
    fn default() -> Self {
        Self::new(Time::from_minutes(10.0))
    }
}

impl NBodyIntegrator {
    pub fn new(dt: Time) -> Self {
        NBodyIntegrator {
            dt,
            gravitational_constant: Planet::GRAVITATIONAL_CONSTANT,
        }
    }

    /// Every body must be a valid gravitational source
    pub fn check_masses<'a, I>(bodies: I) -> Result<(), IntegratorError>
    where
        I: IntoIterator<Item = &'a BodyState>,
    {
        for b in bodies {
            let mass = b.mass.as_kilograms();
            // Also rejects NaN
            if !(mass > 0.0) {
                return Err(IntegratorError::MasslessSource {
                    name: b.name.clone(),
                    mass,
                });
            }
        }
        Ok(())
    }

    /// Advance all bodies by one step.
    ///
    /// Positions move with the current velocity, accelerations are then
    /// recomputed from a snapshot of the new positions, and finally velocities
    /// pick up `a·dt`. Nothing is modified when a body fails the mass check.
    pub fn step(&self, bodies: &mut [BodyState]) -> Result<(), IntegratorError> {
        self.step_with(bodies, |b| b)
    }

    /// Like [`Self::step`] for bodies embedded in a larger type
    pub fn step_with<T, F>(&self, items: &mut [T], mut state: F) -> Result<(), IntegratorError>
    where
        F: FnMut(&mut T) -> &mut BodyState,
    {
        let dt = self.dt.as_secs();

        for item in items.iter_mut() {
            Self::check_masses(std::iter::once(&*state(item)))?;
        }

        for item in items.iter_mut() {
            let b = state(item);
            b.position += b.velocity * dt;
        }

        let sources: Vec<(Vector3, f64)> = items
            .iter_mut()
            .map(|item| {
                let b = state(item);
                (b.position, b.mass.as_kilograms())
            })
            .collect();

        for (idx, item) in items.iter_mut().enumerate() {
            let b = state(item);
            b.acceleration = self.acceleration_at(idx, &b.position, &sources);
            b.velocity += b.acceleration * dt;
        }

        Ok(())
    }

    fn acceleration_at(&self, idx: usize, position: &Vector3, sources: &[(Vector3, f64)]) -> Vector3 {
        let mut acceleration = Vector3::zeros();
        for (other_idx, (other_position, mass)) in sources.iter().enumerate() {
            if other_idx == idx {
                continue;
            }
            let toward = other_position - position;
            let distance = toward.norm();
            if distance < MIN_SEPARATION {
                continue;
            }
            let magnitude = self.gravitational_constant * mass / (distance * distance);
            acceleration += toward * (magnitude / distance);
        }
        acceleration
    }

    /// Kinetic plus pairwise potential energy [J]
    pub fn total_energy<'a, I>(&self, bodies: I) -> f64
    where
        I: IntoIterator<Item = &'a BodyState>,
    {
        let bodies: Vec<&BodyState> = bodies.into_iter().collect();
        let kinetic: f64 = bodies.iter().map(|b| b.kinetic_energy()).sum();
        let mut potential = 0.0;
        for (i, a) in bodies.iter().enumerate() {
            for b in bodies.iter().skip(i + 1) {
                let distance = (b.position - a.position).norm();
                if distance < MIN_SEPARATION {
                    continue;
                }
                potential -= self.gravitational_constant
                    * a.mass.as_kilograms()
                    * b.mass.as_kilograms()
                    / distance;
            }
        }
        kinetic + potential
    }
}
