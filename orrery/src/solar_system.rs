//! Ties the bodies, the integrator and the simulation clock together.
//!
//! This is the outer boundary for recoverable errors: a mesh that fails to
//! rebuild or a body without ephemeris data is logged and the simulation keeps
//! going. Only an invalid gravitational source stops a step.

use crate::{
    celestial::{CelestialBody, SurfaceModel},
    diagnostics::{Diagnostic, Diagnostics},
    ephemeris::EphemerisStore,
    integrator::{IntegratorError, NBodyIntegrator},
    math::Vector3,
    orientation,
    scenario::Scenario,
    sim_info::SimulationInfo,
    units::{Time, Timestamp},
};
use tracing::{debug, info, warn};

/// Name of the body used to align the others' rotation
pub const SUN: &str = "Sun";

/// Orientation added by [`SolarSystem::rotate_view`]
pub const ROTATE_VIEW_HOURS: f64 = 0.5;

#[derive(Debug)]
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
    integrator: NBodyIntegrator,
    sim_info: SimulationInfo,
    display_scale: f64,
}

impl SolarSystem {
    pub fn new(
        bodies: Vec<CelestialBody>,
        integrator: NBodyIntegrator,
        start: Timestamp,
        display_scale: f64,
    ) -> Self {
        SolarSystem {
            bodies,
            integrator,
            sim_info: SimulationInfo::new(start),
            display_scale,
        }
    }

    /// Load every body's ephemeris and set up the clocks.
    ///
    /// A body whose ephemeris can't be read starts with an empty store.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        info!(
            scenario = %scenario.name,
            bodies = scenario.bodies.len(),
            start = %scenario.start,
            "Building solar system"
        );
        let bodies = scenario
            .bodies
            .iter()
            .map(|cfg| {
                let store = match cfg.ephemeris.as_ref() {
                    Some(path) => EphemerisStore::load(path).unwrap_or_else(|e| {
                        warn!(body = %cfg.name, error = %e, "Ephemeris unavailable");
                        EphemerisStore::new(path.display().to_string(), Vec::new())
                    }),
                    None => EphemerisStore::new(cfg.name.clone(), Vec::new()),
                };
                cfg.celestial_body(store)
            })
            .collect();
        Self::new(
            bodies,
            NBodyIntegrator::new(scenario.time_step),
            scenario.start,
            scenario.display_scale,
        )
    }

    pub fn sim_info(&self) -> &SimulationInfo {
        &self.sim_info
    }

    pub fn integrator(&self) -> &NBodyIntegrator {
        &self.integrator
    }

    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies
            .iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    pub fn body_mut(&mut self, name: &str) -> Option<&mut CelestialBody> {
        self.bodies
            .iter_mut()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Set every body from its nearest record at or before the current time.
    ///
    /// Returns how many bodies were seeded. The rest keep their state.
    pub fn seed_from_ephemeris(&mut self, diagnostics: &mut dyn Diagnostics) -> usize {
        let time_index = self.sim_info.timestamp.time_index();
        let mut seeded = 0;
        for b in self.bodies.iter_mut() {
            if b.state.seed_from_ephemeris(time_index, diagnostics) {
                seeded += 1;
            }
        }
        info!(
            seeded,
            bodies = self.bodies.len(),
            time = %self.sim_info.timestamp,
            "Seeded from ephemeris"
        );
        seeded
    }

    /// Point each spinning geoid's prime meridian at the sun for the current time of day
    pub fn align_rotation(&mut self) {
        let sun_position = match self.body(SUN) {
            Some(sun) => sun.state.position,
            None => {
                warn!("No sun to align rotation against");
                return;
            }
        };
        let at = self.sim_info.timestamp;
        for b in self.bodies.iter_mut().filter(|b| b.is_spinning_geoid()) {
            let angle = orientation::sun_aligned_angle(
                &b.state.position,
                &sun_position,
                &at,
                b.clock.rate(),
            );
            b.clock.set_angle(angle);
            debug!(body = %b.name(), angle = angle.as_degrees(), "Aligned rotation to the sun");
        }
    }

    /// One integrator step, then new meshes at the new positions
    pub fn step(&mut self, diagnostics: &mut dyn Diagnostics) -> Result<(), IntegratorError> {
        self.step_dynamics()?;
        self.rebuild_meshes(diagnostics);
        Ok(())
    }

    /// One integrator step without touching the meshes
    pub fn step_dynamics(&mut self) -> Result<(), IntegratorError> {
        self.integrator
            .step_with(&mut self.bodies, |b| &mut b.state)?;
        self.sim_info.sim_step(self.integrator.dt);
        debug!(
            iteration = self.sim_info.sim_iteration,
            time = %self.sim_info.timestamp,
            "Integrator step"
        );
        Ok(())
    }

    /// Move the clock and every body's rotation, without integrating
    pub fn add_minutes(&mut self, minutes: f64) {
        let dt = Time::from_minutes(minutes);
        self.sim_info.advance(dt);
        for b in self.bodies.iter_mut() {
            b.clock.advance(dt);
        }
    }

    /// Turn every body by half an hour of its own rotation and rebuild
    pub fn rotate_view(&mut self, diagnostics: &mut dyn Diagnostics) {
        for b in self.bodies.iter_mut() {
            b.clock.advance_hours(ROTATE_VIEW_HOURS);
        }
        self.rebuild_meshes(diagnostics);
    }

    /// Returns how many meshes were rebuilt. Failed bodies keep their last mesh.
    pub fn rebuild_meshes(&mut self, diagnostics: &mut dyn Diagnostics) -> usize {
        let mut rebuilt = 0;
        for b in self.bodies.iter_mut() {
            let result = b.build_mesh(diagnostics).map(|_| ());
            match result {
                Ok(()) => rebuilt += 1,
                Err(e) => diagnostics.report(Diagnostic::MeshRebuildFailed {
                    body: b.name().to_owned(),
                    reason: e.to_string(),
                }),
            }
        }
        rebuilt
    }

    /// Position in render units
    pub fn scaled_position(&self, name: &str) -> Option<Vector3> {
        self.body(name)
            .map(|b| b.state.position * self.display_scale)
    }

    /// Put a body at the origin, e.g. to inspect it up close
    pub fn zero_body_position(&mut self, name: &str, diagnostics: &mut dyn Diagnostics) -> bool {
        match self.body_mut(name) {
            Some(b) => {
                b.state.position = Vector3::zeros();
                self.rebuild_meshes(diagnostics);
                true
            }
            None => false,
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.integrator
            .total_energy(self.bodies.iter().map(|b| &b.state))
    }
}
