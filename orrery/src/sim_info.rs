use crate::units::{Time, Timestamp};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SimulationInfo {
    pub timestamp: Timestamp,
    pub sim_iteration: u64,
    pub relative_time: Time,
    pub real_time_start: Instant,
    pub real_time: Duration,
}

impl Default for SimulationInfo {
    fn default() -> Self {
        Self::new(Timestamp::epoch())
    }
}

impl SimulationInfo {
    pub fn new(start: Timestamp) -> Self {
        SimulationInfo {
            timestamp: start,
            sim_iteration: 0,
            relative_time: Time::from_secs(0.0),
            real_time_start: Instant::now(),
            real_time: Duration::ZERO,
        }
    }

    /// One integrator step
    pub fn sim_step(&mut self, dt: Time) {
        self.sim_iteration += 1;
        self.advance(dt);
    }

    /// Moves the clock without counting an integrator step
    pub fn advance(&mut self, dt: Time) {
        self.timestamp += dt;
        self.relative_time += dt;
        self.real_time = Instant::now().duration_since(self.real_time_start);
    }
}
