pub extern crate nalgebra as na;

pub mod body;
pub mod celestial;
pub mod diagnostics;
pub mod ephemeris;
pub mod export;
pub mod integrator;
pub mod math;
pub mod mesh;
pub mod orientation;
pub mod scenario;
pub mod sim_info;
pub mod solar_system;
pub mod units;
