extern crate nalgebra as na;

pub mod ephemeris;
pub mod planet;
pub mod prelude;
pub mod time;
