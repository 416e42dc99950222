//! A lightweight uom-ish library for the quantities the simulation passes around.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use orrery_types::prelude::{TimeIndex, UtcTimestamp};

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Length {
    meters: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.meters)
    }
}

impl Length {
    pub fn from_meters(meters: f64) -> Length {
        Length { meters }
    }

    pub fn from_kilometers(km: f64) -> Length {
        Length {
            meters: km * 1000.0,
        }
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }
}

impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Self::Output {
        Length::from_meters(self * rhs.as_meters())
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Mass {
    kilograms: f64,
}

impl std::fmt::Debug for Mass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kg", self.kilograms)
    }
}

impl Mass {
    pub fn from_kilograms(kilograms: f64) -> Mass {
        Mass { kilograms }
    }

    pub fn as_kilograms(&self) -> f64 {
        self.kilograms
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Timestamp {
    utc: UtcTimestamp,
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utc)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utc)
    }
}

impl Timestamp {
    pub fn epoch() -> Timestamp {
        Timestamp::from_utc(UtcTimestamp::default())
    }

    pub fn from_utc(utc: UtcTimestamp) -> Timestamp {
        Timestamp { utc }
    }

    pub fn as_utc(&self) -> &UtcTimestamp {
        &self.utc
    }

    pub fn as_millis(&self) -> i64 {
        self.utc.timestamp_millis()
    }

    /// Key used to look up ephemeris records
    pub fn time_index(&self) -> TimeIndex {
        TimeIndex::from_utc(&self.utc)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Time;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        Time::from_chrono_duration(*self.as_utc() - *rhs.as_utc())
    }
}

impl Add<Time> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Time) -> Self::Output {
        let mut ts = self;
        ts += rhs;
        ts
    }
}

impl AddAssign<Time> for Timestamp {
    fn add_assign(&mut self, rhs: Time) {
        self.utc += chrono::Duration::milliseconds(rhs.as_millis().round() as i64);
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Time {
    seconds: f64,
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} s", self.seconds)
    }
}

impl Time {
    pub fn from_chrono_duration(duration: chrono::Duration) -> Time {
        Time::from_millis(duration.num_milliseconds() as f64)
    }

    pub fn from_std_duration(duration: std::time::Duration) -> Time {
        Time::from_secs(duration.as_secs_f64())
    }

    pub fn from_hours(hours: f64) -> Time {
        Self::from_minutes(hours * 60.0)
    }

    pub fn from_minutes(minutes: f64) -> Time {
        Self::from_secs(minutes * 60.0)
    }

    pub fn from_secs(seconds: f64) -> Time {
        Time { seconds }
    }

    pub fn from_millis(millis: f64) -> Time {
        Time {
            seconds: millis / 1000.0,
        }
    }

    pub fn as_secs(&self) -> f64 {
        self.seconds
    }

    pub fn as_millis(&self) -> f64 {
        self.seconds * 1_000.0
    }
}

impl Add<Time> for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Self::Output {
        Time::from_secs(self.as_secs() + rhs.as_secs())
    }
}

impl AddAssign<Time> for Time {
    fn add_assign(&mut self, rhs: Time) {
        self.seconds += rhs.as_secs()
    }
}

impl Sub<Time> for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Self::Output {
        Time::from_secs(self.as_secs() - rhs.as_secs())
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Self::Output {
        Time::from_secs(self.as_secs() / rhs)
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Angle {
    radians: f64,
}

impl std::fmt::Debug for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.as_degrees())
    }
}

impl Angle {
    pub fn zero() -> Angle {
        Angle { radians: 0.0 }
    }

    pub fn from_degrees(degrees: f64) -> Angle {
        Angle {
            radians: degrees.to_radians(),
        }
    }

    pub fn from_radians(radians: f64) -> Angle {
        Angle { radians }
    }

    pub fn as_degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    pub fn as_radians(&self) -> f64 {
        self.radians
    }
}

impl Add<Angle> for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Self::Output {
        Angle::from_radians(self.as_radians() + rhs.as_radians())
    }
}

impl AddAssign<Angle> for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        self.radians += rhs.as_radians()
    }
}

impl Sub<Angle> for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Self::Output {
        Angle::from_radians(self.as_radians() - rhs.as_radians())
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Self::Output {
        Angle::from_radians(-self.as_radians())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct AngularVelocity {
    radians_per_second: f64,
}

impl std::fmt::Debug for AngularVelocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} °·s⁻¹", self.as_degrees_per_second())
    }
}

impl AngularVelocity {
    pub fn from_degrees_per_second(degrees_per_second: f64) -> AngularVelocity {
        AngularVelocity {
            radians_per_second: degrees_per_second.to_radians(),
        }
    }

    pub fn from_radians_per_second(radians_per_second: f64) -> AngularVelocity {
        AngularVelocity { radians_per_second }
    }

    /// One full turn per `period`
    pub fn from_period(period: Time) -> AngularVelocity {
        AngularVelocity {
            radians_per_second: std::f64::consts::TAU / period.as_secs(),
        }
    }

    pub fn as_degrees_per_second(&self) -> f64 {
        self.radians_per_second.to_degrees()
    }

    pub fn as_radians_per_second(&self) -> f64 {
        self.radians_per_second
    }
}

impl Mul<Time> for AngularVelocity {
    type Output = Angle;

    fn mul(self, rhs: Time) -> Self::Output {
        Angle::from_radians(self.as_radians_per_second() * rhs.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_day_of_earth_rotation_is_a_full_turn() {
        let rate = AngularVelocity::from_period(Time::from_hours(24.0));
        let angle = rate * Time::from_minutes(24.0 * 60.0);
        assert_relative_eq!(angle.as_degrees(), 360.0, epsilon = 1e-9);
    }

    #[test]
    fn timestamp_arithmetic() {
        let t0 = Timestamp::epoch();
        let t1 = t0 + Time::from_minutes(10.0);
        assert_eq!(t1.as_millis(), 600_000);
        assert_relative_eq!((t1 - t0).as_secs(), 600.0);
        assert_eq!(t1.time_index(), TimeIndex::from_millis(600_000));
    }
}
