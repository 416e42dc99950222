use crate::math::{vector, Vector3};
use crate::units::{Angle, AngularVelocity, Time, Timestamp};
use chrono::Timelike;

/// Rotation of a body about its own polar axis.
///
/// The angle only moves when asked to; integrator steps don't touch it.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct OrientationClock {
    angle: Angle,
    rate: AngularVelocity,
}

impl Default for OrientationClock {
    fn default() -> Self {
        Self::new(AngularVelocity::from_radians_per_second(0.0))
    }
}

impl OrientationClock {
    pub fn new(rate: AngularVelocity) -> Self {
        OrientationClock {
            angle: Angle::zero(),
            rate,
        }
    }

    /// Longitude phase used when building the body's surface
    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn set_angle(&mut self, angle: Angle) {
        self.angle = angle;
    }

    pub fn rate(&self) -> AngularVelocity {
        self.rate
    }

    pub fn advance(&mut self, dt: Time) {
        self.angle += self.rate * dt;
    }

    pub fn advance_seconds(&mut self, seconds: f64) {
        self.advance(Time::from_secs(seconds));
    }

    pub fn advance_minutes(&mut self, minutes: f64) {
        self.advance(Time::from_minutes(minutes));
    }

    pub fn advance_hours(&mut self, hours: f64) {
        self.advance(Time::from_hours(hours));
    }

    /// Face the body's prime meridian toward the sun at local noon.
    ///
    /// The body→sun direction projected on the XY plane sets the base angle
    /// from +X, then the time since noon turns it at the clock's own rate.
    pub fn align_to_sun(&mut self, body_position: &Vector3, sun_position: &Vector3, at: &Timestamp) {
        self.angle = sun_aligned_angle(body_position, sun_position, at, self.rate);
    }
}

pub fn sun_aligned_angle(
    body_position: &Vector3,
    sun_position: &Vector3,
    at: &Timestamp,
    rate: AngularVelocity,
) -> Angle {
    let mut toward_sun = sun_position - body_position;
    toward_sun.z = 0.0;
    let toward_sun = vector::normalize(&toward_sun);
    let base = Vector3::x().dot(&toward_sun).clamp(-1.0, 1.0).acos();

    let utc = at.as_utc();
    let hours = utc.hour() as f64 + (utc.minute() as f64 / 60.0) - 12.0;
    Angle::from_radians(base) + rate * Time::from_hours(hours)
}
