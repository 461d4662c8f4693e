//! Simulated ISS orbit and pass predictions.
//!
//! The orbital position is a single angle that advances a fixed step per
//! tick and wraps at 360°. With the default 0.5° step, 720 ticks make a
//! full revolution.
//!
//! ```
//! use spacescope_logic::orbit::OrbitalPosition;
//!
//! let mut pos = OrbitalPosition::default();
//! for _ in 0..721 {
//!     pos.advance(0.5);
//! }
//! assert_eq!(pos.angle(), 0.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::City;
use crate::constants::orbit::{FULL_TURN, INCLINATION_DEGREES};
use crate::constants::visibility::{
    DIRECTIONS, FIRST_HOUR, HOUR_SPAN, MINUTE_SPAN, MIN_MINUTES,
};
use crate::random::{pick, RandomSource};

/// Cyclic angle in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalPosition {
    angle: f64,
    inclination: f64,
}

impl OrbitalPosition {
    pub fn new(angle: f64, inclination: f64) -> Self {
        Self {
            angle: wrap_degrees(angle),
            inclination,
        }
    }

    /// Move forward by `step` degrees, wrapping at 360.
    pub fn advance(&mut self, step: f64) {
        self.angle = wrap_degrees(self.angle + step);
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }
}

impl Default for OrbitalPosition {
    fn default() -> Self {
        Self::new(0.0, INCLINATION_DEGREES)
    }
}

/// Normalize any finite angle into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Milliseconds for one full revolution at the given tick rate.
pub fn revolution_ms(tick_ms: u64, step_degrees: f64) -> u64 {
    let ticks = (FULL_TURN / step_degrees).ceil() as u64;
    ticks * tick_ms
}

/// A simulated visible pass over a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassPrediction {
    pub city: String,
    /// UTC hour in `6..=17`.
    pub hour: u32,
    pub minute: u32,
    /// Visible minutes in `2..=5`.
    pub duration_minutes: u32,
    pub direction: String,
}

impl PassPrediction {
    /// `HH:MM UTC`.
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02} UTC", self.hour, self.minute)
    }

    pub fn duration_label(&self) -> String {
        format!("{} minutes", self.duration_minutes)
    }
}

/// Draw a pass for `city`. Draw order: hour, minute, duration, direction.
pub fn predict_pass<R: RandomSource + ?Sized>(city: &City, rng: &mut R) -> PassPrediction {
    let hour = FIRST_HOUR + rng.below(HOUR_SPAN) as u32;
    let minute = rng.below(60) as u32;
    let duration_minutes = MIN_MINUTES + rng.below(MINUTE_SPAN) as u32;
    let direction = pick(rng, &DIRECTIONS).to_string();
    PassPrediction {
        city: city.name.clone(),
        hour,
        minute,
        duration_minutes,
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, ScriptedRandom};

    fn tokyo() -> City {
        City {
            name: "Tokyo".into(),
            lat: 35.6762,
            lng: 139.6503,
        }
    }

    #[test]
    fn test_full_revolution() {
        let mut pos = OrbitalPosition::default();
        for _ in 0..720 {
            pos.advance(0.5);
        }
        assert_eq!(pos.angle(), 0.0);
        pos.advance(0.5);
        assert_eq!(pos.angle(), 0.5);
    }

    #[test]
    fn test_angle_stays_in_range() {
        let mut pos = OrbitalPosition::new(359.9, 30.0);
        for _ in 0..10_000 {
            pos.advance(0.7);
            assert!((0.0..360.0).contains(&pos.angle()));
        }
    }

    #[test]
    fn test_wrap_negative() {
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(720.0), 0.0);
        assert_eq!(OrbitalPosition::new(-1e-18, 0.0).angle(), 0.0);
    }

    #[test]
    fn test_revolution_ms() {
        assert_eq!(revolution_ms(50, 0.5), 36_000);
    }

    #[test]
    fn test_pass_scripted() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.999, 0.25]);
        let pass = predict_pass(&tokyo(), &mut rng);
        assert_eq!(pass.hour, 6);
        assert_eq!(pass.minute, 30);
        assert_eq!(pass.duration_minutes, 5);
        assert_eq!(pass.direction, "Southwest to Southeast");
        assert_eq!(pass.time_label(), "06:30 UTC");
        assert_eq!(pass.duration_label(), "5 minutes");
    }

    #[test]
    fn test_pass_ranges() {
        let mut rng = RngSource::seeded(42);
        for _ in 0..500 {
            let pass = predict_pass(&tokyo(), &mut rng);
            assert!((6..=17).contains(&pass.hour));
            assert!(pass.minute < 60);
            assert!((2..=5).contains(&pass.duration_minutes));
            assert!(DIRECTIONS.contains(&pass.direction.as_str()));
        }
    }
}
