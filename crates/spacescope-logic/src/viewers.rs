//! Viewer count drift.
//!
//! Every drift tick moves the count by `floor(r * 10) - 3`, a delta in
//! `-3..=6`. Nothing stops the count going negative unless a floor is
//! configured.

use serde::{Deserialize, Serialize};

use crate::constants::live::{VIEWER_DELTA_OFFSET, VIEWER_DELTA_SPAN};
use crate::random::RandomSource;

/// Draw one drift delta.
pub fn drift_delta<R: RandomSource + ?Sized>(rng: &mut R) -> i64 {
    (rng.next_unit() * VIEWER_DELTA_SPAN as f64).floor() as i64 - VIEWER_DELTA_OFFSET
}

/// Viewer count with an optional lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerCount {
    value: i64,
    floor: Option<i64>,
}

impl ViewerCount {
    pub fn new(initial: i64, floor: Option<i64>) -> Self {
        let value = match floor {
            Some(min) => initial.max(min),
            None => initial,
        };
        Self { value, floor }
    }

    /// Apply one random drift step and return the delta drawn.
    pub fn drift<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> i64 {
        let delta = drift_delta(rng);
        self.apply(delta);
        delta
    }

    pub fn apply(&mut self, delta: i64) {
        let next = self.value.saturating_add(delta);
        self.value = match self.floor {
            Some(min) => next.max(min),
            None => next,
        };
    }

    pub fn get(&self) -> i64 {
        self.value
    }

    pub fn floor(&self) -> Option<i64> {
        self.floor
    }
}
