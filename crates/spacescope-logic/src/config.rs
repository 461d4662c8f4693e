//! Simulation configuration - timings, retention and policy knobs.
//!
//! Every field has a default matching the live site, so an empty TOML
//! document is a valid configuration. [`SimConfig::validate`] rejects
//! values that would stall or break the scheduler.
//!
//! ```
//! use spacescope_logic::config::SimConfig;
//!
//! let config = SimConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.live.comment_interval_ms, 3000);
//! assert_eq!(config.live.viewer_floor, None);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{chat, live, orbit};
use crate::conversation::ReplyOrdering;
use crate::error::{LogicError, Result};

/// Assistant reply timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub reply_base_delay_ms: u64,
    /// Upper bound (exclusive) of the random extra delay.
    pub reply_jitter_ms: u64,
    pub ordering: ReplyOrdering,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_base_delay_ms: chat::REPLY_BASE_DELAY_MS,
            reply_jitter_ms: chat::REPLY_JITTER_MS,
            ordering: ReplyOrdering::Unordered,
        }
    }
}

/// Live stream simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    pub comment_interval_ms: u64,
    pub viewer_interval_ms: u64,
    /// Existing comments kept before each append.
    pub comment_retain: usize,
    pub reaction_lifetime_ms: u64,
    /// Lower bound for the viewer count. `None` lets it drift negative.
    pub viewer_floor: Option<i64>,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            comment_interval_ms: live::COMMENT_INTERVAL_MS,
            viewer_interval_ms: live::VIEWER_INTERVAL_MS,
            comment_retain: live::COMMENT_RETAIN,
            reaction_lifetime_ms: live::REACTION_LIFETIME_MS,
            viewer_floor: None,
        }
    }
}

/// ISS tracker animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub tick_ms: u64,
    pub step_degrees: f64,
    pub inclination_degrees: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            tick_ms: orbit::TICK_MS,
            step_degrees: orbit::STEP_DEGREES,
            inclination_degrees: orbit::INCLINATION_DEGREES,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub chat: ChatConfig,
    pub live: LiveConfig,
    pub orbit: OrbitConfig,
    /// Seed for reproducible runs. `None` seeds from entropy.
    pub seed: Option<u64>,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> LogicError {
    LogicError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.live.comment_interval_ms == 0 {
            return Err(invalid("live.comment_interval_ms", "must be positive"));
        }
        if self.live.viewer_interval_ms == 0 {
            return Err(invalid("live.viewer_interval_ms", "must be positive"));
        }
        if self.live.reaction_lifetime_ms == 0 {
            return Err(invalid("live.reaction_lifetime_ms", "must be positive"));
        }
        if self.orbit.tick_ms == 0 {
            return Err(invalid("orbit.tick_ms", "must be positive"));
        }
        if !self.orbit.step_degrees.is_finite() || self.orbit.step_degrees <= 0.0 {
            return Err(invalid(
                "orbit.step_degrees",
                format!("must be a positive number, got {}", self.orbit.step_degrees),
            ));
        }
        if self
            .chat
            .reply_base_delay_ms
            .checked_add(self.chat.reply_jitter_ms)
            .is_none()
        {
            return Err(invalid("chat.reply_jitter_ms", "base + jitter overflows"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site() {
        let c = SimConfig::default();
        assert_eq!(c.chat.reply_base_delay_ms, 1000);
        assert_eq!(c.chat.reply_jitter_ms, 1000);
        assert_eq!(c.live.viewer_interval_ms, 5000);
        assert_eq!(c.live.comment_retain, 20);
        assert_eq!(c.live.reaction_lifetime_ms, 2000);
        assert_eq!(c.orbit.tick_ms, 50);
        assert_eq!(c.orbit.step_degrees, 0.5);
        assert!(c.seed.is_none());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let mut c = SimConfig::default();
        c.live.comment_interval_ms = 0;
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("live.comment_interval_ms"));
    }

    #[test]
    fn test_rejects_bad_step() {
        let mut c = SimConfig::default();
        c.orbit.step_degrees = f64::NAN;
        assert!(c.validate().is_err());
        c.orbit.step_degrees = -0.5;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_json_partial() {
        let c: SimConfig =
            serde_json::from_str(r#"{"live": {"viewer_floor": 0}, "seed": 7}"#).unwrap();
        assert_eq!(c.live.viewer_floor, Some(0));
        assert_eq!(c.live.comment_interval_ms, 3000);
        assert_eq!(c.seed, Some(7));
    }
}
