//! Floating emoji reactions over the stream.
//!
//! Each reaction lives for a fixed lifetime and then disappears. There is
//! no cap on how many can be visible at once.

use serde::{Deserialize, Serialize};

use crate::constants::live::{REACTION_X_MIN, REACTION_X_SPAN};
use crate::random::RandomSource;

/// The four reaction buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Rocket,
    Star,
    Heart,
    Telescope,
}

impl Reaction {
    pub const ALL: [Reaction; 4] = [
        Reaction::Rocket,
        Reaction::Star,
        Reaction::Heart,
        Reaction::Telescope,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            Reaction::Rocket => "🚀",
            Reaction::Star => "🌟",
            Reaction::Heart => "❤️",
            Reaction::Telescope => "🔭",
        }
    }
}

/// A reaction currently floating over the video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionMarker {
    pub id: u64,
    pub reaction: Reaction,
    /// Horizontal placement, percent of container width in `[10, 90]`.
    pub x_percent: f64,
    pub created_at_ms: u64,
    pub expires_at_ms: u64,
}

/// Set of visible reactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReactionOverlay {
    markers: Vec<ReactionMarker>,
    next_id: u64,
}

impl ReactionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker at a random horizontal position.
    pub fn spawn<R: RandomSource + ?Sized>(
        &mut self,
        reaction: Reaction,
        rng: &mut R,
        now_ms: u64,
        lifetime_ms: u64,
    ) -> &ReactionMarker {
        let x_percent = rng.next_unit() * REACTION_X_SPAN + REACTION_X_MIN;
        self.next_id += 1;
        self.markers.push(ReactionMarker {
            id: self.next_id,
            reaction,
            x_percent,
            created_at_ms: now_ms,
            expires_at_ms: now_ms + lifetime_ms,
        });
        &self.markers[self.markers.len() - 1]
    }

    /// Remove one marker. Returns whether it was present.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| m.id != id);
        self.markers.len() != before
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn contains(&self, id: u64) -> bool {
        self.markers.iter().any(|m| m.id == id)
    }

    pub fn markers(&self) -> &[ReactionMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn test_placement_range() {
        let mut overlay = ReactionOverlay::new();
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.999_999]);
        let xs: Vec<f64> = (0..3)
            .map(|_| overlay.spawn(Reaction::Rocket, &mut rng, 0, 2000).x_percent)
            .collect();
        assert_eq!(xs[0], 10.0);
        assert_eq!(xs[1], 50.0);
        assert!(xs[2] < 90.0 && xs[2] > 89.9);
    }

    #[test]
    fn test_marker_lifetime_stamps() {
        let mut overlay = ReactionOverlay::new();
        let mut rng = ScriptedRandom::constant(0.5);
        let marker = overlay.spawn(Reaction::Heart, &mut rng, 100, 2000);
        assert_eq!(marker.created_at_ms, 100);
        assert_eq!(marker.expires_at_ms, 2100);
    }

    #[test]
    fn test_remove_only_target() {
        let mut overlay = ReactionOverlay::new();
        let mut rng = ScriptedRandom::constant(0.5);
        let a = overlay.spawn(Reaction::Star, &mut rng, 0, 2000).id;
        let b = overlay.spawn(Reaction::Telescope, &mut rng, 0, 2000).id;
        assert!(overlay.remove(a));
        assert!(!overlay.remove(a));
        assert!(overlay.contains(b));
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn test_emoji() {
        assert_eq!(Reaction::Rocket.emoji(), "🚀");
        assert_eq!(Reaction::ALL.len(), 4);
    }
}
