//! Timer payloads dispatched by the engine.

use serde::{Deserialize, Serialize};
use spacescope_logic::conversation::ReplyTicket;

/// Identifies one opened live session or mounted tracker.
///
/// Timer events carry it so late events for a closed component can be
/// recognised and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything the engine can schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Simulated assistant latency elapsed.
    ChatReply { ticket: ReplyTicket },
    /// Synthesize one stream comment.
    CommentTick { session: SessionId },
    /// Apply one viewer-count drift step.
    ViewerDrift { session: SessionId },
    /// A reaction reached the end of its lifetime.
    ReactionExpiry { session: SessionId, marker: u64 },
    /// Advance the ISS orbital angle.
    OrbitTick { tracker: SessionId },
}
