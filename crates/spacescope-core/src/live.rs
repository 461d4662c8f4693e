//! Simulated live broadcast: comments, viewer drift, reactions, likes.
//!
//! Opening a session arms two repeating timers (comment generation and
//! viewer drift). Each reaction arms its own one-shot expiry timer.
//! [`LiveSession::close`] cancels all of them; a closed session never
//! changes again.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use spacescope_logic::catalog::SpaceEvent;
use spacescope_logic::comments::{Comment, CommentLog};
use spacescope_logic::config::LiveConfig;
use spacescope_logic::random::RandomSource;
use spacescope_logic::reactions::{Reaction, ReactionOverlay};
use spacescope_logic::viewers::ViewerCount;

use crate::error::{EngineError, Result};
use crate::events::{SessionId, TimerEvent};
use crate::scheduler::{Scheduler, TimerHandle};

/// Counters for what a session has produced so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStats {
    pub synthetic_comments: u64,
    pub own_comments: u64,
    pub drift_ticks: u64,
    pub reactions: u64,
}

pub struct LiveSession {
    id: SessionId,
    event_id: String,
    title: String,
    config: LiveConfig,
    viewers: ViewerCount,
    comments: CommentLog,
    reactions: ReactionOverlay,
    liked: bool,
    comment_timer: Option<TimerHandle>,
    viewer_timer: Option<TimerHandle>,
    reaction_timers: HashMap<u64, TimerHandle>,
    stats: LiveStats,
}

impl LiveSession {
    /// Join a live event and start its timers.
    pub fn open<S: Scheduler<TimerEvent> + ?Sized>(
        id: SessionId,
        event: &SpaceEvent,
        config: &LiveConfig,
        sched: &mut S,
    ) -> Result<Self> {
        if !event.is_live {
            return Err(EngineError::EventNotLive(event.id.clone()));
        }
        let comment_timer = sched.schedule_repeating(
            config.comment_interval_ms,
            TimerEvent::CommentTick { session: id },
        );
        let viewer_timer = sched.schedule_repeating(
            config.viewer_interval_ms,
            TimerEvent::ViewerDrift { session: id },
        );
        log::info!("live {}: joined `{}`", id, event.id);
        Ok(Self {
            id,
            event_id: event.id.clone(),
            title: event.title.clone(),
            config: config.clone(),
            viewers: ViewerCount::new(event.viewers.unwrap_or(0), config.viewer_floor),
            comments: CommentLog::new(config.comment_retain),
            reactions: ReactionOverlay::new(),
            liked: false,
            comment_timer: Some(comment_timer),
            viewer_timer: Some(viewer_timer),
            reaction_timers: HashMap::new(),
            stats: LiveStats::default(),
        })
    }

    /// Cancel every timer and clear floating reactions.
    pub fn close<S: Scheduler<TimerEvent> + ?Sized>(&mut self, sched: &mut S) {
        if let Some(h) = self.comment_timer.take() {
            sched.cancel(h);
        }
        if let Some(h) = self.viewer_timer.take() {
            sched.cancel(h);
        }
        for (_, h) in self.reaction_timers.drain() {
            sched.cancel(h);
        }
        self.reactions.clear();
        log::info!(
            "live {}: closed `{}` at {} viewers, {} comments",
            self.id,
            self.event_id,
            self.viewers.get(),
            self.comments.len()
        );
    }

    pub fn is_open(&self) -> bool {
        self.comment_timer.is_some()
    }

    /// Comment timer fired.
    pub fn on_comment_tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R, now_ms: u64) {
        if !self.is_open() {
            return;
        }
        let comment = self.comments.push_synthetic(rng, now_ms);
        log::trace!("live {}: {}: {}", self.id, comment.user, comment.text);
        self.stats.synthetic_comments += 1;
    }

    /// Viewer drift timer fired.
    pub fn on_viewer_drift<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        if !self.is_open() {
            return;
        }
        let delta = self.viewers.drift(rng);
        log::trace!("live {}: viewers {:+} -> {}", self.id, delta, self.viewers.get());
        self.stats.drift_ticks += 1;
    }

    /// A reaction's lifetime ended.
    pub fn on_reaction_expired(&mut self, marker: u64) -> bool {
        self.reaction_timers.remove(&marker);
        self.reactions.remove(marker)
    }

    /// Post a viewer comment immediately. Blank text is ignored.
    pub fn post_comment(&mut self, text: &str, now_ms: u64) -> Option<&Comment> {
        if !self.is_open() {
            return None;
        }
        let comment = self.comments.push_own(text, now_ms)?;
        self.stats.own_comments += 1;
        Some(comment)
    }

    /// Float a reaction and schedule its removal. Returns the marker id.
    pub fn react<S, R>(&mut self, reaction: Reaction, sched: &mut S, rng: &mut R) -> Option<u64>
    where
        S: Scheduler<TimerEvent> + ?Sized,
        R: RandomSource + ?Sized,
    {
        if !self.is_open() {
            return None;
        }
        let lifetime = self.config.reaction_lifetime_ms;
        let marker = self
            .reactions
            .spawn(reaction, rng, sched.now_ms(), lifetime)
            .id;
        let handle = sched.schedule_once(
            lifetime,
            TimerEvent::ReactionExpiry {
                session: self.id,
                marker,
            },
        );
        self.reaction_timers.insert(marker, handle);
        self.stats.reactions += 1;
        Some(marker)
    }

    /// Flip the like button. Returns the new state, or `None` once closed.
    pub fn toggle_like(&mut self) -> Option<bool> {
        if !self.is_open() {
            return None;
        }
        self.liked = !self.liked;
        Some(self.liked)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn viewers(&self) -> i64 {
        self.viewers.get()
    }

    pub fn comments(&self) -> &CommentLog {
        &self.comments
    }

    pub fn reactions(&self) -> &ReactionOverlay {
        &self.reactions
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn stats(&self) -> LiveStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TimerQueue;
    use spacescope_logic::catalog::Catalog;
    use spacescope_logic::random::ScriptedRandom;

    fn drive(
        session: &mut LiveSession,
        q: &mut TimerQueue<TimerEvent>,
        rng: &mut ScriptedRandom,
        delta: u64,
    ) {
        let until = q.now_ms() + delta;
        while let Some(fired) = q.pop_due(until) {
            match fired.event {
                TimerEvent::CommentTick { .. } => session.on_comment_tick(rng, fired.at_ms),
                TimerEvent::ViewerDrift { .. } => session.on_viewer_drift(rng),
                TimerEvent::ReactionExpiry { marker, .. } => {
                    session.on_reaction_expired(marker);
                }
                _ => {}
            }
        }
        q.settle(until);
    }

    fn open(q: &mut TimerQueue<TimerEvent>) -> LiveSession {
        let catalog = Catalog::builtin().unwrap();
        let event = catalog.event("iss-stream").unwrap();
        LiveSession::open(SessionId(1), event, &LiveConfig::default(), q).unwrap()
    }

    #[test]
    fn test_not_live_rejected() {
        let catalog = Catalog::builtin().unwrap();
        let event = catalog.event("perseids").unwrap();
        let mut q = TimerQueue::new();
        let err = LiveSession::open(SessionId(1), event, &LiveConfig::default(), &mut q);
        assert!(matches!(err, Err(EngineError::EventNotLive(_))));
        assert!(q.is_empty());
    }

    #[test]
    fn test_initial_viewers_from_event() {
        let mut q = TimerQueue::new();
        let session = open(&mut q);
        assert_eq!(session.viewers(), 3891);
        assert!(session.comments().is_empty());
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_comment_cadence() {
        let mut q = TimerQueue::new();
        let mut session = open(&mut q);
        let mut rng = ScriptedRandom::constant(0.5);
        drive(&mut session, &mut q, &mut rng, 2999);
        assert_eq!(session.comments().len(), 0);
        drive(&mut session, &mut q, &mut rng, 1);
        assert_eq!(session.comments().len(), 1);
        assert_eq!(session.comments().comments()[0].timestamp_ms, 3000);
    }

    #[test]
    fn test_comment_cap_over_long_run() {
        let mut q = TimerQueue::new();
        let mut session = open(&mut q);
        let mut rng = ScriptedRandom::new(vec![0.3, 0.6, 0.9]);
        drive(&mut session, &mut q, &mut rng, 300_000);
        assert_eq!(session.stats().synthetic_comments, 100);
        assert_eq!(session.comments().len(), 21);
        let stamps: Vec<_> = session
            .comments()
            .comments()
            .iter()
            .map(|c| c.timestamp_ms)
            .collect();
        let expected: Vec<_> = (80..=100).map(|k| k * 3000).collect();
        assert_eq!(stamps, expected);
    }

    #[test]
    fn test_viewer_drift_each_five_seconds() {
        let mut q = TimerQueue::new();
        let mut session = open(&mut q);
        // 0.95 -> +6 on every draw, comments consume draws too.
        let mut rng = ScriptedRandom::constant(0.95);
        drive(&mut session, &mut q, &mut rng, 10_000);
        assert_eq!(session.stats().drift_ticks, 2);
        assert_eq!(session.viewers(), 3891 + 12);
    }

    #[test]
    fn test_reaction_lifetime() {
        let mut q = TimerQueue::new();
        let mut session = open(&mut q);
        let mut rng = ScriptedRandom::constant(0.5);
        drive(&mut session, &mut q, &mut rng, 100);
        let id = session.react(Reaction::Rocket, &mut q, &mut rng).unwrap();

        drive(&mut session, &mut q, &mut rng, 1999);
        assert!(session.reactions().contains(id));
        drive(&mut session, &mut q, &mut rng, 1);
        assert!(!session.reactions().contains(id));
    }

    #[test]
    fn test_many_reactions_independent() {
        let mut q = TimerQueue::new();
        let mut session = open(&mut q);
        let mut rng = ScriptedRandom::constant(0.5);
        let first = session.react(Reaction::Star, &mut q, &mut rng).unwrap();
        drive(&mut session, &mut q, &mut rng, 1000);
        for _ in 0..50 {
            session.react(Reaction::Heart, &mut q, &mut rng);
        }
        assert_eq!(session.reactions().len(), 51);
        drive(&mut session, &mut q, &mut rng, 1000);
        assert!(!session.reactions().contains(first));
        assert_eq!(session.reactions().len(), 50);
        drive(&mut session, &mut q, &mut rng, 1000);
        assert!(session.reactions().is_empty());
    }

    #[test]
    fn test_own_comment_and_like() {
        let mut q = TimerQueue::new();
        let mut session = open(&mut q);
        assert!(session.post_comment("  ", 0).is_none());
        assert_eq!(session.post_comment("Hi!", 0).unwrap().user, "You");
        assert_eq!(session.toggle_like(), Some(true));
        assert_eq!(session.toggle_like(), Some(false));
    }

    #[test]
    fn test_close_stops_everything() {
        let mut q = TimerQueue::new();
        let mut session = open(&mut q);
        let mut rng = ScriptedRandom::constant(0.5);
        drive(&mut session, &mut q, &mut rng, 6000);
        session.react(Reaction::Telescope, &mut q, &mut rng);

        session.close(&mut q);
        assert!(q.is_empty());
        assert!(!session.is_open());
        assert!(session.reactions().is_empty());

        let viewers = session.viewers();
        let comments = session.comments().len();
        drive(&mut session, &mut q, &mut rng, 60_000);
        assert_eq!(session.viewers(), viewers);
        assert_eq!(session.comments().len(), comments);
        assert!(session.post_comment("late", 0).is_none());
        assert!(session.react(Reaction::Rocket, &mut q, &mut rng).is_none());
    }

    #[test]
    fn test_like_frozen_after_close() {
        let mut q = TimerQueue::new();
        let mut session = open(&mut q);
        assert_eq!(session.toggle_like(), Some(true));
        session.close(&mut q);
        assert_eq!(session.toggle_like(), None);
        assert!(session.liked());
    }
}
