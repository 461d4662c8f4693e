//! Simulation engine - owns the clock, the random source and every view.

use spacescope_logic::catalog::{Catalog, Satellite, SatelliteFilter};
use spacescope_logic::comments::Comment;
use spacescope_logic::config::SimConfig;
use spacescope_logic::conversation::{ConversationLog, ReplyTicket};
use spacescope_logic::orbit::{predict_pass, PassPrediction};
use spacescope_logic::random::{RandomSource, RngSource};
use spacescope_logic::reactions::Reaction;
use spacescope_logic::sky::{pointing, Pointing};

use crate::chat::ChatSession;
use crate::error::{EngineError, Result};
use crate::events::{SessionId, TimerEvent};
use crate::live::LiveSession;
use crate::scheduler::{Fired, Scheduler, TimerQueue};
use crate::tracker::IssTracker;

/// Main simulation engine
///
/// Time only moves when [`SpaceScopeEngine::update`] is called, so a
/// headless run can jump minutes ahead instantly and a realtime driver
/// can call it with wall-clock deltas.
pub struct SpaceScopeEngine {
    config: SimConfig,
    catalog: Catalog,
    timers: TimerQueue<TimerEvent>,
    rng: Box<dyn RandomSource>,
    chat: ChatSession,
    live: Option<LiveSession>,
    tracker: Option<IssTracker>,
    next_session: u64,
}

impl SpaceScopeEngine {
    /// Create an engine with the embedded catalog.
    ///
    /// Uses `config.seed` for a reproducible random source when present.
    pub fn new(config: SimConfig) -> Result<Self> {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        };
        Self::with_parts(config, Catalog::builtin()?, rng)
    }

    /// Create an engine from explicit parts, e.g. a scripted random source.
    pub fn with_parts(
        config: SimConfig,
        catalog: Catalog,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            chat: ChatSession::new(config.chat.clone()),
            config,
            catalog,
            timers: TimerQueue::new(),
            rng,
            live: None,
            tracker: None,
            next_session: 0,
        })
    }

    /// Advance the simulation by `delta_ms`, dispatching every timer that
    /// comes due in order.
    pub fn update(&mut self, delta_ms: u64) {
        let until = self.timers.now_ms().saturating_add(delta_ms);
        while let Some(fired) = self.timers.pop_due(until) {
            self.dispatch(fired);
        }
        self.timers.settle(until);
    }

    fn dispatch(&mut self, fired: Fired<TimerEvent>) {
        match fired.event {
            TimerEvent::ChatReply { ticket } => {
                let outcome = self.chat.on_reply(&ticket);
                log::debug!("chat: reply #{} {:?}", ticket.seq, outcome);
            }
            TimerEvent::CommentTick { session } => {
                if let Some(live) = self.live.as_mut().filter(|l| l.id() == session) {
                    live.on_comment_tick(&mut *self.rng, fired.at_ms);
                }
            }
            TimerEvent::ViewerDrift { session } => {
                if let Some(live) = self.live.as_mut().filter(|l| l.id() == session) {
                    live.on_viewer_drift(&mut *self.rng);
                }
            }
            TimerEvent::ReactionExpiry { session, marker } => {
                if let Some(live) = self.live.as_mut().filter(|l| l.id() == session) {
                    live.on_reaction_expired(marker);
                }
            }
            TimerEvent::OrbitTick { tracker } => {
                if let Some(t) = self.tracker.as_mut().filter(|t| t.id() == tracker) {
                    t.on_tick();
                }
            }
        }
    }

    fn next_session_id(&mut self) -> SessionId {
        self.next_session += 1;
        SessionId(self.next_session)
    }

    // ── Chat ────────────────────────────────────────────────────────────

    /// Send a chat message. Blank input is a no-op and returns `None`.
    pub fn send_chat(&mut self, text: &str) -> Option<ReplyTicket> {
        self.chat.send(text, &mut self.timers, &mut *self.rng)
    }

    /// Cancel pending replies and clear the conversation.
    pub fn reset_chat(&mut self) {
        self.chat.reset(&mut self.timers);
    }

    pub fn conversation(&self) -> &ConversationLog {
        self.chat.log()
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    // ── Live stream ─────────────────────────────────────────────────────

    /// Join a live event, closing any session already open.
    pub fn open_live(&mut self, event_id: &str) -> Result<SessionId> {
        let event = self.catalog.event(event_id)?;
        if !event.is_live {
            return Err(EngineError::EventNotLive(event_id.to_string()));
        }
        self.close_live();
        let id = self.next_session_id();
        let event = self.catalog.event(event_id)?;
        let session = LiveSession::open(id, event, &self.config.live, &mut self.timers)?;
        self.live = Some(session);
        Ok(id)
    }

    /// Close the current live session and hand it back, frozen.
    pub fn close_live(&mut self) -> Option<LiveSession> {
        let mut session = self.live.take()?;
        session.close(&mut self.timers);
        Some(session)
    }

    pub fn post_comment(&mut self, text: &str) -> Result<Option<Comment>> {
        let now = self.timers.now_ms();
        let live = self.live.as_mut().ok_or(EngineError::NoLiveSession)?;
        Ok(live.post_comment(text, now).cloned())
    }

    pub fn react(&mut self, reaction: Reaction) -> Result<u64> {
        let live = self.live.as_mut().ok_or(EngineError::NoLiveSession)?;
        live.react(reaction, &mut self.timers, &mut *self.rng)
            .ok_or(EngineError::NoLiveSession)
    }

    pub fn toggle_like(&mut self) -> Result<bool> {
        let live = self.live.as_mut().ok_or(EngineError::NoLiveSession)?;
        live.toggle_like().ok_or(EngineError::NoLiveSession)
    }

    pub fn live(&self) -> Option<&LiveSession> {
        self.live.as_ref()
    }

    // ── Tracking ────────────────────────────────────────────────────────

    /// Mount the ISS tracker. Remounting restarts the animation.
    pub fn mount_tracker(&mut self) -> SessionId {
        self.unmount_tracker();
        let id = self.next_session_id();
        self.tracker = Some(IssTracker::mount(id, &self.config.orbit, &mut self.timers));
        id
    }

    pub fn unmount_tracker(&mut self) -> Option<IssTracker> {
        let mut tracker = self.tracker.take()?;
        tracker.unmount(&mut self.timers);
        Some(tracker)
    }

    pub fn tracker(&self) -> Option<&IssTracker> {
        self.tracker.as_ref()
    }

    pub fn tracker_mut(&mut self) -> Option<&mut IssTracker> {
        self.tracker.as_mut()
    }

    /// Satellites passing the tracker's filter (all when unmounted).
    pub fn visible_satellites(&self) -> Vec<&Satellite> {
        let filter = self
            .tracker
            .as_ref()
            .map_or(SatelliteFilter::All, |t| t.filter());
        self.catalog.filter_satellites(filter)
    }

    /// Simulated ISS pass for a city.
    pub fn predict_pass(&mut self, city: &str) -> Result<PassPrediction> {
        let city = self.catalog.city(city)?;
        Ok(predict_pass(city, &mut *self.rng))
    }

    pub fn telescope_pointing(&self, constellation_id: &str, city: &str) -> Result<Pointing> {
        let constellation = self.catalog.constellation(constellation_id)?;
        let city = self.catalog.city(city)?;
        Ok(pointing(constellation, city))
    }

    // ── Introspection ───────────────────────────────────────────────────

    /// Current simulation time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Timers still scheduled. Zero once every view is torn down and no
    /// reply is pending.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Close every view and cancel pending replies.
    pub fn shutdown(&mut self) {
        self.close_live();
        self.unmount_tracker();
        self.chat.cancel_pending(&mut self.timers);
    }
}
