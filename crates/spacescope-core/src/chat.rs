//! Assistant chat session with simulated reply latency.
//!
//! Each accepted message schedules its own one-shot reply timer with a
//! delay of `base + floor(r * jitter)` milliseconds. Several replies can be
//! in flight and may land out of order.

use std::collections::HashMap;

use spacescope_logic::config::ChatConfig;
use spacescope_logic::conversation::{
    ChatExchange, ChatPhase, ConversationLog, Delivery, ReplyTicket,
};
use spacescope_logic::random::RandomSource;

use crate::events::TimerEvent;
use crate::scheduler::{Scheduler, TimerHandle};

/// Reply delay in milliseconds, in `[base, base + jitter)`.
pub fn reply_delay_ms<R: RandomSource + ?Sized>(config: &ChatConfig, rng: &mut R) -> u64 {
    let jitter = (rng.next_unit() * config.reply_jitter_ms as f64).floor() as u64;
    config.reply_base_delay_ms + jitter.min(config.reply_jitter_ms.saturating_sub(1))
}

pub struct ChatSession {
    exchange: ChatExchange,
    config: ChatConfig,
    /// Reply timers by ticket sequence number.
    timers: HashMap<u64, TimerHandle>,
}

impl ChatSession {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            exchange: ChatExchange::new(config.ordering),
            config,
            timers: HashMap::new(),
        }
    }

    /// Accept a user message and schedule its reply.
    ///
    /// Blank input returns `None` and schedules nothing.
    pub fn send<S, R>(&mut self, text: &str, sched: &mut S, rng: &mut R) -> Option<ReplyTicket>
    where
        S: Scheduler<TimerEvent> + ?Sized,
        R: RandomSource + ?Sized,
    {
        let ticket = self.exchange.submit(text)?;
        let delay = reply_delay_ms(&self.config, rng);
        let handle = sched.schedule_once(
            delay,
            TimerEvent::ChatReply {
                ticket: ticket.clone(),
            },
        );
        self.timers.insert(ticket.seq, handle);
        log::debug!("chat: reply #{} due in {}ms", ticket.seq, delay);
        Some(ticket)
    }

    /// Handle a fired reply timer.
    pub fn on_reply(&mut self, ticket: &ReplyTicket) -> Delivery {
        self.timers.remove(&ticket.seq);
        self.exchange.deliver(ticket)
    }

    /// Cancel pending replies and clear the conversation.
    pub fn reset<S: Scheduler<TimerEvent> + ?Sized>(&mut self, sched: &mut S) {
        self.cancel_pending(sched);
        self.exchange.reset();
    }

    /// Cancel every pending reply timer. The conversation is kept.
    pub fn cancel_pending<S: Scheduler<TimerEvent> + ?Sized>(&mut self, sched: &mut S) {
        for (_, handle) in self.timers.drain() {
            sched.cancel(handle);
        }
    }

    pub fn log(&self) -> &ConversationLog {
        self.exchange.log()
    }

    pub fn phase(&self) -> ChatPhase {
        self.exchange.phase()
    }

    pub fn is_typing(&self) -> bool {
        self.exchange.is_typing()
    }

    pub fn pending_replies(&self) -> usize {
        self.timers.len()
    }
}
