//! Timer scheduling on a virtual millisecond clock.
//!
//! Components never sleep or spawn; they ask a [`Scheduler`] to deliver an
//! event after a delay (once or repeatedly) and keep the returned
//! [`TimerHandle`] so they can cancel it on teardown.
//!
//! [`TimerQueue`] is the single-threaded implementation. The owner pops
//! due timers one at a time with [`TimerQueue::pop_due`] and handles each
//! before popping the next, so a handler may cancel or schedule timers
//! that fall inside the same advance.
//!
//! ```
//! use spacescope_core::scheduler::{Scheduler, TimerQueue};
//!
//! let mut queue = TimerQueue::new();
//! let tick = queue.schedule_repeating(50, "tick");
//! queue.schedule_once(120, "once");
//!
//! let fired: Vec<_> = queue.advance_by(150).into_iter().map(|f| (f.at_ms, f.event)).collect();
//! assert_eq!(fired, vec![(50, "tick"), (100, "tick"), (120, "once"), (150, "tick")]);
//!
//! queue.cancel(tick);
//! assert!(queue.advance_by(1000).is_empty());
//! ```

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};

/// Identifies a scheduled timer for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub handle: TimerHandle,
    /// Virtual time the timer was due at.
    pub at_ms: u64,
    pub event: E,
}

/// Capability to run events later.
pub trait Scheduler<E> {
    /// Current virtual time in milliseconds.
    fn now_ms(&self) -> u64;

    /// Deliver `event` once, `delay_ms` from now.
    fn schedule_once(&mut self, delay_ms: u64, event: E) -> TimerHandle;

    /// Deliver `event` every `interval_ms`, first at `now + interval_ms`.
    fn schedule_repeating(&mut self, interval_ms: u64, event: E) -> TimerHandle;

    /// Stop a timer. Returns `false` if it already fired (one-shot) or was
    /// cancelled before.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    fn is_active(&self, handle: TimerHandle) -> bool;
}

#[derive(Debug, Clone)]
struct Timer<E> {
    event: E,
    /// `Some` for repeating timers.
    interval_ms: Option<u64>,
    due_ms: u64,
    seq: u64,
}

/// Min-heap of timers keyed by due time, then scheduling order.
///
/// Cancelled timers are removed from the table immediately and their heap
/// entries are skipped lazily.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now_ms: u64,
    next_id: u64,
    next_seq: u64,
    heap: BinaryHeap<Reverse<(u64, u64, u64)>>,
    timers: HashMap<u64, Timer<E>>,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            next_seq: 0,
            heap: BinaryHeap::new(),
            timers: HashMap::new(),
        }
    }

    /// Number of live (not fired, not cancelled) timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Due time of the earliest live timer.
    pub fn next_due(&mut self) -> Option<u64> {
        self.discard_stale();
        self.heap.peek().map(|Reverse((due, _, _))| *due)
    }

    /// Move the clock forward to `until_ms` once every due timer was popped.
    /// Never moves backwards.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    fn insert(&mut self, delay_ms: u64, interval_ms: Option<u64>, event: E) -> TimerHandle {
        self.next_id += 1;
        let id = self.next_id;
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let seq = self.bump_seq();
        self.heap.push(Reverse((due_ms, seq, id)));
        self.timers.insert(
            id,
            Timer {
                event,
                interval_ms,
                due_ms,
                seq,
            },
        );
        TimerHandle(id)
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Drop heap entries whose timer was cancelled or rescheduled.
    fn discard_stale(&mut self) {
        while let Some(Reverse((due, seq, id))) = self.heap.peek().copied() {
            match self.timers.get(&id) {
                Some(t) if t.due_ms == due && t.seq == seq => break,
                _ => {
                    self.heap.pop();
                }
            }
        }
    }
}

impl<E: Clone> TimerQueue<E> {
    /// Pop the earliest timer due at or before `until_ms`, advancing the
    /// clock to its due time. Repeating timers are re-armed.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<E>> {
        self.discard_stale();
        let Reverse((due, _, id)) = *self.heap.peek()?;
        if due > until_ms {
            return None;
        }
        self.heap.pop();
        self.now_ms = self.now_ms.max(due);

        let interval = self.timers.get(&id)?.interval_ms;
        let event = match interval {
            Some(interval_ms) => {
                let seq = self.bump_seq();
                let timer = self.timers.get_mut(&id)?;
                timer.due_ms = due.saturating_add(interval_ms);
                timer.seq = seq;
                self.heap.push(Reverse((timer.due_ms, seq, id)));
                timer.event.clone()
            }
            None => self.timers.remove(&id)?.event,
        };

        Some(Fired {
            handle: TimerHandle(id),
            at_ms: due,
            event,
        })
    }

    /// Advance by `delta_ms`, collecting everything that fired in order.
    ///
    /// Convenient when nothing needs to react between firings.
    pub fn advance_by(&mut self, delta_ms: u64) -> Vec<Fired<E>> {
        let until = self.now_ms.saturating_add(delta_ms);
        let mut fired = Vec::new();
        while let Some(f) = self.pop_due(until) {
            fired.push(f);
        }
        self.settle(until);
        fired
    }
}

impl<E> Scheduler<E> for TimerQueue<E> {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule_once(&mut self, delay_ms: u64, event: E) -> TimerHandle {
        self.insert(delay_ms, None, event)
    }

    /// A zero interval is treated as 1ms so the queue always makes progress.
    fn schedule_repeating(&mut self, interval_ms: u64, event: E) -> TimerHandle {
        let interval_ms = interval_ms.max(1);
        self.insert(interval_ms, Some(interval_ms), event)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle.0).is_some()
    }

    fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle.0)
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
