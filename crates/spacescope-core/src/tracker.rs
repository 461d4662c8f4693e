//! ISS tracking view: orbital animation plus satellite filter and city
//! selection.
//!
//! Mounting arms one repeating tick timer; unmounting cancels it.

use spacescope_logic::catalog::SatelliteFilter;
use spacescope_logic::config::OrbitConfig;
use spacescope_logic::orbit::OrbitalPosition;

use crate::events::{SessionId, TimerEvent};
use crate::scheduler::{Scheduler, TimerHandle};

pub struct IssTracker {
    id: SessionId,
    position: OrbitalPosition,
    step_degrees: f64,
    timer: Option<TimerHandle>,
    ticks: u64,
    filter: SatelliteFilter,
    selected_city: Option<String>,
}

impl IssTracker {
    pub fn mount<S: Scheduler<TimerEvent> + ?Sized>(
        id: SessionId,
        config: &OrbitConfig,
        sched: &mut S,
    ) -> Self {
        let timer = sched.schedule_repeating(config.tick_ms, TimerEvent::OrbitTick { tracker: id });
        log::info!("tracker {}: mounted ({}ms tick)", id, config.tick_ms);
        Self {
            id,
            position: OrbitalPosition::new(0.0, config.inclination_degrees),
            step_degrees: config.step_degrees,
            timer: Some(timer),
            ticks: 0,
            filter: SatelliteFilter::All,
            selected_city: None,
        }
    }

    pub fn unmount<S: Scheduler<TimerEvent> + ?Sized>(&mut self, sched: &mut S) {
        if let Some(h) = self.timer.take() {
            sched.cancel(h);
            log::info!("tracker {}: unmounted after {} ticks", self.id, self.ticks);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.timer.is_some()
    }

    pub fn on_tick(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.position.advance(self.step_degrees);
        self.ticks += 1;
    }

    pub fn set_filter(&mut self, filter: SatelliteFilter) {
        self.filter = filter;
    }

    pub fn select_city(&mut self, city: Option<String>) {
        self.selected_city = city;
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn angle(&self) -> f64 {
        self.position.angle()
    }

    pub fn position(&self) -> OrbitalPosition {
        self.position
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn filter(&self) -> SatelliteFilter {
        self.filter
    }

    pub fn selected_city(&self) -> Option<&str> {
        self.selected_city.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TimerQueue;

    fn run(tracker: &mut IssTracker, q: &mut TimerQueue<TimerEvent>, ms: u64) {
        for fired in q.advance_by(ms) {
            if let TimerEvent::OrbitTick { .. } = fired.event {
                tracker.on_tick();
            }
        }
    }

    #[test]
    fn test_revolution_in_36_seconds() {
        let mut q = TimerQueue::new();
        let mut tracker = IssTracker::mount(SessionId(1), &OrbitConfig::default(), &mut q);
        run(&mut tracker, &mut q, 36_000);
        assert_eq!(tracker.ticks(), 720);
        assert_eq!(tracker.angle(), 0.0);
        run(&mut tracker, &mut q, 50);
        assert_eq!(tracker.angle(), 0.5);
        assert_eq!(tracker.position().inclination(), 30.0);
    }

    #[test]
    fn test_unmount_stops_ticks() {
        let mut q = TimerQueue::new();
        let mut tracker = IssTracker::mount(SessionId(1), &OrbitConfig::default(), &mut q);
        run(&mut tracker, &mut q, 1000);
        tracker.unmount(&mut q);
        assert!(q.is_empty());
        let angle = tracker.angle();
        run(&mut tracker, &mut q, 10_000);
        assert_eq!(tracker.angle(), angle);
        tracker.on_tick();
        assert_eq!(tracker.angle(), angle);
    }
}
