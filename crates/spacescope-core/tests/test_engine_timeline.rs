//! End-to-end timelines through the engine.
//!
//! Every test drives a `SpaceScopeEngine` with a scripted or seeded random
//! source and advances virtual time explicitly.

use spacescope_core::prelude::*;
use spacescope_logic::catalog::{Catalog, SatelliteFilter, SatelliteKind};
use spacescope_logic::conversation::Role;
use spacescope_logic::intent::Topic;
use spacescope_logic::random::ScriptedRandom;

// ── Helpers ────────────────────────────────────────────────────────────

fn scripted(values: Vec<f64>) -> SpaceScopeEngine {
    scripted_with(SimConfig::default(), values)
}

fn scripted_with(config: SimConfig, values: Vec<f64>) -> SpaceScopeEngine {
    SpaceScopeEngine::with_parts(
        config,
        Catalog::builtin().unwrap(),
        Box::new(ScriptedRandom::new(values)),
    )
    .unwrap()
}

fn seeded(seed: u64) -> SpaceScopeEngine {
    SpaceScopeEngine::new(SimConfig {
        seed: Some(seed),
        ..SimConfig::default()
    })
    .unwrap()
}

// ── Chat ───────────────────────────────────────────────────────────────

#[test]
fn reply_lands_between_one_and_two_seconds() {
    for seed in 0..50 {
        let mut engine = seeded(seed);
        engine.send_chat("what is a rover?").unwrap();
        engine.update(999);
        assert_eq!(engine.conversation().len(), 2, "seed {seed}");
        assert!(engine.chat().is_typing());
        engine.update(1001);
        assert_eq!(engine.conversation().len(), 3, "seed {seed}");
        assert!(!engine.chat().is_typing());
    }
}

#[test]
fn blank_chat_input_is_ignored() {
    let mut engine = scripted(vec![0.5]);
    assert!(engine.send_chat("    ").is_none());
    engine.update(5000);
    assert_eq!(engine.conversation().len(), 1);
    assert_eq!(engine.active_timers(), 0);
}

#[test]
fn quick_successive_messages_may_interleave() {
    // First delay 1900ms, second 1100ms.
    let mut engine = scripted(vec![0.9, 0.1]);
    engine.send_chat("tell me about mars").unwrap();
    engine.update(10);
    engine.send_chat("and apollo?").unwrap();
    engine.update(2000);

    let log = engine.conversation().messages();
    assert_eq!(log.len(), 5);
    assert_eq!(log[3].role, Role::Assistant);
    assert_eq!(log[3].content, Topic::Mission.response());
    assert_eq!(log[4].content, Topic::Mars.response());
}

// ── Live session ───────────────────────────────────────────────────────

#[test]
fn comment_log_caps_at_21_over_long_run() {
    let mut engine = seeded(42);
    engine.open_live("space-talk").unwrap();
    for _ in 0..300 {
        engine.update(1000);
        assert!(engine.live().unwrap().comments().len() <= 21);
    }
    let live = engine.live().unwrap();
    assert_eq!(live.stats().synthetic_comments, 100);
    assert_eq!(live.comments().len(), 21);
    let stamps: Vec<_> = live
        .comments()
        .comments()
        .iter()
        .map(|c| c.timestamp_ms)
        .collect();
    assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(stamps.last().copied(), Some(300_000));
}

#[test]
fn own_comment_appends_immediately() {
    let mut engine = scripted(vec![0.5]);
    engine.open_live("iss-stream").unwrap();
    engine.update(1234);
    let posted = engine.post_comment("Hello from orbit").unwrap().unwrap();
    assert_eq!(posted.user, "You");
    assert_eq!(posted.timestamp_ms, 1234);
    assert_eq!(engine.live().unwrap().comments().len(), 1);
    assert!(engine.post_comment("   ").unwrap().is_none());
}

#[test]
fn viewer_count_can_drift_negative_without_floor() {
    let mut engine = scripted(vec![0.0]);
    engine.open_live("space-talk").unwrap();
    // 1247 viewers, -3 every 5s: below zero after 416 drifts.
    engine.update(5000 * 420);
    assert_eq!(engine.live().unwrap().viewers(), 1247 - 3 * 420);
    assert!(engine.live().unwrap().viewers() < 0);
}

#[test]
fn configured_floor_holds() {
    let mut config = SimConfig::default();
    config.live.viewer_floor = Some(0);
    let mut engine = scripted_with(config, vec![0.0]);
    engine.open_live("space-talk").unwrap();
    engine.update(5000 * 420);
    assert_eq!(engine.live().unwrap().viewers(), 0);
}

#[test]
fn reaction_present_before_expiry_and_gone_after() {
    let mut engine = scripted(vec![0.5]);
    engine.open_live("iss-stream").unwrap();
    let id = engine.react(Reaction::Rocket).unwrap();
    let marker = &engine.live().unwrap().reactions().markers()[0];
    assert_eq!(marker.x_percent, 50.0);

    engine.update(1999);
    assert!(engine.live().unwrap().reactions().contains(id));
    engine.update(1);
    assert!(!engine.live().unwrap().reactions().contains(id));
}

#[test]
fn closed_session_stops_mutating() {
    let mut engine = seeded(7);
    engine.open_live("iss-stream").unwrap();
    engine.react(Reaction::Star).unwrap();
    engine.update(12_000);

    let closed = engine.close_live().unwrap();
    let viewers = closed.viewers();
    let comments = closed.comments().comments().to_vec();
    assert_eq!(engine.active_timers(), 0);

    engine.update(60_000);
    assert!(engine.live().is_none());
    assert_eq!(closed.viewers(), viewers);
    assert_eq!(closed.comments().comments(), comments.as_slice());
}

#[test]
fn stale_events_from_previous_session_ignored() {
    let mut engine = scripted(vec![0.5]);
    engine.open_live("iss-stream").unwrap();
    engine.react(Reaction::Heart).unwrap();
    engine.update(1000);
    engine.open_live("space-talk").unwrap();
    let fresh = engine.react(Reaction::Heart).unwrap();
    // Old reaction timer was cancelled; the new one expires on schedule.
    engine.update(1999);
    assert!(engine.live().unwrap().reactions().contains(fresh));
    engine.update(1);
    assert!(engine.live().unwrap().reactions().is_empty());
}

// ── Tracking ───────────────────────────────────────────────────────────

#[test]
fn orbit_wraps_after_720_ticks() {
    let mut engine = scripted(vec![0.5]);
    engine.mount_tracker();
    engine.update(720 * 50);
    assert_eq!(engine.tracker().unwrap().angle(), 0.0);
    engine.update(50);
    assert_eq!(engine.tracker().unwrap().angle(), 0.5);
}

#[test]
fn unmounted_tracker_stops() {
    let mut engine = scripted(vec![0.5]);
    engine.mount_tracker();
    engine.update(500);
    let tracker = engine.unmount_tracker().unwrap();
    assert_eq!(tracker.ticks(), 10);
    engine.update(10_000);
    assert_eq!(tracker.ticks(), 10);
    assert_eq!(engine.active_timers(), 0);
}

#[test]
fn satellite_filter_follows_tracker() {
    let mut engine = scripted(vec![0.5]);
    assert_eq!(engine.visible_satellites().len(), 6);
    engine.mount_tracker();
    engine
        .tracker_mut()
        .unwrap()
        .set_filter(SatelliteFilter::Only(SatelliteKind::Communication));
    let names: Vec<_> = engine
        .visible_satellites()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(names, vec!["starlink-1", "gps-iii"]);
}

#[test]
fn telescope_pointing_from_tokyo() {
    let engine = scripted(vec![0.5]);
    let p = engine.telescope_pointing("orion", "Tokyo").unwrap();
    assert_eq!(p.bearing, 205);
    assert!(engine.telescope_pointing("orion", "Atlantis").is_err());
    assert!(engine.telescope_pointing("draco", "Tokyo").is_err());
}
