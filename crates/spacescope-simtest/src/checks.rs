//! Validation sweep run by `spacescope-simtest check`.
//!
//! Each section returns a list of named pass/fail results with a short
//! detail line, the same shape the summary printer and `--json` use.

use serde::Serialize;
use spacescope_core::prelude::*;
use spacescope_logic::catalog::{Catalog, MissionStatus, SatelliteFilter, SatelliteKind};
use spacescope_logic::comments::CommentLog;
use spacescope_logic::config::ChatConfig;
use spacescope_logic::conversation::ReplyOrdering;
use spacescope_logic::intent::{IntentMatcher, Topic};
use spacescope_logic::orbit::{predict_pass, OrbitalPosition};
use spacescope_logic::random::{RngSource, ScriptedRandom};
use spacescope_logic::sky::{pointing, Compass};
use spacescope_logic::viewers::drift_delta;

#[derive(Debug, Serialize)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail: detail.into(),
        }
    }
}

pub fn run_all(config: &SimConfig, seed: u64, verbose: bool, quiet: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    // 1. Embedded catalogs
    section(quiet, "Catalog");
    results.extend(validate_catalog(verbose));

    // 2. Intent routing
    section(quiet, "Intent Routing");
    results.extend(validate_intents(verbose));

    // 3. Chat latency
    section(quiet, "Chat Latency");
    results.extend(validate_chat(config, seed, verbose));

    // 4. Live session
    section(quiet, "Live Session");
    results.extend(validate_live(config, seed, verbose));

    // 5. Orbit & tracking
    section(quiet, "Orbit & Tracking");
    results.extend(validate_tracking(config, seed, verbose));

    // 6. Sky pointing
    section(quiet, "Telescope Pointing");
    results.extend(validate_sky(verbose));

    results
}

fn section(quiet: bool, name: &str) {
    if !quiet {
        println!("--- {name} ---");
    }
}

fn engine(config: &SimConfig, seed: u64) -> Option<SpaceScopeEngine> {
    let config = SimConfig {
        seed: Some(seed),
        ..config.clone()
    };
    match SpaceScopeEngine::new(config) {
        Ok(e) => Some(e),
        Err(e) => {
            log::error!("engine construction failed: {e}");
            None
        }
    }
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let catalog = match Catalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::new("catalog_parse", false, e.to_string()));
            return results;
        }
    };

    results.push(TestResult::new(
        "catalog_satellites",
        catalog.satellites.len() >= 6,
        format!("{} satellites", catalog.satellites.len()),
    ));

    let bad_orbits: Vec<_> = catalog
        .satellites
        .iter()
        .filter(|s| s.altitude_km == 0 || s.orbit_period_min == 0)
        .map(|s| s.id.as_str())
        .collect();
    results.push(TestResult::new(
        "catalog_positive_orbits",
        bad_orbits.is_empty(),
        if bad_orbits.is_empty() {
            "all satellites have altitude and period".to_string()
        } else {
            format!("bad orbits: {}", bad_orbits.join(", "))
        },
    ));

    let iss = catalog.iss();
    results.push(TestResult::new(
        "catalog_has_iss",
        iss.is_some(),
        iss.map_or("missing".to_string(), |s| format!("{} at {} km", s.name, s.altitude_km)),
    ));

    let kinds_covered = [
        SatelliteKind::Iss,
        SatelliteKind::Communication,
        SatelliteKind::Weather,
        SatelliteKind::Research,
    ]
    .iter()
    .all(|k| !catalog.filter_satellites(SatelliteFilter::Only(*k)).is_empty());
    results.push(TestResult::new(
        "catalog_filter_coverage",
        kinds_covered,
        "every filter chip matches at least one satellite",
    ));

    let live: Vec<_> = catalog.live_events().collect();
    let all_have_viewers = live.iter().all(|e| e.viewers.is_some());
    results.push(TestResult::new(
        "catalog_live_events",
        !live.is_empty() && all_have_viewers,
        format!("{} live events, all with viewer counts: {}", live.len(), all_have_viewers),
    ));

    let bad_dirs: Vec<_> = catalog
        .constellations
        .iter()
        .filter(|c| Compass::parse(&c.direction).is_none())
        .map(|c| c.id.as_str())
        .collect();
    results.push(TestResult::new(
        "catalog_compass_directions",
        bad_dirs.is_empty(),
        if bad_dirs.is_empty() {
            "all constellation directions are compass points".to_string()
        } else {
            format!("unparseable: {}", bad_dirs.join(", "))
        },
    ));

    let mission_lookup =
        catalog.mission("apollo-11").is_ok() && catalog.mission("apollo-12").is_err();
    let statuses_covered = [
        MissionStatus::Past,
        MissionStatus::Current,
        MissionStatus::Upcoming,
    ]
    .iter()
    .all(|s| catalog.missions_with_status(*s).next().is_some());
    let missing_highlights: Vec<_> = catalog
        .missions
        .iter()
        .filter(|m| m.highlights.is_empty())
        .map(|m| m.id.as_str())
        .collect();
    results.push(TestResult::new(
        "catalog_missions",
        mission_lookup && statuses_covered && missing_highlights.is_empty(),
        format!(
            "{} missions, all statuses present: {}, without highlights: {:?}",
            catalog.missions.len(),
            statuses_covered,
            missing_highlights
        ),
    ));

    let empty_topics: Vec<_> = catalog
        .learning
        .iter()
        .filter(|t| t.sections.is_empty() || t.sections.iter().any(|s| s.content.is_empty()))
        .map(|t| t.id.as_str())
        .collect();
    let topic_lookup =
        catalog.learning_topic("rockets").is_ok() && catalog.learning_topic("wormholes").is_err();
    results.push(TestResult::new(
        "catalog_learning_topics",
        !catalog.learning.is_empty() && topic_lookup && empty_topics.is_empty(),
        format!(
            "{} topics, incomplete: {:?}",
            catalog.learning.len(),
            empty_topics
        ),
    ));

    if verbose {
        for m in catalog.missions_with_status(MissionStatus::Upcoming) {
            println!("  upcoming mission: {} ({}, {})", m.name, m.agency, m.launch_date);
        }
        for e in &live {
            println!("  live: {} ({} viewers)", e.title, e.viewers.unwrap_or(0));
        }
    }

    results
}

// ── 2. Intents ──────────────────────────────────────────────────────────

fn validate_intents(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let matcher = IntentMatcher::default();

    let cases = [
        ("mars rover satellite", Topic::Satellite),
        ("What is JWST?", Topic::Learning),
        ("MARS telescope", Topic::Mars),
        ("Apollo 11", Topic::Mission),
        ("Where is the space station?", Topic::Iss),
        ("satellite tracking", Topic::Satellite),
        ("james webb", Topic::Telescope),
        ("hello", Topic::General),
    ];
    let mut misses = Vec::new();
    for (input, expected) in cases {
        let got = matcher.classify(input);
        if verbose {
            println!("  {:<32} → {:?}", input, got);
        }
        if got != expected {
            misses.push(format!("{input:?}: expected {expected:?}, got {got:?}"));
        }
    }
    results.push(TestResult::new(
        "intent_priority_cases",
        misses.is_empty(),
        if misses.is_empty() {
            format!("{} cases routed as expected", cases.len())
        } else {
            misses.join("; ")
        },
    ));

    let idempotent = cases
        .iter()
        .all(|(input, _)| matcher.respond(input) == matcher.respond(input));
    results.push(TestResult::new(
        "intent_idempotent",
        idempotent,
        "repeated calls return the same response",
    ));

    let empty_rules: Vec<_> = matcher
        .rules()
        .iter()
        .filter(|r| r.keywords.is_empty())
        .map(|r| format!("{:?}", r.topic))
        .collect();
    results.push(TestResult::new(
        "intent_rules_have_keywords",
        empty_rules.is_empty(),
        format!("{} rules, empty: {:?}", matcher.rules().len(), empty_rules),
    ));
    if verbose {
        for (rank, rule) in matcher.rules().iter().enumerate() {
            println!("  {}. {:?}: {}", rank + 1, rule.topic, rule.keywords.join(", "));
        }
    }

    let non_empty = Topic::ALL.iter().all(|t| !t.response().is_empty());
    results.push(TestResult::new(
        "intent_responses_non_empty",
        non_empty,
        format!("{} topics", Topic::ALL.len()),
    ));

    results
}

// ── 3. Chat ─────────────────────────────────────────────────────────────

fn validate_chat(config: &SimConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let chat_config: &ChatConfig = &config.chat;
    let mut rng = RngSource::seeded(seed);
    let (mut min, mut max) = (u64::MAX, 0);
    for _ in 0..10_000 {
        let d = spacescope_core::chat::reply_delay_ms(chat_config, &mut rng);
        min = min.min(d);
        max = max.max(d);
    }
    let lo = chat_config.reply_base_delay_ms;
    let hi = lo + chat_config.reply_jitter_ms.max(1);
    results.push(TestResult::new(
        "chat_delay_range",
        min >= lo && max < hi,
        format!("observed [{min}, {max}] within [{lo}, {hi})"),
    ));

    let Some(mut engine) = engine(config, seed) else {
        results.push(TestResult::new("chat_engine", false, "engine construction failed"));
        return results;
    };

    let blank_ignored = engine.send_chat("  \t ").is_none() && engine.conversation().len() == 1;
    results.push(TestResult::new(
        "chat_blank_ignored",
        blank_ignored,
        format!("log length {}", engine.conversation().len()),
    ));

    let questions = ["Tell me about Artemis", "How do rockets work?", "JWST"];
    for text in questions {
        engine.send_chat(text);
    }
    engine.update(hi);
    // Greeting + questions, plus every reply or only the newest one.
    let replies = match chat_config.ordering {
        ReplyOrdering::Unordered => questions.len(),
        ReplyOrdering::LatestOnly => 1,
    };
    let expected = 1 + questions.len() + replies;
    let len = engine.conversation().len();
    results.push(TestResult::new(
        "chat_all_replies_landed",
        len == expected && engine.active_timers() == 0,
        format!(
            "log length {len} (expected {expected}, {:?}), pending timers {}",
            chat_config.ordering,
            engine.active_timers()
        ),
    ));
    if verbose {
        for m in engine.conversation().messages() {
            println!("  [{:?}] {}", m.role, m.content);
        }
    }

    results
}

// ── 4. Live session ─────────────────────────────────────────────────────

fn validate_live(config: &SimConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    const PUSHED: usize = 100;
    let mut log = CommentLog::new(config.live.comment_retain);
    for i in 0..PUSHED as u64 {
        log.push("harness", &format!("comment {i}"), i);
    }
    // The most recent `min(capacity, PUSHED)` comments survive, oldest first.
    let expected_len = log.capacity().min(PUSHED);
    let first_kept = (PUSHED - expected_len) as u64;
    let oldest_kept = log
        .comments()
        .first()
        .is_some_and(|c| c.timestamp_ms == first_kept);
    results.push(TestResult::new(
        "live_comment_cap",
        log.len() == expected_len && oldest_kept,
        format!(
            "{} comments kept of {PUSHED} (capacity {})",
            log.len(),
            log.capacity()
        ),
    ));

    let mut rng = RngSource::seeded(seed);
    let deltas: Vec<i64> = (0..10_000).map(|_| drift_delta(&mut rng)).collect();
    let in_range = deltas.iter().all(|d| (-3..=6).contains(d));
    let mean = deltas.iter().sum::<i64>() as f64 / deltas.len() as f64;
    results.push(TestResult::new(
        "live_viewer_delta_range",
        in_range,
        format!("mean delta {mean:.2} (expected ≈ 1.5)"),
    ));

    let Some(mut engine) = engine(config, seed) else {
        results.push(TestResult::new("live_engine", false, "engine construction failed"));
        return results;
    };

    let opened = engine.open_live("iss-stream").is_ok();
    let rejected = matches!(
        engine.open_live("perseids"),
        Err(EngineError::EventNotLive(_))
    );
    results.push(TestResult::new(
        "live_only_live_events",
        opened && rejected,
        "live event joined, scheduled event refused",
    ));

    let lifetime = config.live.reaction_lifetime_ms;
    let reaction_ok = match engine.react(Reaction::Rocket) {
        Ok(id) => {
            engine.update(lifetime - 1);
            let before = engine.live().is_some_and(|l| l.reactions().contains(id));
            engine.update(1);
            let after = engine.live().is_some_and(|l| l.reactions().contains(id));
            before && !after
        }
        Err(_) => false,
    };
    results.push(TestResult::new(
        "live_reaction_expiry",
        reaction_ok,
        format!("marker visible for {lifetime}ms"),
    ));

    engine.update(60_000);
    let closed = engine.close_live();
    let frozen = match closed {
        Some(session) => {
            let viewers = session.viewers();
            let comments = session.comments().len();
            engine.update(60_000);
            if verbose {
                for c in session.comments().comments() {
                    println!("  {:>8}ms {}: {}", c.timestamp_ms, c.user, c.text);
                }
            }
            session.viewers() == viewers
                && session.comments().len() == comments
                && engine.active_timers() == 0
        }
        None => false,
    };
    results.push(TestResult::new(
        "live_teardown",
        frozen,
        "no timers or mutation after close",
    ));

    results
}

// ── 5. Tracking ─────────────────────────────────────────────────────────

fn validate_tracking(config: &SimConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let mut pos = OrbitalPosition::default();
    for _ in 0..720 {
        pos.advance(0.5);
    }
    let at_720 = pos.angle();
    pos.advance(0.5);
    results.push(TestResult::new(
        "orbit_wraps",
        at_720 == 0.0 && pos.angle() == 0.5,
        format!("720 ticks → {at_720}, 721 → {}", pos.angle()),
    ));

    if let Some(mut engine) = engine(config, seed) {
        engine.mount_tracker();
        engine.update(config.orbit.tick_ms * 100);
        let ticks = engine.tracker().map_or(0, |t| t.ticks());
        engine.unmount_tracker();
        engine.update(10_000);
        results.push(TestResult::new(
            "orbit_tracker_lifecycle",
            ticks == 100 && engine.active_timers() == 0,
            format!("{ticks} ticks before unmount"),
        ));
    }

    let catalog = match Catalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::new("pass_catalog", false, e.to_string()));
            return results;
        }
    };
    let mut rng = RngSource::seeded(seed);
    let mut bad = 0;
    for city in &catalog.cities {
        for _ in 0..200 {
            let pass = predict_pass(city, &mut rng);
            if !(6..=17).contains(&pass.hour)
                || pass.minute > 59
                || !(2..=5).contains(&pass.duration_minutes)
            {
                bad += 1;
            }
        }
        if verbose {
            let sample = predict_pass(city, &mut rng);
            println!(
                "  {:<12} {} for {}, {}",
                city.name,
                sample.time_label(),
                sample.duration_label(),
                sample.direction
            );
        }
    }
    results.push(TestResult::new(
        "pass_prediction_ranges",
        bad == 0,
        format!("{} cities × 200 draws, {bad} out of range", catalog.cities.len()),
    ));

    // Fixed draws reproduce a known prediction.
    let mut scripted = ScriptedRandom::new(vec![0.0, 0.5, 0.999, 0.25]);
    let known = catalog
        .city("Tokyo")
        .map(|c| predict_pass(c, &mut scripted).time_label());
    results.push(TestResult::new(
        "pass_prediction_scripted",
        matches!(known.as_deref(), Ok("06:30 UTC")),
        format!("{known:?}"),
    ));

    results
}

// ── 6. Sky ──────────────────────────────────────────────────────────────

fn validate_sky(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let catalog = match Catalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::new("sky_catalog", false, e.to_string()));
            return results;
        }
    };

    let mut out_of_range = 0;
    for constellation in &catalog.constellations {
        for city in &catalog.cities {
            let p = pointing(constellation, city);
            if p.bearing >= 360 {
                out_of_range += 1;
            }
            if verbose && city.name == "Tokyo" {
                println!("  {:<12} from Tokyo: {}° at {}", constellation.name, p.bearing, p.elevation);
            }
        }
    }
    results.push(TestResult::new(
        "sky_bearings_in_range",
        out_of_range == 0,
        format!(
            "{} pairs checked",
            catalog.constellations.len() * catalog.cities.len()
        ),
    ));

    let orion_tokyo = catalog
        .constellation("orion")
        .and_then(|o| catalog.city("Tokyo").map(|c| pointing(o, c).bearing));
    results.push(TestResult::new(
        "sky_orion_from_tokyo",
        matches!(orion_tokyo, Ok(205)),
        format!("{orion_tokyo:?}"),
    ));

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failures(config: &SimConfig) -> Vec<String> {
        run_all(config, 42, false, true)
            .into_iter()
            .filter(|r| !r.passed)
            .map(|r| format!("{}: {}", r.name, r.detail))
            .collect()
    }

    #[test]
    fn test_sweep_with_large_retention() {
        let mut config = SimConfig::default();
        config.live.comment_retain = 150;
        assert!(config.validate().is_ok());
        let failures = failures(&config);
        assert!(failures.is_empty(), "{failures:?}");
    }

    #[test]
    fn test_sweep_with_retention_at_boundary() {
        let mut config = SimConfig::default();
        config.live.comment_retain = 99;
        let failures = failures(&config);
        assert!(failures.is_empty(), "{failures:?}");
    }

    #[test]
    fn test_sweep_with_latest_only_replies() {
        let mut config = SimConfig::default();
        config.chat.ordering = ReplyOrdering::LatestOnly;
        let failures = failures(&config);
        assert!(failures.is_empty(), "{failures:?}");
    }

    #[test]
    fn test_catalog_section_covers_missions_and_learning() {
        let names: Vec<_> = validate_catalog(false).into_iter().map(|r| r.name).collect();
        assert!(names.contains(&"catalog_missions".to_string()));
        assert!(names.contains(&"catalog_learning_topics".to_string()));
    }
}
