//! Interactive and playback subcommands: `chat`, `live` and `track`.
//!
//! All three drive a [`SpaceScopeEngine`] forward and print what changed.
//! Without `--realtime` the clock jumps ahead instantly.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use spacescope_core::prelude::*;
use spacescope_logic::catalog::{Catalog, SatelliteFilter};
use spacescope_logic::comments::Comment;
use spacescope_logic::conversation::{Message, Role};
use spacescope_logic::orbit::revolution_ms;

/// Wall-clock slice used when pacing playback in realtime.
const REALTIME_STEP_MS: u64 = 50;

/// Granularity of the chat wait loop.
const CHAT_STEP_MS: u64 = 100;

fn advance(engine: &mut SpaceScopeEngine, ms: u64, realtime: bool) {
    if !realtime {
        engine.update(ms);
        return;
    }
    let mut left = ms;
    while left > 0 {
        let step = left.min(REALTIME_STEP_MS);
        thread::sleep(Duration::from_millis(step));
        engine.update(step);
        left -= step;
    }
}

// ── Chat ────────────────────────────────────────────────────────────────

fn print_message(m: &Message) {
    match m.role {
        Role::User => println!("you> {}", m.content),
        Role::Assistant => println!("SpaceScope AI> {}", m.content),
    }
}

/// Read lines from stdin and answer each after its simulated delay.
///
/// `/reset` clears the conversation, `/quit` exits.
pub fn chat(config: SimConfig, realtime: bool) -> Result<()> {
    let mut engine = SpaceScopeEngine::new(config)?;
    let mut printed = 0;
    for m in engine.conversation().messages() {
        print_message(m);
        printed += 1;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "/quit" => break,
            "/reset" => {
                engine.reset_chat();
                printed = 0;
            }
            text => {
                if engine.send_chat(text).is_none() {
                    continue;
                }
                // The user's own line was already echoed by the terminal.
                printed += 1;
                if engine.chat().is_typing() {
                    println!("…");
                }
                let started = engine.now_ms();
                while engine.chat().pending_replies() > 0 {
                    advance(&mut engine, CHAT_STEP_MS, realtime);
                }
                log::debug!("reply after {}ms", engine.now_ms() - started);
            }
        }
        for m in &engine.conversation().messages()[printed..] {
            print_message(m);
        }
        printed = engine.conversation().len();
        io::stdout().flush()?;
    }

    engine.shutdown();
    Ok(())
}

// ── Live ────────────────────────────────────────────────────────────────

pub struct LiveOptions<'a> {
    pub event: &'a str,
    pub seconds: u64,
    pub realtime: bool,
    pub comments: &'a [String],
    pub reactions: &'a [String],
    pub like: bool,
}

fn parse_reaction(name: &str) -> Result<Reaction> {
    Reaction::ALL
        .iter()
        .copied()
        .find(|r| format!("{r:?}").eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("unknown reaction {name:?} (rocket, star, heart, telescope)"))
}

fn print_comment(c: &Comment) {
    println!("  {:>7}ms {}: {}", c.timestamp_ms, c.user, c.text);
}

/// Comments added since `last_seq`, advancing it past them.
///
/// Works by sequence number, so comments trimmed from the log between
/// two calls are skipped rather than the whole log being repeated.
fn take_new_comments(engine: &SpaceScopeEngine, last_seq: &mut u64) -> Vec<Comment> {
    let Some(live) = engine.live() else {
        return Vec::new();
    };
    let fresh = live.comments().since(*last_seq).to_vec();
    if let Some(c) = fresh.last() {
        *last_seq = c.seq;
    }
    fresh
}

fn not_live_hint(catalog: &Catalog, event: &str) -> String {
    let live: Vec<_> = catalog.live_events().map(|e| e.id.as_str()).collect();
    let upcoming: Vec<_> = catalog
        .upcoming_events()
        .map(|e| format!("{} ({} {})", e.id, e.date, e.time))
        .collect();
    format!(
        "`{event}` can't be joined now. Live: {}. Upcoming: {}",
        live.join(", "),
        upcoming.join(", ")
    )
}

/// Join a live event and print comments and viewer changes each second.
pub fn live(config: SimConfig, opts: LiveOptions<'_>) -> Result<()> {
    let mut engine = SpaceScopeEngine::new(config)?;
    let session = match engine.open_live(opts.event) {
        Ok(id) => id,
        Err(e @ (EngineError::EventNotLive(_) | EngineError::Logic(_))) => {
            let hint = not_live_hint(engine.catalog(), opts.event);
            return Err(anyhow::Error::from(e).context(hint));
        }
        Err(e) => return Err(e.into()),
    };

    let mut viewers = engine.live().map_or(0, |l| l.viewers());
    if let Some(live) = engine.live() {
        println!("● LIVE {} (session {session}) - {} watching", live.title(), viewers);
    }

    if opts.like {
        engine.toggle_like()?;
    }
    for text in opts.comments {
        if let Some(c) = engine.post_comment(text)? {
            print_comment(&c);
        }
    }
    for name in opts.reactions {
        let reaction = parse_reaction(name)?;
        engine.react(reaction)?;
        println!("  {} floats up", reaction.emoji());
    }

    // Own comments were printed as they were posted.
    let mut last_seq = engine
        .live()
        .and_then(|l| l.comments().comments().last())
        .map_or(0, |c| c.seq);

    for _ in 0..opts.seconds {
        advance(&mut engine, 1000, opts.realtime);
        for c in take_new_comments(&engine, &mut last_seq) {
            print_comment(&c);
        }

        let Some(live) = engine.live() else { break };
        if live.viewers() != viewers {
            viewers = live.viewers();
            println!("  👁 {viewers} watching");
        }
    }

    if let Some(closed) = engine.close_live() {
        let stats = closed.stats();
        println!(
            "\n=== {} closed after {}s: {} generated, {} own, {} drift ticks, {} reactions, liked: {} ===",
            closed.title(),
            opts.seconds,
            stats.synthetic_comments,
            stats.own_comments,
            stats.drift_ticks,
            stats.reactions,
            closed.liked()
        );
    }
    Ok(())
}

// ── Track ───────────────────────────────────────────────────────────────

/// Run the ISS tracker and print its position once per second.
pub fn track(
    config: SimConfig,
    city: Option<&str>,
    seconds: u64,
    filter: &str,
    realtime: bool,
) -> Result<()> {
    let filter = SatelliteFilter::parse(filter)
        .ok_or_else(|| anyhow!("unknown satellite filter {filter:?}"))?;

    let orbit = config.orbit.clone();
    let mut engine = SpaceScopeEngine::new(config)?;
    engine.mount_tracker();
    println!(
        "ISS orbit: {}° every {}ms, one revolution per {:.1}s",
        orbit.step_degrees,
        orbit.tick_ms,
        revolution_ms(orbit.tick_ms, orbit.step_degrees) as f64 / 1000.0
    );
    if let Some(tracker) = engine.tracker_mut() {
        tracker.set_filter(filter);
        tracker.select_city(city.map(str::to_string));
    }

    println!("Satellites ({filter:?}):");
    for s in engine.visible_satellites() {
        println!(
            "  {:<24} {:?} {} km, {} km/h, {} min period",
            s.name, s.kind, s.altitude_km, s.speed_kmh, s.orbit_period_min
        );
    }

    if let Some(city) = city {
        let pass = engine.predict_pass(city)?;
        println!(
            "\nNext ISS pass over {}: {} for {}, heading {}",
            pass.city,
            pass.time_label(),
            pass.duration_label(),
            pass.direction
        );
        let ids: Vec<String> = engine
            .catalog()
            .constellations
            .iter()
            .map(|c| c.id.clone())
            .collect();
        for id in ids {
            let p = engine.telescope_pointing(&id, city)?;
            println!("  {:<14} bearing {:>3}°, {}", id, p.bearing, p.elevation);
        }
    }

    println!();
    for _ in 0..seconds {
        advance(&mut engine, 1000, realtime);
        if let Some(t) = engine.tracker() {
            let pos = t.position();
            println!(
                "  t={:>6}ms angle {:>5.1}° inclination {:.0}° ({} ticks)",
                engine.now_ms(),
                pos.angle(),
                pos.inclination(),
                t.ticks()
            );
        }
    }

    engine.shutdown();
    Ok(())
}
