//! Pure interaction logic for SpaceScope.
//!
//! This crate holds everything that does not depend on time passing:
//! data containers, matching rules and random draws. Functions take plain
//! data and a [`random::RandomSource`] and return results, so they are
//! unit-testable and reproducible. Timers live in `spacescope-core`.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Embedded satellites, cities, constellations, community events |
//! | [`comments`] | Bounded live-stream comment log and synthetic comments |
//! | [`config`] | Simulation timings and policy knobs |
//! | [`constants`] | Default timings, name/phrase pools, canned text |
//! | [`conversation`] | Assistant conversation log and in-flight reply tickets |
//! | [`error`] | Catalog and configuration errors |
//! | [`intent`] | Ordered keyword rules mapping text to canned answers |
//! | [`orbit`] | Cyclic ISS orbital angle and pass predictions |
//! | [`random`] | Injectable random source (seeded or scripted) |
//! | [`reactions`] | Self-expiring emoji reactions |
//! | [`sky`] | Telescope bearing hints for constellations |
//! | [`viewers`] | Viewer count drift |

pub mod catalog;
pub mod comments;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod error;
pub mod intent;
pub mod orbit;
pub mod random;
pub mod reactions;
pub mod sky;
pub mod viewers;

pub use error::LogicError;
