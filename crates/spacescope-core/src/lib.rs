//! SpaceScope Core - timer-driven interaction engine
//!
//! Runs the parts of the site that change over time: the assistant's
//! delayed replies, the simulated live stream and the ISS tracker.
//!
//! # Architecture
//!
//! - **Scheduler**: a virtual millisecond clock with one-shot and repeating
//!   timers ([`scheduler::TimerQueue`]). Nothing sleeps; time moves only
//!   when the engine is updated.
//! - **Components**: [`chat::ChatSession`], [`live::LiveSession`] and
//!   [`tracker::IssTracker`] own their timer handles and cancel them on
//!   teardown.
//! - **Engine**: [`engine::SpaceScopeEngine`] owns the clock and the random
//!   source and routes fired timers to the component that armed them.
//!
//! # Example
//!
//! ```
//! use spacescope_core::prelude::*;
//!
//! let config = SimConfig { seed: Some(7), ..SimConfig::default() };
//! let mut engine = SpaceScopeEngine::new(config).unwrap();
//!
//! engine.open_live("iss-stream").unwrap();
//! engine.send_chat("How far away is Mars?");
//!
//! // Ten simulated seconds.
//! engine.update(10_000);
//!
//! assert_eq!(engine.conversation().len(), 3);
//! assert_eq!(engine.live().unwrap().comments().len(), 3);
//! ```

pub mod chat;
pub mod engine;
pub mod error;
pub mod events;
pub mod live;
pub mod scheduler;
pub mod tracker;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::SpaceScopeEngine;
    pub use crate::error::EngineError;
    pub use crate::events::{SessionId, TimerEvent};
    pub use crate::scheduler::{Scheduler, TimerHandle, TimerQueue};
    pub use spacescope_logic::config::SimConfig;
    pub use spacescope_logic::reactions::Reaction;
}
