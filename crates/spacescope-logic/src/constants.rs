//! Simulation constants - timings, pools and canned text.
//!
//! Timings are milliseconds of simulated time. Both the engine and the
//! headless harness use these as defaults.

pub mod chat {
    /// Minimum simulated reply latency.
    pub const REPLY_BASE_DELAY_MS: u64 = 1000;
    /// Random latency added on top of the base, drawn from `[0, JITTER)`.
    pub const REPLY_JITTER_MS: u64 = 1000;

    pub const GREETING_ID: &str = "welcome";
    pub const GREETING: &str = "Hi, I'm SpaceScope AI! How can I help you explore space today?";
}

pub mod live {
    pub const COMMENT_INTERVAL_MS: u64 = 3000;
    pub const VIEWER_INTERVAL_MS: u64 = 5000;
    /// Existing comments kept before a new one is appended.
    pub const COMMENT_RETAIN: usize = 20;
    pub const REACTION_LIFETIME_MS: u64 = 2000;

    /// Viewer delta is `floor(r * SPAN) - OFFSET`, i.e. `-3..=6`.
    pub const VIEWER_DELTA_SPAN: i64 = 10;
    pub const VIEWER_DELTA_OFFSET: i64 = 3;

    /// Horizontal placement of reactions, percent of container width.
    pub const REACTION_X_MIN: f64 = 10.0;
    pub const REACTION_X_SPAN: f64 = 80.0;

    /// Username attached to comments typed by the viewer.
    pub const SELF_USER: &str = "You";

    pub const USERNAMES: [&str; 6] = [
        "StarGazer42",
        "CosmicExplorer",
        "NebulaNomad",
        "OrbitObserver",
        "GalaxyGuide",
        "AstroAdventurer",
    ];

    pub const PHRASES: [&str; 8] = [
        "This is amazing!",
        "The ISS looks incredible from here",
        "Can we see the aurora?",
        "Best view of Earth ever!",
        "Hello from Tokyo!",
        "Science is beautiful",
        "Living my dream vicariously",
        "The curvature is so clear!",
    ];
}

pub mod orbit {
    pub const TICK_MS: u64 = 50;
    pub const STEP_DEGREES: f64 = 0.5;
    pub const FULL_TURN: f64 = 360.0;
    /// Displayed orbital plane tilt; not animated.
    pub const INCLINATION_DEGREES: f64 = 30.0;
}

pub mod visibility {
    /// Pass start hour is `FIRST_HOUR + floor(r * HOUR_SPAN)`.
    pub const FIRST_HOUR: u32 = 6;
    pub const HOUR_SPAN: usize = 12;
    /// Pass duration is `MIN_MINUTES + floor(r * MINUTE_SPAN)`.
    pub const MIN_MINUTES: u32 = 2;
    pub const MINUTE_SPAN: usize = 4;

    pub const DIRECTIONS: [&str; 4] = [
        "Northwest to Northeast",
        "Southwest to Southeast",
        "North to South",
        "West to East",
    ];
}
