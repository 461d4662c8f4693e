//! Keyword intent matcher for the SpaceScope assistant.
//!
//! Input is classified into one of eight topics by an ordered list of
//! rules. Each rule holds lowercase keywords that are tested by substring
//! containment against the lowercased input. The first rule with any
//! matching keyword wins; [`Topic::General`] is the fallback.
//!
//! Order matters: "mars rover satellite" is a satellite question because
//! the satellite rule sits above the Mars rule, and "What is JWST?" lands
//! on the learning rule before the telescope rule is ever consulted.
//!
//! ```
//! use spacescope_logic::intent::{IntentMatcher, Topic};
//!
//! let matcher = IntentMatcher::default();
//! assert_eq!(matcher.classify("Tell me about the Perseverance rover"), Topic::Mars);
//! assert_eq!(matcher.classify("What is JWST?"), Topic::Learning);
//! assert_eq!(matcher.classify("hello"), Topic::General);
//! ```

use serde::{Deserialize, Serialize};

/// Topics the assistant can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Mission,
    Constellation,
    Iss,
    Satellite,
    Mars,
    Learning,
    Telescope,
    /// Fallback when no rule matched.
    General,
}

impl Topic {
    /// All topics in rule priority order, fallback last.
    pub const ALL: [Topic; 8] = [
        Topic::Mission,
        Topic::Constellation,
        Topic::Iss,
        Topic::Satellite,
        Topic::Mars,
        Topic::Learning,
        Topic::Telescope,
        Topic::General,
    ];

    /// Canned answer for this topic.
    pub fn response(&self) -> &'static str {
        match self {
            Topic::Mission => "We have information on many historic and current missions! From Apollo 11's historic Moon landing to the James Webb Space Telescope's incredible discoveries. Visit our Missions page to explore them all, or ask me about a specific mission!",
            Topic::Constellation => "The night sky is full of ancient stories! I can tell you about constellations like Orion the Hunter, the Big Dipper, or Scorpius. Our Constellations page even has a simulated telescope direction feature to help you find them!",
            Topic::Iss => "The International Space Station orbits Earth at about 420 km altitude, traveling at 27,600 km/h! It completes one orbit every 92 minutes. Check our Live Tracking page to see its current position!",
            Topic::Satellite => "There are thousands of satellites orbiting Earth, from communication satellites to weather monitors and research platforms. Our Live Tracking page lets you explore different types and their orbits!",
            Topic::Mars => "Mars is currently being explored by several missions! The Perseverance rover is collecting samples, Curiosity continues its journey, and upcoming missions aim to bring Martian samples back to Earth.",
            Topic::Learning => "Want to learn about space? Our Learning Hub covers topics like how rockets work, orbital mechanics, black holes, and satellites. Perfect for curious minds of all ages!",
            Topic::Telescope => "The James Webb Space Telescope is the largest optical telescope in space! Launched in 2021, it uses infrared observations to see the earliest galaxies and study exoplanet atmospheres.",
            Topic::General => "I'm SpaceScope AI, your guide to the cosmos! I can help you explore missions, learn about constellations, track satellites, and discover amazing facts about space. What would you like to know?",
        }
    }
}

/// One routing rule: any keyword present selects the topic.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub topic: Topic,
    /// Lowercase substrings. An empty list never matches.
    pub keywords: &'static [&'static str],
}

impl IntentRule {
    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Built-in rules in priority order. The fallback is not listed.
pub const DEFAULT_RULES: [IntentRule; 7] = [
    IntentRule {
        topic: Topic::Mission,
        keywords: &["mission", "apollo", "artemis"],
    },
    IntentRule {
        topic: Topic::Constellation,
        keywords: &["constellation", "star", "orion"],
    },
    IntentRule {
        topic: Topic::Iss,
        keywords: &["iss", "space station"],
    },
    IntentRule {
        topic: Topic::Satellite,
        keywords: &["satellite", "tracking"],
    },
    IntentRule {
        topic: Topic::Mars,
        keywords: &["mars", "rover", "perseverance"],
    },
    IntentRule {
        topic: Topic::Learning,
        keywords: &["learn", "how", "what"],
    },
    IntentRule {
        topic: Topic::Telescope,
        keywords: &["webb", "jwst", "telescope"],
    },
];

/// Ordered rule list with a fixed fallback topic.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    rules: Vec<IntentRule>,
    fallback: Topic,
}

impl IntentMatcher {
    pub fn new(rules: Vec<IntentRule>, fallback: Topic) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// First matching topic, or the fallback.
    pub fn classify(&self, input: &str) -> Topic {
        let lowered = input.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(self.fallback, |rule| rule.topic)
    }

    /// Canned response for `input`. Never empty.
    pub fn respond(&self, input: &str) -> &'static str {
        self.classify(input).response()
    }
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec(), Topic::General)
    }
}
