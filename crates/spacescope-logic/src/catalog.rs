//! Static catalogs: satellites, cities, constellations, missions, learning
//! topics and community events.
//!
//! The data ships as JSON under `data/` and is embedded at compile time.
//! Call [`Catalog::builtin`] once at startup; parsing errors surface as
//! [`LogicError::Catalog`].

use serde::{Deserialize, Serialize};

use crate::error::{LogicError, Result};

const SATELLITES_JSON: &str = include_str!("../../../data/satellites.json");
const CITIES_JSON: &str = include_str!("../../../data/cities.json");
const CONSTELLATIONS_JSON: &str = include_str!("../../../data/constellations.json");
const EVENTS_JSON: &str = include_str!("../../../data/events.json");
const MISSIONS_JSON: &str = include_str!("../../../data/missions.json");
const LEARNING_JSON: &str = include_str!("../../../data/learning.json");

// ============================================================================
// SATELLITES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatelliteKind {
    Iss,
    Communication,
    Weather,
    Research,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    pub id: String,
    pub name: String,
    pub kind: SatelliteKind,
    pub altitude_km: u32,
    pub speed_kmh: u32,
    pub orbit_period_min: u32,
    pub description: String,
    pub launch_date: String,
}

/// Tracking page filter chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatelliteFilter {
    #[default]
    All,
    Only(SatelliteKind),
}

impl SatelliteFilter {
    pub fn accepts(&self, satellite: &Satellite) -> bool {
        match self {
            SatelliteFilter::All => true,
            SatelliteFilter::Only(kind) => satellite.kind == *kind,
        }
    }

    /// Parse a filter label: `all`, `iss`, `communication`, `weather`, `research`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "all" => Some(SatelliteFilter::All),
            "iss" => Some(SatelliteFilter::Only(SatelliteKind::Iss)),
            "communication" => Some(SatelliteFilter::Only(SatelliteKind::Communication)),
            "weather" => Some(SatelliteFilter::Only(SatelliteKind::Weather)),
            "research" => Some(SatelliteFilter::Only(SatelliteKind::Research)),
            _ => None,
        }
    }
}

// ============================================================================
// PLACES & SKY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constellation {
    pub id: String,
    pub name: String,
    pub latin_name: String,
    pub abbreviation: String,
    pub best_viewing: Vec<String>,
    pub brightest_stars: Vec<String>,
    /// Compass point to face, e.g. `"South"` or `"Northeast"`.
    pub direction: String,
    /// Display elevation, e.g. `"45°"`.
    pub elevation: String,
}

// ============================================================================
// MISSIONS & LEARNING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Past,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub name: String,
    pub agency: String,
    /// ISO date, `YYYY-MM-DD`.
    pub launch_date: String,
    pub status: MissionStatus,
    pub tagline: String,
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningTopic {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub summary: String,
    pub sections: Vec<LearningSection>,
}

// ============================================================================
// COMMUNITY EVENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Launch,
    Eclipse,
    MeteorShower,
    Conjunction,
    Livestream,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceEvent {
    pub id: String,
    pub title: String,
    pub kind: EventKind,
    pub date: String,
    pub time: String,
    pub description: String,
    pub is_live: bool,
    #[serde(default)]
    pub viewers: Option<i64>,
    #[serde(default)]
    pub host: Option<String>,
}

// ============================================================================
// CATALOG
// ============================================================================

/// All static data the simulation reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub satellites: Vec<Satellite>,
    pub cities: Vec<City>,
    pub constellations: Vec<Constellation>,
    pub missions: Vec<Mission>,
    pub learning: Vec<LearningTopic>,
    pub events: Vec<SpaceEvent>,
}

fn parse<T: serde::de::DeserializeOwned>(name: &'static str, json: &str) -> Result<Vec<T>> {
    serde_json::from_str(json).map_err(|source| LogicError::Catalog { name, source })
}

impl Catalog {
    /// Parse the embedded JSON catalogs.
    pub fn builtin() -> Result<Self> {
        let catalog = Self {
            satellites: parse("satellites", SATELLITES_JSON)?,
            cities: parse("cities", CITIES_JSON)?,
            constellations: parse("constellations", CONSTELLATIONS_JSON)?,
            missions: parse("missions", MISSIONS_JSON)?,
            learning: parse("learning", LEARNING_JSON)?,
            events: parse("events", EVENTS_JSON)?,
        };
        log::debug!(
            "catalog loaded: {} satellites, {} cities, {} constellations, {} missions, {} learning topics, {} events",
            catalog.satellites.len(),
            catalog.cities.len(),
            catalog.constellations.len(),
            catalog.missions.len(),
            catalog.learning.len(),
            catalog.events.len()
        );
        Ok(catalog)
    }

    pub fn filter_satellites(&self, filter: SatelliteFilter) -> Vec<&Satellite> {
        self.satellites.iter().filter(|s| filter.accepts(s)).collect()
    }

    pub fn iss(&self) -> Option<&Satellite> {
        self.satellites.iter().find(|s| s.kind == SatelliteKind::Iss)
    }

    /// Case-insensitive city lookup.
    pub fn city(&self, name: &str) -> Result<&City> {
        self.cities
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| LogicError::UnknownCity(name.to_string()))
    }

    pub fn constellation(&self, id: &str) -> Result<&Constellation> {
        self.constellations
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| LogicError::UnknownConstellation(id.to_string()))
    }

    pub fn mission(&self, id: &str) -> Result<&Mission> {
        self.missions
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| LogicError::UnknownMission(id.to_string()))
    }

    /// Missions in catalog order with the given status.
    pub fn missions_with_status(&self, status: MissionStatus) -> impl Iterator<Item = &Mission> {
        self.missions.iter().filter(move |m| m.status == status)
    }

    pub fn learning_topic(&self, id: &str) -> Result<&LearningTopic> {
        self.learning
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| LogicError::UnknownLearningTopic(id.to_string()))
    }

    pub fn event(&self, id: &str) -> Result<&SpaceEvent> {
        self.events
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| LogicError::UnknownEvent(id.to_string()))
    }

    pub fn live_events(&self) -> impl Iterator<Item = &SpaceEvent> {
        self.events.iter().filter(|e| e.is_live)
    }

    pub fn upcoming_events(&self) -> impl Iterator<Item = &SpaceEvent> {
        self.events.iter().filter(|e| !e.is_live)
    }
}
