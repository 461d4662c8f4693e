//! Telescope pointing hints for constellations.
//!
//! The bearing is the constellation's compass point plus a small offset
//! derived from the city name (5° per character), wrapped to `[0, 360)`.
//! It is a demo value, not an astronomical computation.

use serde::{Deserialize, Serialize};

use crate::catalog::{City, Constellation};

/// Eight-point compass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compass {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Compass {
    pub fn bearing(&self) -> u32 {
        match self {
            Compass::North => 0,
            Compass::Northeast => 45,
            Compass::East => 90,
            Compass::Southeast => 135,
            Compass::South => 180,
            Compass::Southwest => 225,
            Compass::West => 270,
            Compass::Northwest => 315,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "North" => Some(Compass::North),
            "Northeast" => Some(Compass::Northeast),
            "East" => Some(Compass::East),
            "Southeast" => Some(Compass::Southeast),
            "South" => Some(Compass::South),
            "Southwest" => Some(Compass::Southwest),
            "West" => Some(Compass::West),
            "Northwest" => Some(Compass::Northwest),
            _ => None,
        }
    }
}

/// Where to point a telescope for one constellation from one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointing {
    pub constellation_id: String,
    pub city: String,
    /// Degrees clockwise from north.
    pub bearing: u32,
    pub elevation: String,
}

/// Bearing for a compass label seen from `city_name`.
///
/// Unknown labels point north.
pub fn bearing_from(direction: &str, city_name: &str) -> u32 {
    let base = Compass::parse(direction).map_or(0, |c| c.bearing());
    let offset = city_name.chars().count() as u32 * 5;
    (base + offset) % 360
}

pub fn pointing(constellation: &Constellation, city: &City) -> Pointing {
    Pointing {
        constellation_id: constellation.id.clone(),
        city: city.name.clone(),
        bearing: bearing_from(&constellation.direction, &city.name),
        elevation: constellation.elevation.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_bearing_examples() {
        assert_eq!(bearing_from("South", "Tokyo"), 205);
        assert_eq!(bearing_from("North", "Los Angeles"), 55);
        // 315 + 45 wraps.
        assert_eq!(bearing_from("Northwest", "Singapore"), 0);
        assert_eq!(bearing_from("Up", "Paris"), 25);
    }

    #[test]
    fn test_pointing_from_catalog() {
        let catalog = Catalog::builtin().unwrap();
        let orion = catalog.constellation("orion").unwrap();
        let london = catalog.city("London").unwrap();
        let p = pointing(orion, london);
        assert_eq!(p.bearing, 210);
        assert_eq!(p.elevation, "45°");
    }
}
