//! Location records and the plan snapshot the store publishes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::skill::SkillTag;

/// Store-assigned identity of a location. Stable for the record's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub u64);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

impl FromStr for Coordinates {
    type Err = CoreError;

    /// Parses `"lat,lng"`, whitespace around either number allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidCoordinate(s.to_string());
        let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let lng = lng.trim().parse::<f64>().map_err(|_| invalid())?;
        Ok(Self { lat, lng })
    }
}

/// A committed location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,
    #[serde(default)]
    pub description: Option<String>,
    pub required_skill: SkillTag,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Location-shaped payload for an in-list skill edit.
    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            id: self.id,
            description: self.description.clone().unwrap_or_default(),
            required_skill: self.required_skill,
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Full copy of a row's values, handed to the store on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSnapshot {
    pub id: LocationId,
    pub description: String,
    pub required_skill: SkillTag,
    pub lat: f64,
    pub lng: f64,
}

impl LocationSnapshot {
    pub fn with_skill(mut self, skill: SkillTag) -> Self {
        self.required_skill = skill;
        self
    }
}

/// Read-only view of the committed collection.
///
/// `visits` keeps insertion order; consumers that need display order sort a
/// copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub depot: Option<Location>,
    pub visits: Vec<Location>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.depot.is_none() && self.visits.is_empty()
    }

    pub fn len(&self) -> usize {
        usize::from(self.depot.is_some()) + self.visits.len()
    }

    pub fn find(&self, id: LocationId) -> Option<&Location> {
        self.depot
            .iter()
            .chain(self.visits.iter())
            .find(|location| location.id == id)
    }

    pub fn is_depot(&self, id: LocationId) -> bool {
        self.depot.as_ref().is_some_and(|depot| depot.id == id)
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.depot.iter().chain(self.visits.iter())
    }
}
