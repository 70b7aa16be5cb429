//! Data sets: the exportable form of a plan, and the built-in demos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::location::{Coordinates, Location};
use crate::skill::SkillTag;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetLocation {
    #[serde(default)]
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    pub required_skill: SkillTag,
}

impl DataSetLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

impl From<&Location> for DataSetLocation {
    fn from(location: &Location) -> Self {
        Self {
            label: location.description.clone().unwrap_or_default(),
            lat: location.lat,
            lng: location.lng,
            required_skill: location.required_skill,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSet {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub depot: Option<DataSetLocation>,
    #[serde(default)]
    pub visits: Vec<DataSetLocation>,
}

impl DataSet {
    /// Mark the data set with the current time.
    pub fn stamped(mut self) -> Self {
        self.exported_at = Some(Utc::now());
        self
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| CoreError::DataSetFormat(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> crate::Result<Self> {
        serde_json::from_str(content).map_err(|e| CoreError::DataSetFormat(e.to_string()))
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| CoreError::DataSetFormat(e.to_string()))
    }

    pub fn to_json_string(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::DataSetFormat(e.to_string()))
    }
}

const BUILT_IN_DEMOS: &[(&str, &str)] = &[
    ("sample", include_str!("../demos/sample.toml")),
    ("clinics", include_str!("../demos/clinics.toml")),
];

/// Demo data sets shipped with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCatalog;

impl DemoCatalog {
    pub fn names(&self) -> Vec<&'static str> {
        BUILT_IN_DEMOS.iter().map(|(name, _)| *name).collect()
    }

    pub fn get(&self, name: &str) -> crate::Result<DataSet> {
        let (_, content) = BUILT_IN_DEMOS
            .iter()
            .find(|(demo, _)| *demo == name)
            .ok_or_else(|| CoreError::UnknownDemo(name.to_string()))?;
        DataSet::from_toml_str(content)
    }
}
