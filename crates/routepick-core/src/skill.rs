//! Required-skill catalog
//!
//! The closed set of skill tags a location can require, with their display
//! labels. Parsing through [`SkillTag::from_str`] is the only way a free-form
//! string becomes a tag, so selectors only ever see catalog values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A required-skill tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillTag {
    #[serde(rename = "blood preservation")]
    BloodPreservation,
    #[serde(rename = "blood transfusion")]
    BloodTransfusion,
    #[serde(rename = "depot")]
    Depot,
    #[serde(rename = "vaccination")]
    Vaccination,
    #[serde(rename = "testkit")]
    Testkit,
}

impl SkillTag {
    pub const ALL: [SkillTag; 5] = [
        SkillTag::BloodPreservation,
        SkillTag::BloodTransfusion,
        SkillTag::Depot,
        SkillTag::Vaccination,
        SkillTag::Testkit,
    ];

    /// Wire value, as stored on a location.
    pub fn as_str(self) -> &'static str {
        match self {
            SkillTag::BloodPreservation => "blood preservation",
            SkillTag::BloodTransfusion => "blood transfusion",
            SkillTag::Depot => "depot",
            SkillTag::Vaccination => "vaccination",
            SkillTag::Testkit => "testkit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillTag::BloodPreservation => "Blood Preservation",
            SkillTag::BloodTransfusion => "Blood Transfusion",
            SkillTag::Depot => "Depot",
            SkillTag::Vaccination => "Vaccination",
            SkillTag::Testkit => "Testkit",
        }
    }
}

impl fmt::Display for SkillTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillTag {
    type Err = CoreError;

    /// Accepts exactly the wire values, as config files and data sets do.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        SkillTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == value)
            .ok_or_else(|| CoreError::UnknownSkill(s.to_string()))
    }
}

/// One entry of the catalog as a selector shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillOption {
    pub value: SkillTag,
    pub label: &'static str,
    pub disabled: bool,
}

impl fmt::Display for SkillOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Ordered, immutable list of skill options shared by the dialog and rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCatalog {
    options: Vec<SkillOption>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl SkillCatalog {
    /// All five skills, enabled.
    pub fn standard() -> Self {
        Self::with_disabled(&[])
    }

    /// All five skills, with the given ones listed but not selectable.
    pub fn with_disabled(disabled: &[SkillTag]) -> Self {
        let options = SkillTag::ALL
            .into_iter()
            .map(|value| SkillOption {
                value,
                label: value.label(),
                disabled: disabled.contains(&value),
            })
            .collect();
        Self { options }
    }

    pub fn list(&self) -> &[SkillOption] {
        &self.options
    }

    pub fn get(&self, tag: SkillTag) -> Option<&SkillOption> {
        self.options.iter().find(|option| option.value == tag)
    }

    pub fn is_selectable(&self, tag: SkillTag) -> bool {
        self.get(tag).is_some_and(|option| !option.disabled)
    }

    /// Parse a user-supplied value and check it is selectable here.
    pub fn parse(&self, value: &str) -> crate::Result<SkillTag> {
        let tag: SkillTag = value.parse()?;
        if !self.is_selectable(tag) {
            return Err(CoreError::SkillDisabled(tag.to_string()));
        }
        Ok(tag)
    }

    /// Options that can currently be picked, in catalog order.
    pub fn selectable(&self) -> impl Iterator<Item = &SkillOption> {
        self.options.iter().filter(|option| !option.disabled)
    }
}
