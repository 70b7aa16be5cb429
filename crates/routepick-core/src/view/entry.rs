//! One committed location as a list row.

use tracing::debug;

use super::{ids, RowMessage};
use crate::location::{Location, LocationId};
use crate::skill::SkillTag;

pub const DEFAULT_LABEL_WIDTH: usize = 20;

/// Text shown for a row, plus the full description for hover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLabel {
    pub text: String,
    pub hover: Option<String>,
}

/// Cut a description to its part before the first comma, at most `width`
/// characters, marking any truncation with `...`.
pub fn shorten(text: &str, width: usize) -> String {
    let first = text.split(',').next().unwrap_or_default().trim();
    let short: String = first.chars().take(width).collect();
    let short = short.trim();
    if short.chars().count() < first.chars().count() {
        format!("{short}...")
    } else {
        short.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationEntry {
    location: Location,
    remove_disabled: bool,
    removal_latched: bool,
    label_width: usize,
}

impl LocationEntry {
    pub fn new(location: Location, remove_disabled: bool) -> Self {
        Self::with_label_width(location, remove_disabled, DEFAULT_LABEL_WIDTH)
    }

    pub fn with_label_width(location: Location, remove_disabled: bool, label_width: usize) -> Self {
        Self {
            location,
            remove_disabled,
            removal_latched: false,
            label_width,
        }
    }

    /// Same row identity, fresh props. The removal latch survives.
    pub(crate) fn refreshed(mut self, location: Location, remove_disabled: bool) -> Self {
        self.location = location;
        self.remove_disabled = remove_disabled;
        self
    }

    pub fn id(&self) -> LocationId {
        self.location.id
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn required_skill(&self) -> SkillTag {
        self.location.required_skill
    }

    pub fn label(&self) -> EntryLabel {
        let description = self
            .location
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty());
        match description.map(|d| (d, shorten(d, self.label_width))) {
            Some((full, text)) if !text.is_empty() => EntryLabel {
                text,
                hover: Some(full.to_string()),
            },
            _ => EntryLabel {
                text: format!("Location {}", self.location.id),
                hover: None,
            },
        }
    }

    pub fn remove_disabled(&self) -> bool {
        self.remove_disabled
    }

    pub fn is_removal_latched(&self) -> bool {
        self.removal_latched
    }

    pub fn remove_enabled(&self) -> bool {
        !self.remove_disabled && !self.removal_latched
    }

    pub fn hover(&self) -> RowMessage {
        RowMessage::Select(Some(self.location.id))
    }

    pub fn leave(&self) -> RowMessage {
        RowMessage::Select(None)
    }

    pub fn change_skill(&self, skill: SkillTag) -> RowMessage {
        RowMessage::SkillChange(self.location.snapshot(), skill)
    }

    /// Press the removal control. Fires once per row lifetime.
    pub fn click_remove(&mut self) -> Option<RowMessage> {
        if !self.remove_enabled() {
            debug!(
                id = %self.location.id,
                latched = self.removal_latched,
                disabled = self.remove_disabled,
                "Ignoring removal click"
            );
            return None;
        }
        self.removal_latched = true;
        Some(RowMessage::Remove(self.location.id))
    }

    pub fn coordinate_text(&self) -> String {
        format!("{}, {}", self.location.lat, self.location.lng)
    }

    pub fn test_id(&self) -> String {
        ids::location_row(self.location.id)
    }

    pub fn skill_test_id(&self) -> String {
        ids::location_skill(self.location.id)
    }

    pub fn remove_test_id(&self) -> String {
        ids::location_remove(self.location.id)
    }
}
