//! Skill selection dialog
//!
//! A two-state machine over a pending selection:
//!
//! ```text
//! Closed --open(pending)--> Open(pending)
//! Open   --confirm()------> Closed   (yields ConfirmedSelection)
//! Open   --cancel()-------> Closed
//! ```
//!
//! The chosen skill starts empty every time the dialog opens. Confirming
//! without one is allowed here; the coordinator decides what that means.

use tracing::debug;

use crate::error::CoreError;
use crate::location::Coordinates;
use crate::skill::{SkillCatalog, SkillTag};

/// A coordinate captured from the map or search, not yet a location.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSelection {
    pub coordinate: Coordinates,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open(PendingSelection),
}

/// What the dialog hands back on confirm.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedSelection {
    pub coordinate: Coordinates,
    pub address: Option<String>,
    pub skill: Option<SkillTag>,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionDialog {
    state: DialogState,
    chosen_skill: Option<SkillTag>,
}

impl SelectionDialog {
    pub const TITLE: &'static str = "Select Skill";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open(_))
    }

    pub fn pending(&self) -> Option<&PendingSelection> {
        match &self.state {
            DialogState::Open(pending) => Some(pending),
            DialogState::Closed => None,
        }
    }

    pub fn chosen_skill(&self) -> Option<SkillTag> {
        self.chosen_skill
    }

    /// Open on a new pending selection, replacing any current one.
    pub fn open(&mut self, pending: PendingSelection) {
        if let DialogState::Open(previous) = &self.state {
            debug!(?previous, "Replacing pending selection in open dialog");
        }
        debug!(coordinate = %pending.coordinate, address = ?pending.address, "Opening selection dialog");
        self.state = DialogState::Open(pending);
        self.chosen_skill = None;
    }

    /// Pick a skill. Ignored unless open and the skill is selectable.
    pub fn choose_skill(&mut self, catalog: &SkillCatalog, skill: SkillTag) -> bool {
        if !self.is_open() || !catalog.is_selectable(skill) {
            debug!(%skill, open = self.is_open(), "Ignoring skill choice");
            return false;
        }
        self.chosen_skill = Some(skill);
        true
    }

    /// Close and hand back the pending coordinate, address and chosen skill.
    pub fn confirm(&mut self) -> crate::Result<ConfirmedSelection> {
        let DialogState::Open(pending) = std::mem::take(&mut self.state) else {
            return Err(CoreError::DialogClosed);
        };
        let skill = self.chosen_skill.take();
        debug!(?skill, "Selection dialog confirmed");
        Ok(ConfirmedSelection {
            coordinate: pending.coordinate,
            address: pending.address,
            skill,
        })
    }

    /// Close without a payload. Returns the discarded selection, if any.
    pub fn cancel(&mut self) -> Option<PendingSelection> {
        self.chosen_skill = None;
        match std::mem::take(&mut self.state) {
            DialogState::Open(pending) => {
                debug!("Selection dialog cancelled");
                Some(pending)
            }
            DialogState::Closed => None,
        }
    }

    /// Latitude and longitude lines shown in the dialog body.
    pub fn coordinate_lines(&self) -> Option<[String; 2]> {
        self.pending().map(|pending| {
            [
                format!("Latitude : {}", pending.coordinate.lat),
                format!("Longitude : {}", pending.coordinate.lng),
            ]
        })
    }

    /// Address line, if the selection came from search.
    pub fn address_line(&self) -> Option<String> {
        self.pending()
            .and_then(|pending| pending.address.as_deref())
            .map(|address| format!("Address : {address}"))
    }
}
