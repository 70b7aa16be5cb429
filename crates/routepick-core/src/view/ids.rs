//! Stable identifiers for rows and controls, for test automation.

use crate::location::LocationId;

pub const LOCATION_LIST: &str = "location-list";
pub const LOCATION_LIST_EMPTY: &str = "location-list-empty";
pub const SELECTION_DIALOG: &str = "selection-dialog";
pub const SELECTION_DIALOG_CONFIRM: &str = "selection-dialog-confirm";
pub const SELECTION_DIALOG_CANCEL: &str = "selection-dialog-cancel";

pub fn location_row(id: LocationId) -> String {
    format!("location-{id}")
}

pub fn location_skill(id: LocationId) -> String {
    format!("location-skill-{id}")
}

pub fn location_remove(id: LocationId) -> String {
    format!("location-remove-{id}")
}
