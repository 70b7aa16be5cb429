//! Framework-neutral view models for the location list.
//!
//! Frontends render these and feed user gestures back in; rows answer with
//! [`RowMessage`]s for the coordinator to handle.

pub mod collection;
pub mod entry;
pub mod ids;

pub use collection::{CollectionView, LocationCollection};
pub use entry::{EntryLabel, LocationEntry, DEFAULT_LABEL_WIDTH, shorten};

use crate::location::{LocationId, LocationSnapshot};
use crate::skill::SkillTag;

/// What a row asks its owner to do.
#[derive(Debug, Clone, PartialEq)]
pub enum RowMessage {
    Remove(LocationId),
    /// Highlight a row on the map, or clear the highlight.
    Select(Option<LocationId>),
    SkillChange(LocationSnapshot, SkillTag),
}
