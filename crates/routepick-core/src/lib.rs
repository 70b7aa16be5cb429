//! Routepick Core Library
//!
//! The location-selection workflow of a map-based route planner: picking a
//! point on the map or from search, classifying it with a required skill,
//! and keeping the committed depot and visits in a stable display order.
//! Frontends (CLI/TUI/GUI) drive an [`EditingCoordinator`] and render its
//! view models.

pub mod config;
pub mod coordinator;
pub mod dataset;
pub mod dialog;
pub mod error;
pub mod event;
pub mod location;
pub mod skill;
pub mod store;
pub mod view;

pub use coordinator::{ConfirmOutcome, EditingCoordinator, MapProps};
pub use error::{CoreError, Result, ValidationError};

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{AppConfig, ConfigScope, ConfigStore, ConfirmPolicy};

    // Workflow
    pub use crate::coordinator::{ConfirmOutcome, EditingCoordinator, MapProps};
    pub use crate::dialog::{ConfirmedSelection, DialogState, PendingSelection, SelectionDialog};
    pub use crate::event::{InteractionEvent, MapClick, RawMapEvent, SearchResult};

    // Model
    pub use crate::dataset::{DataSet, DataSetLocation, DemoCatalog};
    pub use crate::location::{Coordinates, Location, LocationId, LocationSnapshot, Plan};
    pub use crate::skill::{SkillCatalog, SkillOption, SkillTag};
    pub use crate::store::{InMemoryStore, LocationStore};

    // View
    pub use crate::view::{CollectionView, EntryLabel, LocationCollection, LocationEntry, RowMessage};

    // Errors
    pub use crate::error::{CoreError, ValidationError};
}
