//! Error types surfaced by the core.
//!
//! Workflow handlers never propagate these; they are returned only from
//! boundary operations (parsing input, loading config and datasets) and from
//! dialog calls made in the wrong state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown skill '{0}'. Use one of: blood preservation, blood transfusion, depot, vaccination, testkit")]
    UnknownSkill(String),

    #[error("Skill '{0}' is disabled in this catalog")]
    SkillDisabled(String),

    #[error("The selection dialog is not open")]
    DialogClosed,

    #[error("Unknown demo '{0}'")]
    UnknownDemo(String),

    #[error("Invalid coordinate input '{0}': expected 'lat,lng'")]
    InvalidCoordinate(String),

    #[error("Failed to parse data set: {0}")]
    DataSetFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Input rejected by the workflow itself, shown to the user instead of raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("A required skill must be selected")]
    SkillRequired,
}

pub type Result<T> = std::result::Result<T, CoreError>;
