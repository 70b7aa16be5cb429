//! Configuration for frontends
//!
//! Settings live in `routepick.toml`, looked up in two scopes:
//! - Project: ./routepick.toml
//! - Global: ~/.config/routepick/routepick.toml
//!
//! The project file wins when present; a missing file means defaults.

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

use serde::{Deserialize, Serialize};

pub use parser::{parse_routepick_toml, parse_routepick_toml_str, to_toml};
pub use paths::config_path_for_scope;
pub use schema::{AppConfig, ConfirmPolicy};
pub use store::{ConfigStore, state_dir};

/// Configuration scope levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigScope {
    /// User-wide configuration
    Global,
    /// Per-project configuration in the working directory
    Project,
}
