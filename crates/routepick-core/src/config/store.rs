//! Config store for loading and saving routepick.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use super::{AppConfig, ConfigScope, parser, paths::config_path_for_scope};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    scope: ConfigScope,
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn from_scope(scope: ConfigScope) -> anyhow::Result<Self> {
        let global_dir = global_config_dir()?;
        let project_root = std::env::current_dir()?;

        Ok(Self::from_paths(scope, &global_dir, &project_root))
    }

    pub fn from_paths(scope: ConfigScope, global_dir: &Path, project_root: &Path) -> Self {
        Self {
            scope,
            config_path: config_path_for_scope(scope, global_dir, project_root),
        }
    }

    /// The project config if one exists, else the global one.
    pub fn discover() -> anyhow::Result<Self> {
        let global_dir = global_config_dir()?;
        let project_root = std::env::current_dir()?;
        Ok(Self::discover_in(&global_dir, &project_root))
    }

    pub fn discover_in(global_dir: &Path, project_root: &Path) -> Self {
        let project = Self::from_paths(ConfigScope::Project, global_dir, project_root);
        if project.config_path.exists() {
            return project;
        }
        Self::from_paths(ConfigScope::Global, global_dir, project_root)
    }

    pub fn scope(&self) -> ConfigScope {
        self.scope
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> anyhow::Result<AppConfig> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(AppConfig::new());
        }
        parser::parse_routepick_toml(&self.config_path)
    }

    pub fn save(&self, config: &AppConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config).context("Failed to serialize config to TOML")?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}

fn global_config_dir() -> anyhow::Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("routepick"))
}

/// Directory for logs and other frontend state.
pub fn state_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("routepick")
}
