//! Configuration schema for routepick.toml

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::skill::{SkillCatalog, SkillTag};
use crate::view::DEFAULT_LABEL_WIDTH;

/// What confirming the dialog without a skill does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmPolicy {
    /// Keep the dialog open on the same selection and ask for a skill.
    #[default]
    Reprompt,
    /// Close the dialog and drop the selection.
    Discard,
}

/// Root configuration structure for routepick.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Row label width before truncation
    #[serde(default = "default_label_width")]
    pub label_width: usize,

    /// Handling of a dialog confirmed with no skill chosen
    #[serde(default)]
    pub confirm_policy: ConfirmPolicy,

    /// Skills listed in selectors but not selectable
    #[serde(default)]
    pub disabled_skills: Vec<SkillTag>,

    /// Demo loaded when a frontend starts
    #[serde(default)]
    pub default_demo: Option<String>,
}

fn default_label_width() -> usize {
    DEFAULT_LABEL_WIDTH
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            label_width: default_label_width(),
            confirm_policy: ConfirmPolicy::default(),
            disabled_skills: Vec::new(),
            default_demo: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.label_width == 0 {
            return Err(CoreError::Config(
                "label_width must be greater than zero".to_string(),
            ));
        }
        if SkillTag::ALL
            .iter()
            .all(|tag| self.disabled_skills.contains(tag))
        {
            return Err(CoreError::Config(
                "disabled_skills disables every skill; at least one must stay selectable"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn catalog(&self) -> SkillCatalog {
        SkillCatalog::with_disabled(&self.disabled_skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_behavior() {
        let config = AppConfig::default();
        assert_eq!(config.label_width, 20);
        assert_eq!(config.confirm_policy, ConfirmPolicy::Reprompt);
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog(), SkillCatalog::standard());
    }

    #[test]
    fn zero_label_width_is_invalid() {
        let config = AppConfig {
            label_width: 0,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::Config(ref message)) if message.contains("label_width")
        ));
    }

    #[test]
    fn disabling_every_skill_is_invalid() {
        let config = AppConfig {
            disabled_skills: SkillTag::ALL.to_vec(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
