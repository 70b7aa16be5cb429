//! TOML parser with helpful error messages

use super::schema::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse routepick.toml with detailed error messages
pub fn parse_routepick_toml(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_routepick_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse routepick.toml content from string
pub fn parse_routepick_toml_str(content: &str) -> Result<AppConfig> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;

    config.validate()?;

    Ok(config)
}

/// Point a TOML error at the line it came from, with a line of context
/// either side.
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let Some(span) = error.span() else {
        return anyhow::anyhow!("TOML parsing error: {}", error.message());
    };
    let offset = span.start.min(content.len());
    let line = content[..offset].matches('\n').count() + 1;
    anyhow::anyhow!(
        "TOML parsing error at line {line}: {}\n{}",
        error.message(),
        excerpt(content, line)
    )
}

fn excerpt(content: &str, line: usize) -> String {
    let first = line.saturating_sub(1).max(1);
    content
        .lines()
        .enumerate()
        .map(|(index, text)| (index + 1, text))
        .skip(first - 1)
        .take_while(|(number, _)| *number <= line + 1)
        .map(|(number, text)| {
            let marker = if number == line { ">>>" } else { "   " };
            format!("{marker} {number:4} | {text}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize a configuration to TOML string
pub fn to_toml(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).with_context(|| "Failed to serialize configuration to TOML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfirmPolicy;
    use crate::skill::SkillTag;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_valid_config() {
        let toml = r#"
label_width = 24
confirm_policy = "discard"
disabled_skills = ["testkit"]
default_demo = "sample"
"#;

        let config = parse_routepick_toml_str(toml).unwrap();
        assert_eq!(config.label_width, 24);
        assert_eq!(config.confirm_policy, ConfirmPolicy::Discard);
        assert_eq!(config.disabled_skills, vec![SkillTag::Testkit]);
        assert_eq!(config.default_demo.as_deref(), Some("sample"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_routepick_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_parse_unknown_skill() {
        let result = parse_routepick_toml_str(r#"disabled_skills = ["surgery"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_failure_is_reported() {
        let err = parse_routepick_toml_str("label_width = 0")
            .unwrap_err()
            .to_string();
        assert!(err.contains("label_width"));
    }

    #[test]
    fn test_parse_error_marks_offending_line() {
        let toml = "label_width = 12\nconfirm_policy = \"reprompt\"\nlabel_width = 13\n";

        let err = parse_routepick_toml_str(toml).unwrap_err().to_string();

        assert!(err.contains("at line 3"), "{err}");
        assert!(err.contains(">>>    3 | label_width = 13"), "{err}");
        assert!(err.contains("       2 | confirm_policy"), "{err}");
    }

    #[test]
    fn test_excerpt_clamps_to_content() {
        assert_eq!(excerpt("a = 1", 1), ">>>    1 | a = 1");
        assert_eq!(excerpt("a = 1\nb = 2", 2), "       1 | a = 1\n>>>    2 | b = 2");
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let original = AppConfig {
            label_width: 30,
            confirm_policy: ConfirmPolicy::Discard,
            disabled_skills: vec![SkillTag::Depot],
            default_demo: Some("clinics".to_string()),
        };

        let toml_str = to_toml(&original).unwrap();
        let parsed = parse_routepick_toml_str(&toml_str).unwrap();

        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "label_width = 12").unwrap();

        let config = parse_routepick_toml(temp_file.path()).unwrap();
        assert_eq!(config.label_width, 12);
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let result = parse_routepick_toml(Path::new("/nonexistent/path/routepick.toml"));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
