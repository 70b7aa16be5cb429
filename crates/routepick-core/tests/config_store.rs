use tempfile::TempDir;

use routepick_core::config::{AppConfig, ConfigScope, ConfigStore, ConfirmPolicy};
use routepick_core::skill::SkillTag;

#[test]
fn load_missing_returns_default_config() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_paths(
        ConfigScope::Global,
        &temp.path().join("config"),
        &temp.path().join("project"),
    );

    let config = store.load().unwrap();

    assert_eq!(config, AppConfig::default());
}

#[test]
fn save_then_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_paths(
        ConfigScope::Global,
        &temp.path().join("config"),
        &temp.path().join("project"),
    );

    let config = AppConfig {
        label_width: 16,
        confirm_policy: ConfirmPolicy::Discard,
        disabled_skills: vec![SkillTag::BloodPreservation],
        default_demo: Some("sample".to_string()),
    };
    store.save(&config).unwrap();

    assert!(temp.path().join("config").join("routepick.toml").exists());
    assert_eq!(store.load().unwrap(), config);
}

#[test]
fn discover_prefers_project_config() {
    let temp = TempDir::new().unwrap();
    let global_dir = temp.path().join("config");
    let project_root = temp.path().join("project");

    let found = ConfigStore::discover_in(&global_dir, &project_root);
    assert_eq!(found.scope(), ConfigScope::Global);

    std::fs::create_dir_all(&project_root).unwrap();
    std::fs::write(project_root.join("routepick.toml"), "label_width = 8\n").unwrap();

    let found = ConfigStore::discover_in(&global_dir, &project_root);
    assert_eq!(found.scope(), ConfigScope::Project);
    assert_eq!(found.load().unwrap().label_width, 8);
}

#[test]
fn invalid_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let project_root = temp.path().join("project");
    std::fs::create_dir_all(&project_root).unwrap();
    std::fs::write(project_root.join("routepick.toml"), "confirm_policy = \"maybe\"\n").unwrap();

    let store = ConfigStore::from_paths(ConfigScope::Project, temp.path(), &project_root);
    let err = format!("{:#}", store.load().unwrap_err());

    assert!(err.contains("routepick.toml"));
}
