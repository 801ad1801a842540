//! Config file seeding, init and external override.

use riskbar::assets::AssetLoader;
use riskbar::models::AppConfig;
use tempfile::TempDir;

#[test]
fn test_embedded_only_without_config_file() {
    let loader = AssetLoader::new(None);

    assert!(!loader.uses_external_config());
    assert!(!loader.seed_if_configured().unwrap());
    assert!(loader
        .read_config_string()
        .unwrap()
        .contains("cardiometabolic-v1"));
}

#[test]
fn test_seeds_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let loader = AssetLoader::new(Some(path.clone()));

    assert!(loader.seed_if_configured().unwrap());
    assert!(path.exists());
    assert!(loader.uses_external_config());

    // Second call leaves the file alone
    assert!(!loader.seed_if_configured().unwrap());
}

#[test]
fn test_external_config_overrides_embedded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "default_template: tiny\ntemplates:\n  tiny:\n    pages:\n      - labels: [a, b]\n",
    )
    .unwrap();

    let config = AppConfig::load_from_assets(&AssetLoader::new(Some(path)));
    assert_eq!(config.template_names(), vec!["tiny"]);
    let (_, spec) = config.template(None).unwrap();
    assert_eq!(spec.label_count(), 2);
}

#[test]
fn test_invalid_template_is_dropped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "templates:\n  good:\n    pages:\n      - labels: [a]\n  bad:\n    pages: []\n",
    )
    .unwrap();

    let config = AppConfig::load_from_assets(&AssetLoader::new(Some(path)));
    assert_eq!(config.template_names(), vec!["good"]);
}

#[test]
fn test_unparseable_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "templates: [this is not a map").unwrap();

    let config = AppConfig::load_from_assets(&AssetLoader::new(Some(path)));
    assert!(config.templates.is_empty());
}

#[test]
fn test_init_respects_force() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    let loader = AssetLoader::new(Some(path.clone()));

    let report = loader.init(false).unwrap();
    assert_eq!(report.written.len(), 1);
    assert!(report.skipped.is_empty());

    std::fs::write(&path, "# edited\n").unwrap();
    let report = loader.init(false).unwrap();
    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited\n");

    let report = loader.init(true).unwrap();
    assert_eq!(report.written.len(), 1);
    assert!(std::fs::read_to_string(&path)
        .unwrap()
        .contains("cardiometabolic-v1"));
}

#[test]
fn test_list_embedded() {
    assert_eq!(AssetLoader::list_embedded(), vec!["config.yaml".to_string()]);
}
