//! Loading-focused tests for configuration

use std::path::Path;

use crate::config::{load_config_from, load_toml_file, ConfigLayer, EngineConfig};
use crate::params::{Alignment, StageLocation};
use crate::{Error, Result};

fn write_config(dir: &Path, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.join("config.toml");
    std::fs::write(&path, content)
        .map_err(|e| Error::io(format!("Failed to write test file: {e}")))?;
    Ok(path)
}

fn temp_dir() -> Result<tempfile::TempDir> {
    tempfile::tempdir().map_err(|e| Error::io(format!("Failed to create temp dir: {e}")))
}

#[test]
fn test_defaults_are_valid() -> Result<()> {
    let config = EngineConfig::default();
    config.validate()?;
    assert_eq!(config.stage_depth, 1);
    assert_eq!(config.artifact_path, "table_locations.json");
    assert!(config.defaults.head_table_spec.is_none());
    Ok(())
}

#[test]
fn test_file_overrides_only_present_keys() -> Result<()> {
    let dir = temp_dir()?;
    let path = write_config(dir.path(), "stage_depth = 2\n")?;
    let config = load_config_from(&path)?;
    assert_eq!(config.stage_depth, 2);
    assert_eq!(config.artifact_path, "table_locations.json");
    Ok(())
}

#[test]
fn test_defaults_table_accepts_legacy_names() -> Result<()> {
    let dir = temp_dir()?;
    let path = write_config(
        dir.path(),
        r#"
artifact_path = "out/layout.json"

[defaults]
stage_location = "left"
stage_alignment = "CENTER_LEAN_RIGHT_TOP"
guest_area_width = 7
staggered_columns = [2]
"#,
    )?;
    let config = load_config_from(&path)?;
    assert_eq!(config.artifact_path, "out/layout.json");
    assert_eq!(config.defaults.stage_location, StageLocation::Left);
    assert_eq!(config.defaults.stage_alignment, Alignment::CenterLeanHigh);
    assert_eq!(config.defaults.guest_area_width, 7);
    assert_eq!(config.defaults.guest_area_depth, 8);
    assert!(config.defaults.staggered_columns.contains(&2));
    Ok(())
}

#[test]
fn test_malformed_toml_is_invalid_config() -> Result<()> {
    let dir = temp_dir()?;
    let path = write_config(dir.path(), "stage_depth = \n [[[")?;
    assert!(matches!(load_toml_file(&path), Err(Error::InvalidConfig(_))));
    Ok(())
}

#[test]
fn test_unknown_key_rejected() -> Result<()> {
    let dir = temp_dir()?;
    let path = write_config(dir.path(), "stage_dpth = 2\n")?;
    assert!(load_toml_file(&path).is_err());
    Ok(())
}

#[test]
fn test_zero_stage_depth_fails_validation() -> Result<()> {
    let dir = temp_dir()?;
    let path = write_config(dir.path(), "stage_depth = 0\n")?;
    assert!(matches!(load_config_from(&path), Err(Error::InvalidConfig(_))));
    Ok(())
}

#[test]
fn test_invalid_enum_in_defaults_fails() -> Result<()> {
    let dir = temp_dir()?;
    let path = write_config(dir.path(), "[defaults]\nstage_location = \"MIDDLE\"\n")?;
    assert!(load_toml_file(&path).is_err());
    Ok(())
}

#[test]
fn test_missing_explicit_file_is_error() {
    let result = load_config_from(Path::new("/nonexistent/seating/config.toml"));
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn test_directory_is_not_a_config_file() -> Result<()> {
    let dir = temp_dir()?;
    assert!(matches!(load_toml_file(dir.path()), Err(Error::Io(_))));
    Ok(())
}

#[test]
fn test_env_overrides() -> Result<()> {
    let config = EngineConfig::default().apply_env_from(|key| match key {
        "SEATING_STAGE_DEPTH" => Some("2".to_string()),
        "SEATING_ARTIFACT_PATH" => Some("/tmp/layout.json".to_string()),
        _ => None,
    })?;
    assert_eq!(config.stage_depth, 2);
    assert_eq!(config.artifact_path, "/tmp/layout.json");
    Ok(())
}

#[test]
fn test_env_override_rejects_garbage() {
    let result = EngineConfig::default().apply_env_from(|key| {
        (key == "SEATING_STAGE_DEPTH").then(|| "deep".to_string())
    });
    assert!(matches!(result, Err(Error::InvalidConfig(_))));

    let result = EngineConfig::default().apply_env_from(|key| {
        (key == "SEATING_ARTIFACT_PATH").then(|| "  ".to_string())
    });
    assert!(result.is_err());
}

#[test]
fn test_merge_prefers_upper_layer() {
    let merged = EngineConfig::default().merge(ConfigLayer {
        stage_depth: Some(3),
        ..ConfigLayer::default()
    });
    assert_eq!(merged.stage_depth, 3);
    assert_eq!(merged.artifact_path, "table_locations.json");
}
