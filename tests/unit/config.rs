use std::collections::HashMap;

use super::*;

#[test]
fn defaults_are_relative_dirs_and_standard_threshold() {
    let c = MockupConfig::default();
    assert_eq!(c.swatch_dir, PathBuf::from("swatches"));
    assert_eq!(c.output_dir, PathBuf::from("mockups"));
    assert_eq!(c.threshold, 200);
    assert_eq!(c.background, Background::None);
    c.validate().unwrap();
}

#[test]
fn with_root_joins_subdirs() {
    let c = MockupConfig::with_root("/srv/assets");
    assert_eq!(c.template_dir, PathBuf::from("/srv/assets/templates"));
    assert_eq!(c.mask_dir, PathBuf::from("/srv/assets/masks"));
}

#[test]
fn json_missing_fields_take_defaults() {
    let json = r#"{ "swatch_dir": "fabric", "background": "silhouette" }"#;
    let c = MockupConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(c.swatch_dir, PathBuf::from("fabric"));
    assert_eq!(c.template_dir, PathBuf::from("templates"));
    assert_eq!(c.background, Background::Silhouette);
}

#[test]
fn json_unknown_field_is_rejected() {
    let json = r#"{ "swatch_directory": "fabric" }"#;
    let err = MockupConfig::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("config error:"));
}

#[test]
fn from_path_reports_missing_file() {
    let err = MockupConfig::from_path("definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open config"));
}

#[test]
fn overrides_replace_dirs_and_threshold() {
    let env: HashMap<&str, &str> = [
        (ENV_SWATCH_DIR, "/data/swatches"),
        (ENV_OUTPUT_DIR, "/data/out"),
        (ENV_MASK_DIR, "  "),
        (ENV_THRESHOLD, "180"),
    ]
    .into_iter()
    .collect();

    let mut c = MockupConfig::default();
    c.apply_overrides(|k| env.get(k).map(|v| v.to_string()))
        .unwrap();
    assert_eq!(c.swatch_dir, PathBuf::from("/data/swatches"));
    assert_eq!(c.output_dir, PathBuf::from("/data/out"));
    assert_eq!(c.mask_dir, PathBuf::from("masks"));
    assert_eq!(c.threshold, 180);
}

#[test]
fn bad_threshold_override_is_config_error() {
    let mut c = MockupConfig::default();
    let err = c
        .apply_overrides(|k| (k == ENV_THRESHOLD).then(|| "300".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains(ENV_THRESHOLD));
}

#[test]
fn validate_rejects_empty_dir_and_max_threshold() {
    let c = MockupConfig {
        output_dir: PathBuf::new(),
        ..MockupConfig::default()
    };
    assert!(c.validate().is_err());

    let c = MockupConfig {
        threshold: 255,
        ..MockupConfig::default()
    };
    assert!(c.validate().is_err());
}
