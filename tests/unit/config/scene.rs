use super::*;
use crate::mask::bite::ErosionStyle;

#[test]
fn defaults_are_valid_and_keep_both_profiles() {
    let cfg = SceneConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.spray, ParticleProfile::spray());
    assert_eq!(cfg.burst, ParticleProfile::burst());
    assert_eq!(cfg.particle_profile().default_count, 80);
}

#[test]
fn partial_json_keeps_defaults_for_missing_fields() {
    let cfg = SceneConfig::from_json_str(
        r#"{
            "variant": "flat",
            "seed": 7,
            "bites": { "start_delay": 0.5, "erosion": { "wedge": { "sweep_rad": 2.0 } } }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.variant, SceneVariant::Flat);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.bites.start_delay, 0.5);
    assert_eq!(cfg.bites.bites.len(), 5);
    assert_eq!(cfg.bites.erosion, ErosionStyle::Wedge { sweep_rad: 2.0 });
    assert_eq!(cfg.particle_profile(), &ParticleProfile::burst());
    assert_eq!(cfg.cloud.anchors.len(), 9);
}

#[test]
fn printed_defaults_parse_back() {
    let cfg = SceneConfig::default();
    let text = cfg.to_json_pretty().unwrap();
    assert_eq!(SceneConfig::from_json_str(&text).unwrap(), cfg);
}

#[test]
fn invalid_ranges_are_rejected() {
    let err = SceneConfig::from_json_str(r#"{ "spray": { "speed": { "min": 5.0, "max": 1.0 } } }"#)
        .unwrap_err();
    assert!(matches!(err, FxError::Validation(_)));
    assert!(err.to_string().contains("spray"));

    let err = SceneConfig::from_json_str(r#"{ "bites": { "bites": [] } }"#).unwrap_err();
    assert!(matches!(err, FxError::Validation(_)));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, FxError::Serde(_)));
}

#[test]
fn load_reports_missing_file() {
    let path = std::env::temp_dir().join("giftfx-missing-scene-config.json");
    let _ = std::fs::remove_file(&path);
    let err = SceneConfig::load(&path).unwrap_err();
    assert!(matches!(err, FxError::Other(_)));
    assert!(format!("{err:#}").contains("read scene config"));
}

#[test]
fn load_reads_file() {
    let dir = std::env::temp_dir().join(format!("giftfx-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("scene.json");
    std::fs::write(&path, r#"{ "seed": 3 }"#).unwrap();
    let cfg = SceneConfig::load(&path).unwrap();
    assert_eq!(cfg.seed, Some(3));
    let _ = std::fs::remove_dir_all(&dir);
}
