use super::*;
use rand::{SeedableRng, rngs::StdRng};

#[test]
fn spray_defaults_match_scene_constants() {
    let p = ParticleProfile::spray();
    assert_eq!(p.arc_spread, 0.6);
    assert_eq!(p.speed, RangeF64::new(12.0, 30.0));
    assert_eq!(p.decay, RangeF64::new(0.011, 0.018));
    assert_eq!(p.alpha_factor, 0.8);
    assert_eq!(p.flat_radius.radius(20.0), 10.0);
    assert_eq!(p.fallback_color, Rgba8Premul::from_hex("#E91E63").unwrap());
    assert_eq!(p.default_count, 80);
    p.validate().unwrap();
}

#[test]
fn burst_has_no_drift_and_full_alpha() {
    let p = ParticleProfile::burst();
    assert_eq!(p.drift, RangeF64::fixed(0.0));
    assert_eq!(p.alpha_factor, 1.0);
    assert_eq!(p.flat_radius.radius(5.0), 5.0);
    assert!(!p.use_sprites);
    assert_eq!(p.palette.len(), 6);
    p.validate().unwrap();
}

#[test]
fn range_samples_stay_inside_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    let r = RangeF64::new(0.08, 0.14);
    for _ in 0..1000 {
        assert!(r.contains(r.sample(&mut rng)));
    }
    assert_eq!(RangeF64::fixed(3.0).sample(&mut rng), 3.0);
}

#[test]
fn validate_rejects_inverted_ranges_and_non_decaying_particles() {
    let mut p = ParticleProfile::spray();
    p.speed = RangeF64::new(30.0, 12.0);
    assert!(p.validate().is_err());

    let mut p = ParticleProfile::spray();
    p.decay = RangeF64::fixed(0.0);
    assert!(p.validate().is_err());

    let mut p = ParticleProfile::burst();
    p.friction = f64::NAN;
    assert!(p.validate().is_err());
}

#[test]
fn profile_json_fills_missing_fields_from_spray_defaults() {
    let p: ParticleProfile = serde_json::from_str(r#"{"arc_spread": 1.2, "flat_radius": "size"}"#).unwrap();
    assert_eq!(p.arc_spread, 1.2);
    assert_eq!(p.flat_radius, FlatRadius::Size);
    assert_eq!(p.speed, ParticleProfile::spray().speed);
}
