use super::*;
use crate::{assets::store::PreparedImage, foundation::core::Size, raster::cpu::CpuSurface};

fn palette() -> (SpriteStore, Vec<SpriteHandle>) {
    let mut store = SpriteStore::new(".");
    let handles = vec![
        store.insert_image("pink", PreparedImage::solid(4, 4, [200, 0, 100, 255])),
        store.insert_image("yellow", PreparedImage::solid(4, 4, [200, 200, 0, 255])),
        store.insert_image("blue", PreparedImage::solid(4, 4, [0, 0, 200, 255])),
    ];
    (store, handles)
}

fn viewport() -> Viewport {
    Viewport::new(400.0, 800.0, 1.0).unwrap()
}

fn build(seed: u64) -> CloudInvocation {
    let (_, handles) = palette();
    CloudChoreographer::with_seed(CloudConfig::default(), seed)
        .build(Some(Rect::new(150.0, 350.0, 250.0, 450.0)), viewport(), &handles)
        .unwrap()
}

#[test]
fn sources_cycle_by_index_mod_three() {
    let (_, handles) = palette();
    let cloud = build(1);
    let states = cloud.sample();
    assert_eq!(states.len(), 9);
    for s in &states {
        assert_eq!(s.source, handles[s.index % 3]);
    }
}

#[test]
fn sprites_start_hidden_on_the_origin_centre() {
    let cloud = build(2);
    for s in cloud.sample_at(0.0) {
        assert_eq!(s.opacity, 0.0);
        assert_eq!(s.scale, 0.16);
        let c = s.center();
        assert!((c.x - 200.0).abs() < 1e-9 && (c.y - 400.0).abs() < 1e-9);
    }
}

#[test]
fn sizes_and_cover_scales_stay_in_configured_ranges() {
    let cfg = CloudConfig::default();
    let cloud = build(3);
    // vmin 400: max(400 * 0.45, 100 * 1.55) = 180.
    for s in cloud.sample_at(0.0) {
        assert!(s.size >= 180.0 * 0.72 && s.size <= 180.0 * 1.42, "{}", s.size);
        assert!(s.rotation_deg.abs() <= 9.0);
    }
    let cover_end = cfg.cover.start_for(8) + cfg.cover.duration + 0.01;
    for (s, anchor) in cloud.sample_at(cover_end).iter().zip(&cfg.anchors) {
        assert!(cfg.cover_scale.contains(s.scale), "{}", s.scale);
        let c = s.center();
        assert!((c.x - 400.0 * anchor.x).abs() < 1e-6);
        assert!((c.y - 800.0 * anchor.y).abs() < 1e-6);
    }
}

#[test]
fn enter_overlaps_cover_and_opacity_follows_phases() {
    let cloud = build(4);
    let cfg = CloudConfig::default();
    // Last sprite is still entering when the first starts covering.
    assert!(cfg.enter.start_for(8) + cfg.enter.duration > cfg.cover.start_for(0));

    let after_enter = cloud.sample_at(0.139);
    assert!(after_enter[0].opacity > 0.5 && after_enter[0].opacity < 0.82);
    assert_eq!(after_enter[8].opacity, 0.0);
    let covering = cloud.sample_at(0.8);
    assert!(covering.iter().all(|s| (s.opacity - 0.84).abs() < 1e-9));
}

#[test]
fn every_sprite_fades_out_and_layer_is_torn_down() {
    let mut cloud = build(5);
    let end = cloud.duration();
    assert!((end - (0.84 + 8.0 * 0.012 + 0.3)).abs() < 1e-9);
    assert!(cloud.sample_at(end).iter().all(|s| s.opacity == 0.0));

    let mut removals = 0;
    for _ in 0..200 {
        if cloud.advance(1.0 / 60.0) {
            removals += 1;
        }
    }
    assert_eq!(removals, 1);
    assert!(cloud.is_torn_down());
    assert!(cloud.sample().is_empty());
}

#[test]
fn no_origin_uses_viewport_centre_and_fallback_width() {
    let (_, handles) = palette();
    let cloud = CloudChoreographer::with_seed(CloudConfig::default(), 6)
        .build(None, viewport(), &handles)
        .unwrap();
    for s in cloud.sample_at(0.0) {
        let c = s.center();
        assert!((c.x - 200.0).abs() < 1e-9 && (c.y - 400.0).abs() < 1e-9);
        assert!(s.size >= 180.0 * 0.72 - 1e-9);
    }
}

#[test]
fn build_rejects_empty_sources() {
    let err = CloudChoreographer::with_seed(CloudConfig::default(), 7)
        .build(None, viewport(), &[])
        .unwrap_err();
    assert!(matches!(err, FxError::Validation(_)));
}

#[test]
fn render_draws_visible_sprites() {
    let (store, handles) = palette();
    let mut cloud = CloudChoreographer::with_seed(CloudConfig::default(), 8)
        .build(None, viewport(), &handles)
        .unwrap();
    let mut surface = CpuSurface::new(Size::new(400.0, 800.0), 1.0).unwrap();
    cloud.render(&mut surface, &store).unwrap();
    assert!(surface.is_fully_transparent());

    cloud.advance(0.5);
    cloud.render(&mut surface, &store).unwrap();
    assert!(!surface.is_fully_transparent());
}
