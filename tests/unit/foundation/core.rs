use super::*;

#[test]
fn viewport_rejects_bad_dpr() {
    assert!(Viewport::new(100.0, 50.0, 0.0).is_err());
    assert!(Viewport::new(f64::NAN, 50.0, 1.0).is_err());
    assert!(Viewport::new(100.0, 50.0, 2.0).is_ok());
}

#[test]
fn device_size_scales_and_rounds() {
    let vp = Viewport::new(375.0, 667.0, 3.0).unwrap();
    assert_eq!(vp.device_size(), (1125, 2001));
    assert_eq!(device_size(Size::new(10.2, 10.6), 1.0), (10, 11));
}

#[test]
fn anchor_maps_fractions_to_css_pixels() {
    let vp = Viewport::new(200.0, 100.0, 1.0).unwrap();
    assert_eq!(vp.anchor(0.5, 0.25), Point::new(100.0, 25.0));
    assert_eq!(vp.center(), Point::new(100.0, 50.0));
    assert_eq!(vp.min_side(), 100.0);
}

#[test]
fn hex_colors_parse_and_premultiply() {
    let pink = Rgba8Premul::from_hex("#E91E63").unwrap();
    assert_eq!(pink.to_array(), [0xE9, 0x1E, 0x63, 255]);

    let half = Rgba8Premul::from_hex("#FF000080").unwrap();
    assert_eq!(half.a, 0x80);
    assert_eq!(half.r, ((255u16 * 128 + 127) / 255) as u8);

    assert!(Rgba8Premul::from_hex("#12").is_err());
    assert!(Rgba8Premul::from_hex("#GG0000").is_err());
}

#[test]
fn transform_identity_keeps_points() {
    let t = Transform2D::default();
    let p = t.to_affine(Point::new(5.0, 5.0)) * Point::new(1.0, 2.0);
    assert!((p.x - 1.0).abs() < 1e-12);
    assert!((p.y - 2.0).abs() < 1e-12);
}

#[test]
fn transform_scales_around_center() {
    let t = Transform2D::default().uniform_scale(2.0);
    let p = t.to_affine(Point::new(10.0, 10.0)) * Point::new(12.0, 10.0);
    assert!((p.x - 14.0).abs() < 1e-12);
    assert!((p.y - 10.0).abs() < 1e-12);
}
