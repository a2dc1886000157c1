use super::*;

#[test]
fn upright_nozzle_sits_above_centre() {
    let n = nozzle_point(Rect::new(0.0, 0.0, 100.0, 200.0), 0.0, 0.42);
    assert!((n.point.x - 50.0).abs() < 1e-9);
    assert!((n.point.y - (100.0 - 84.0)).abs() < 1e-9);
    assert!((n.angle + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn rotated_nozzle_follows_direction() {
    let n = nozzle_point(Rect::new(0.0, 0.0, 100.0, 100.0), 90.0, 0.42);
    assert!((n.point.x - 92.0).abs() < 1e-9);
    assert!((n.point.y - 50.0).abs() < 1e-9);
    assert!(n.angle.abs() < 1e-9);
    assert!((n.dir.hypot() - 1.0).abs() < 1e-12);
}
