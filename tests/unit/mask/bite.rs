use super::*;

#[test]
fn default_plan_has_five_ordered_bites() {
    let plan = BitePlan::default();
    assert_eq!(plan.bites.len(), 5);
    assert_eq!(plan.start_delay, 0.36);
    assert!(plan.bites[..4].iter().all(|b| !b.is_whole()));
    assert!(plan.bites[4].is_whole());
    assert!((plan.total_duration() - 3.14).abs() < 1e-9);
    plan.validate().unwrap();
}

#[test]
fn centre_and_width_fraction_resolve_inside_draw_rect() {
    let rect = Rect::new(10.0, 20.0, 210.0, 120.0);
    let b = &BitePlan::default().bites[0];
    assert_eq!(b.center_in(rect), Point::new(10.0 + 200.0 * 0.85, 20.0 + 100.0 * 0.5));
    assert!((b.max_radius_in(rect) - 16.0).abs() < 1e-9);
}

#[test]
fn whole_bite_reaches_every_corner() {
    let rect = Rect::new(0.0, 0.0, 300.0, 200.0);
    let whole = &BitePlan::default().bites[4];
    let c = whole.center_in(rect);
    let r = whole.max_radius_in(rect);
    let half_diag = (300.0f64.powi(2) + 200.0f64.powi(2)).sqrt() / 2.0;
    assert!(r >= half_diag + 4.0);
    for corner in [
        Point::new(0.0, 0.0),
        Point::new(300.0, 0.0),
        Point::new(0.0, 200.0),
        Point::new(300.0, 200.0),
    ] {
        assert!(corner.distance(c) + 4.0 <= r + 1e-9);
    }
}

#[test]
fn validate_rejects_empty_or_bad_timing() {
    let mut plan = BitePlan::default();
    plan.bites.clear();
    assert!(plan.validate().is_err());

    let mut plan = BitePlan::default();
    plan.bites[2].duration = 0.0;
    assert!(plan.validate().is_err());

    let mut plan = BitePlan::default();
    plan.bites[1].radius = BiteRadius::WidthFrac(-0.1);
    assert!(plan.validate().is_err());
}

#[test]
fn plan_json_uses_snake_case_tags() {
    let json = serde_json::to_value(BitePlan::default()).unwrap();
    assert_eq!(json["bites"][4]["radius"]["whole"]["margin"], 4.0);
    assert_eq!(json["erosion"], "circle_mask");
}
