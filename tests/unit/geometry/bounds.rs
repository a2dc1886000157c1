use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn zero_rotation_is_identity() {
    let s = solve_unrotated_bounds(320.0, 180.0, 0.0).unwrap();
    assert_eq!(s.width, 320.0);
    assert_eq!(s.height, 180.0);
}

#[test]
fn forty_five_degrees_is_singular() {
    for (w, h) in [(1.0, 1.0), (320.0, 180.0), (10.0, 900.0)] {
        assert!(solve_unrotated_bounds(w, h, 45.0).is_none());
        assert!(solve_unrotated_bounds(w, h, 135.0).is_none());
        assert!(solve_unrotated_bounds(w, h, -45.0).is_none());
    }
}

#[test]
fn symmetric_rotations_agree() {
    for theta in [5.0, 12.5, 30.0, 33.0, 60.0, 80.0] {
        let a = solve_unrotated_bounds(300.0, 200.0, theta);
        let b = solve_unrotated_bounds(300.0, 200.0, 180.0 - theta);
        let c = solve_unrotated_bounds(300.0, 200.0, theta + 180.0);
        assert_eq!(a.is_some(), b.is_some(), "theta={theta}");
        assert_eq!(a.is_some(), c.is_some(), "theta={theta}");
        if let (Some(a), Some(b), Some(c)) = (a, b, c) {
            assert!(close(a.width, b.width) && close(a.height, b.height));
            assert!(close(a.width, c.width) && close(a.height, c.height));
        }
    }
}

#[test]
fn solution_rotates_back_into_the_bounds() {
    let (w, h) = (200.0, 120.0);
    let theta: f64 = 20.0;
    let rect = Size::new(w, h);
    let rad = theta.to_radians();
    let bounds_w = w * rad.cos() + h * rad.sin();
    let bounds_h = w * rad.sin() + h * rad.cos();

    let solved = solve_unrotated_bounds(bounds_w, bounds_h, theta).unwrap();
    assert!(close(solved.width, rect.width));
    assert!(close(solved.height, rect.height));
}

#[test]
fn impossible_solution_is_none() {
    // A long thin box rotated 40 deg cannot come from a positive-size rectangle.
    assert!(solve_unrotated_bounds(1000.0, 10.0, 40.0).is_none());
}

#[test]
fn draw_rect_is_contained_and_keeps_aspect() {
    let cases = [
        (300.0, 200.0, 16.0 / 9.0, 0.0),
        (300.0, 200.0, 0.5, 0.0),
        (120.0, 240.0, 1.0, 33.0),
        (500.0, 500.0, 2.0, 45.0),
        (80.0, 60.0, 4.0 / 3.0, -12.0),
        (80.0, 60.0, 3.0, 170.0),
    ];
    for (cw, ch, aspect, rot) in cases {
        let r = get_draw_rect(cw, ch, aspect, rot);
        assert!(r.x0 >= -1e-9 && r.y0 >= -1e-9, "{r:?}");
        assert!(r.x1 <= cw + 1e-9 && r.y1 <= ch + 1e-9, "{r:?}");
        assert!(close(r.width() / r.height(), aspect), "{r:?} aspect={aspect}");
        assert!(close((r.x0 + r.x1) / 2.0, cw / 2.0));
        assert!(close((r.y0 + r.y1) / 2.0, ch / 2.0));
    }
}

#[test]
fn draw_rect_fills_one_axis_when_unrotated() {
    let r = get_draw_rect(300.0, 200.0, 3.0, 0.0);
    assert_eq!(r.width(), 300.0);
    assert_eq!(r.height(), 100.0);
    assert_eq!(r.y0, 50.0);
}

#[test]
fn draw_rect_is_pure() {
    let a = get_draw_rect(123.0, 77.0, 1.7, 21.0);
    let b = get_draw_rect(123.0, 77.0, 1.7, 21.0);
    assert_eq!(a, b);
}

#[test]
fn unknown_aspect_uses_target_box() {
    let r = get_draw_rect(300.0, 200.0, 0.0, 0.0);
    assert_eq!(r, Rect::new(0.0, 0.0, 300.0, 200.0));
}
