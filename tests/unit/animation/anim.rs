use super::*;

fn linear(start: f64, duration: f64, from: f64, to: f64) -> Tween<f64> {
    Tween {
        start,
        duration,
        from,
        to,
        ease: Ease::Linear,
        repeat: 0,
        yoyo: false,
    }
}

#[test]
fn tween_interpolates_and_clamps() {
    let tw = linear(1.0, 2.0, 0.0, 10.0);
    assert_eq!(tw.sample(0.0), 0.0);
    assert_eq!(tw.sample(2.0), 5.0);
    assert_eq!(tw.sample(3.0), 10.0);
    assert_eq!(tw.sample(9.0), 10.0);
    assert_eq!(tw.end(), 3.0);
}

#[test]
fn yoyo_repeat_returns_to_start() {
    let tw = Tween {
        repeat: 1,
        yoyo: true,
        ..linear(0.0, 1.0, 0.0, 4.0)
    };
    assert_eq!(tw.end(), 2.0);
    assert_eq!(tw.sample(0.5), 2.0);
    assert_eq!(tw.sample(1.5), 2.0);
    assert_eq!(tw.sample(1.75), 1.0);
    assert_eq!(tw.sample(2.5), 0.0);
}

#[test]
fn zero_duration_tween_snaps_once_started() {
    let tw = linear(0.5, 0.0, 1.0, 3.0);
    assert_eq!(tw.sample(0.4), 1.0);
    assert_eq!(tw.sample(0.5), 3.0);
}

#[test]
fn negative_duration_is_rejected() {
    let mut track = PropertyTrack::new(0.0);
    assert!(track.push(linear(0.0, -1.0, 0.0, 1.0)).is_err());
}

#[test]
fn track_to_captures_value_at_start() {
    let mut track = PropertyTrack::new(0.0);
    track.to(0.0, 1.0, 10.0, Ease::Linear).unwrap();
    track.to(0.5, 1.0, 0.0, Ease::Linear).unwrap();

    // Second tween started at 0.5 from the first tween's value there (5.0).
    assert_eq!(track.tweens[1].from, 5.0);
    assert_eq!(track.sample(0.25), 2.5);
    assert_eq!(track.sample(1.0), 2.5);
    assert_eq!(track.sample(1.5), 0.0);
    assert_eq!(track.end(), 1.5);
}

#[test]
fn sequential_tweens_chain_values() {
    let mut track = PropertyTrack::new(Vec2::ZERO);
    track
        .to(0.0, 1.0, Vec2::new(10.0, 0.0), Ease::Linear)
        .unwrap();
    track
        .to(1.0, 1.0, Vec2::new(10.0, 10.0), Ease::Linear)
        .unwrap();
    assert_eq!(track.sample(1.5), Vec2::new(10.0, 5.0));
    assert_eq!(track.sample(5.0), Vec2::new(10.0, 10.0));
}

#[test]
fn transform_lerp_blends_every_field() {
    let a = Transform2D::default();
    let b = Transform2D {
        translate: Vec2::new(10.0, -10.0),
        rotation_deg: 90.0,
        scale: Vec2::new(3.0, 1.0),
    };
    let mid = Transform2D::lerp(&a, &b, 0.5);
    assert_eq!(mid.translate, Vec2::new(5.0, -5.0));
    assert_eq!(mid.rotation_deg, 45.0);
    assert_eq!(mid.scale, Vec2::new(2.0, 1.0));
}
