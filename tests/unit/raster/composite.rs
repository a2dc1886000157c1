use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn erase_full_coverage_clears_regardless_of_color() {
    assert_eq!(erase([255, 255, 255, 255], 1.0), [0, 0, 0, 0]);
    assert_eq!(erase([10, 20, 30, 40], 0.0), [10, 20, 30, 40]);
    let half = erase([200, 100, 50, 200], 0.5);
    assert!(half[3] > 90 && half[3] < 110);
}

#[test]
fn erase_circle_clears_center_and_keeps_far_pixels() {
    let (w, h) = (9u32, 9u32);
    let mut buf = [255u8, 0, 0, 255].repeat((w * h) as usize);
    let shape = EraseShape::Circle {
        center: Point::new(4.5, 4.5),
        radius: 2.0,
    };
    erase_in_place(&mut buf, w, h, &shape).unwrap();

    let px = |x: u32, y: u32| {
        let i = ((y * w + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    };
    assert_eq!(px(4, 4), [0, 0, 0, 0]);
    assert_eq!(px(0, 0), [255, 0, 0, 255]);
    assert_eq!(px(8, 4), [255, 0, 0, 255]);
}

#[test]
fn erase_is_order_independent() {
    let (w, h) = (12u32, 6u32);
    let base = [0u8, 128, 255, 255].repeat((w * h) as usize);
    let a = EraseShape::Circle {
        center: Point::new(3.0, 3.0),
        radius: 2.5,
    };
    let b = EraseShape::Circle {
        center: Point::new(8.0, 3.0),
        radius: 2.5,
    };

    let mut ab = base.clone();
    erase_in_place(&mut ab, w, h, &a).unwrap();
    erase_in_place(&mut ab, w, h, &b).unwrap();
    let mut ba = base;
    erase_in_place(&mut ba, w, h, &b).unwrap();
    erase_in_place(&mut ba, w, h, &a).unwrap();
    assert_eq!(ab, ba);
}

#[test]
fn wedge_only_erases_inside_its_sweep() {
    let (w, h) = (10u32, 10u32);
    let mut buf = [255u8; 4].repeat((w * h) as usize);
    // Quarter wedge pointing to +x/+y (screen right/down).
    let shape = EraseShape::Wedge {
        center: Point::new(5.0, 5.0),
        radius: 4.0,
        start_rad: 0.0,
        sweep_rad: std::f64::consts::FRAC_PI_2,
    };
    erase_in_place(&mut buf, w, h, &shape).unwrap();
    let alpha = |x: u32, y: u32| buf[((y * w + x) * 4 + 3) as usize];
    assert_eq!(alpha(6, 6), 0);
    assert_eq!(alpha(3, 3), 255);
    assert_eq!(alpha(3, 6), 255);
}

#[test]
fn erase_rejects_mismatched_buffer() {
    let mut buf = vec![0u8; 12];
    let shape = EraseShape::Circle {
        center: Point::ZERO,
        radius: 1.0,
    };
    assert!(erase_in_place(&mut buf, 2, 2, &shape).is_err());
}

#[test]
fn unpremultiply_restores_straight_color() {
    let out = unpremultiply_rgba8(&[64, 0, 32, 128, 9, 9, 9, 0]);
    assert_eq!(&out[..4], &[128, 0, 64, 128]);
    assert_eq!(&out[4..], &[0, 0, 0, 0]);
}
