use rand::SeedableRng;

use super::*;

#[test]
fn direction_points_up_at_zero_and_right_at_ninety() {
    let up = direction_from_rotation(0.0);
    assert!(up.x.abs() < 1e-12);
    assert!((up.y + 1.0).abs() < 1e-12);

    let right = direction_from_rotation(90.0);
    assert!((right.x - 1.0).abs() < 1e-12);
    assert!(right.y.abs() < 1e-12);
}

#[test]
fn uniform_stays_in_range() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let v = uniform(&mut rng, 0.011, 0.018);
        assert!((0.011..0.018).contains(&v));
        let c = centered(&mut rng, 0.6);
        assert!((-0.3..0.3).contains(&c));
    }
    assert_eq!(uniform(&mut rng, 1.0, 1.0), 1.0);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}
