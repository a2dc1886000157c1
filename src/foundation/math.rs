use rand::Rng;

use crate::foundation::core::Vec2;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

/// Screen-space unit vector a rotated element points along (0 deg is "up").
pub fn direction_from_rotation(rotation_deg: f64) -> Vec2 {
    let rad = deg_to_rad(rotation_deg);
    Vec2::new(rad.sin(), -rad.cos())
}

/// Uniform draw in `[min, max)`; a degenerate range returns `min`.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.random::<f64>() * (max - min)
}

/// Uniform draw centred on zero: `[-span/2, span/2)`.
pub(crate) fn centered<R: Rng + ?Sized>(rng: &mut R, span: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * span
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
