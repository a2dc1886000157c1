use std::f64::consts::TAU;

use crate::foundation::{
    core::Point,
    error::{FxError, FxResult},
    math::mul_div255_u8,
};

pub type PremulRgba8 = [u8; 4];

/// Shape removed from a surface by the erase ("destination-out") composite.
///
/// Coordinates are in the surface's CSS pixel space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EraseShape {
    Circle {
        center: Point,
        radius: f64,
    },
    /// Pie slice from `start_rad` sweeping `sweep_rad` clockwise in screen space.
    Wedge {
        center: Point,
        radius: f64,
        start_rad: f64,
        sweep_rad: f64,
    },
}

impl EraseShape {
    pub fn scaled(self, s: f64) -> Self {
        match self {
            Self::Circle { center, radius } => Self::Circle {
                center: Point::new(center.x * s, center.y * s),
                radius: radius * s,
            },
            Self::Wedge {
                center,
                radius,
                start_rad,
                sweep_rad,
            } => Self::Wedge {
                center: Point::new(center.x * s, center.y * s),
                radius: radius * s,
                start_rad,
                sweep_rad,
            },
        }
    }

    fn center_radius(&self) -> (Point, f64) {
        match *self {
            Self::Circle { center, radius } | Self::Wedge { center, radius, .. } => {
                (center, radius)
            }
        }
    }

    /// Fraction of the pixel centred at `(px, py)` covered by the shape.
    fn coverage(&self, px: f64, py: f64) -> f64 {
        let (center, radius) = self.center_radius();
        let dx = px - center.x;
        let dy = py - center.y;
        let d = (dx * dx + dy * dy).sqrt();
        let radial = (radius - d + 0.5).clamp(0.0, 1.0);
        match *self {
            Self::Circle { .. } => radial,
            Self::Wedge {
                start_rad,
                sweep_rad,
                ..
            } => {
                if sweep_rad >= TAU {
                    return radial;
                }
                let rel = (dy.atan2(dx) - start_rad).rem_euclid(TAU);
                if rel <= sweep_rad { radial } else { 0.0 }
            }
        }
    }
}

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Scale every channel by `1 - coverage`; full coverage leaves transparent black.
pub fn erase(dst: PremulRgba8, coverage: f64) -> PremulRgba8 {
    if coverage <= 0.0 {
        return dst;
    }
    if coverage >= 1.0 {
        return [0, 0, 0, 0];
    }
    let keep = ((1.0 - coverage) * 255.0).round().clamp(0.0, 255.0) as u16;
    dst.map(|c| mul_div255_u8(u16::from(c), keep))
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> FxResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FxError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Apply the erase composite for `shape` (device pixel coordinates).
pub fn erase_in_place(dst: &mut [u8], width: u32, height: u32, shape: &EraseShape) -> FxResult<()> {
    if dst.len() != width as usize * height as usize * 4 {
        return Err(FxError::render(
            "erase_in_place buffer does not match width/height",
        ));
    }
    let (center, radius) = shape.center_radius();
    if !(radius.is_finite() && center.x.is_finite() && center.y.is_finite()) || radius <= 0.0 {
        return Ok(());
    }

    let reach = radius + 1.0;
    let x0 = (center.x - reach).floor().max(0.0) as u32;
    let y0 = (center.y - reach).floor().max(0.0) as u32;
    let x1 = ((center.x + reach).ceil().max(0.0) as u32).min(width);
    let y1 = ((center.y + reach).ceil().max(0.0) as u32).min(height);

    for y in y0..y1 {
        let row = y as usize * width as usize;
        for x in x0..x1 {
            let cov = shape.coverage(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if cov <= 0.0 {
                continue;
            }
            let i = (row + x as usize) * 4;
            let out = erase([dst[i], dst[i + 1], dst[i + 2], dst[i + 3]], cov);
            dst[i..i + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Convert premultiplied RGBA8 to straight alpha (for PNG export).
pub fn unpremultiply_rgba8(src: &[u8]) -> Vec<u8> {
    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
