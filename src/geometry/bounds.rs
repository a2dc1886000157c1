use crate::foundation::core::{Rect, Size};
use crate::foundation::math::deg_to_rad;

/// Below this `|cos^2 - sin^2|` the unrotate system is treated as singular (about 45 deg).
const SINGULAR_EPSILON: f64 = 0.001;

/// Recover the size of the axis-aligned box that, rotated by `rotation_deg`,
/// produced a bounding box of `bounds_w x bounds_h`.
///
/// Returns `None` near 45 deg (the system is singular there) or when the solution
/// is not a finite positive size; callers then fall back to the full box.
pub fn solve_unrotated_bounds(bounds_w: f64, bounds_h: f64, rotation_deg: f64) -> Option<Size> {
    // |r mod 180| folded into [0, 90]: r, r+180, 180-r and -r give the same magnitudes.
    let normalized = (rotation_deg % 180.0).abs();
    let theta = if normalized > 90.0 {
        180.0 - normalized
    } else {
        normalized
    };
    let rad = deg_to_rad(theta);
    let c = rad.cos();
    let s = rad.sin();
    let denom = c * c - s * s;

    if !denom.is_finite() || denom.abs() < SINGULAR_EPSILON {
        return None;
    }

    // bounds_w = w*c + h*s ; bounds_h = w*s + h*c
    let w = (bounds_w * c - bounds_h * s) / denom;
    let h = (bounds_h * c - bounds_w * s) / denom;
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some(Size::new(w, h))
}

/// Contain-fit an image of aspect `image_aspect` (width / height) inside a
/// `container_w x container_h` box, shrunk to the unrotated bounds when the
/// container holds a rotated element, and centred.
///
/// A non-finite or non-positive aspect is treated as "same as the target box".
pub fn get_draw_rect(
    container_w: f64,
    container_h: f64,
    image_aspect: f64,
    rotation_deg: f64,
) -> Rect {
    let mut target_w = container_w;
    let mut target_h = container_h;
    if let Some(solved) = solve_unrotated_bounds(container_w, container_h, rotation_deg) {
        target_w = container_w.min(solved.width);
        target_h = container_h.min(solved.height);
    }

    if target_w <= 0.0 || target_h <= 0.0 {
        return Rect::new(
            container_w * 0.5,
            container_h * 0.5,
            container_w * 0.5,
            container_h * 0.5,
        );
    }

    let target_aspect = target_w / target_h;
    let source_aspect = if image_aspect.is_finite() && image_aspect > 0.0 {
        image_aspect
    } else {
        target_aspect
    };

    let (draw_w, draw_h) = if source_aspect > target_aspect {
        (target_w, target_w / source_aspect)
    } else {
        (target_h * source_aspect, target_h)
    };

    let x = (container_w - draw_w) / 2.0;
    let y = (container_h - draw_h) / 2.0;
    Rect::new(x, y, x + draw_w, y + draw_h)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bounds.rs"]
mod tests;
