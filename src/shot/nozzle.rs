use crate::foundation::{
    core::{Point, Rect, Vec2},
    math::direction_from_rotation,
};

/// Where splashes leave the squirter and which way they fly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Nozzle {
    pub point: Point,
    /// Screen-space launch angle, radians (`atan2(dir.y, dir.x)`).
    pub angle: f64,
    pub dir: Vec2,
}

/// Nozzle of an element whose on-screen bounding box is `rect`: the box
/// centre pushed along the rotation direction by `frac` of the box height.
pub fn nozzle_point(rect: Rect, rotation_deg: f64, frac: f64) -> Nozzle {
    let dir = direction_from_rotation(rotation_deg);
    let reach = rect.height() * frac;
    Nozzle {
        point: rect.center() + dir * reach,
        angle: dir.y.atan2(dir.x),
        dir,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shot/nozzle.rs"]
mod tests;
