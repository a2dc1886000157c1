use crate::foundation::{
    core::{Point, Rect},
    error::{FxError, FxResult},
};

/// Maximum radius of one bite.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiteRadius {
    /// Fraction of the draw-rect width.
    WidthFrac(f64),
    /// Large enough to reach every draw-rect corner, plus `margin`.
    Whole { margin: f64 },
}

/// One step of the eating sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BiteSpec {
    /// Centre as fractions of the draw rect (0..1 on both axes).
    pub center_frac: Point,
    pub radius: BiteRadius,
    /// Horizontal shake offset in CSS px.
    pub shake_x: f64,
    /// Radius growth time in seconds.
    pub duration: f64,
    /// Wait after `duration` before the next bite.
    pub pause_after: f64,
}

impl BiteSpec {
    pub fn new(
        fx: f64,
        fy: f64,
        radius: BiteRadius,
        shake_x: f64,
        duration: f64,
        pause_after: f64,
    ) -> Self {
        Self {
            center_frac: Point::new(fx, fy),
            radius,
            shake_x,
            duration,
            pause_after,
        }
    }

    pub fn center_in(&self, draw_rect: Rect) -> Point {
        Point::new(
            draw_rect.x0 + draw_rect.width() * self.center_frac.x,
            draw_rect.y0 + draw_rect.height() * self.center_frac.y,
        )
    }

    pub fn max_radius_in(&self, draw_rect: Rect) -> f64 {
        match self.radius {
            BiteRadius::WidthFrac(f) => draw_rect.width() * f,
            BiteRadius::Whole { margin } => {
                let c = self.center_in(draw_rect);
                let corners = [
                    Point::new(draw_rect.x0, draw_rect.y0),
                    Point::new(draw_rect.x1, draw_rect.y0),
                    Point::new(draw_rect.x0, draw_rect.y1),
                    Point::new(draw_rect.x1, draw_rect.y1),
                ];
                let farthest = corners.iter().map(|p| p.distance(c)).fold(0.0, f64::max);
                // Never smaller than the half-diagonal rule.
                farthest.max(draw_rect.size().to_vec2().hypot() * 0.5) + margin
            }
        }
    }

    pub fn is_whole(&self) -> bool {
        matches!(self.radius, BiteRadius::Whole { .. })
    }
}

/// How bites remove pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErosionStyle {
    /// Full circles erased with destination-out.
    #[default]
    CircleMask,
    /// Pie slices opening away from the image centre. Whole bites still
    /// erase a full circle.
    Wedge { sweep_rad: f64 },
}

/// Timing and shape of one eating interaction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BitePlan {
    /// Intact pause before the first bite.
    pub start_delay: f64,
    pub bites: Vec<BiteSpec>,
    pub shake_duration: f64,
    pub shake_y: f64,
    pub shake_scale: f64,
    /// Shake scale used by the final bite.
    pub last_shake_scale: f64,
    pub erosion: ErosionStyle,
    /// Clip played at each bite start and stopped after its duration.
    pub sound: String,
}

impl Default for BitePlan {
    fn default() -> Self {
        Self {
            start_delay: 0.36,
            bites: vec![
                BiteSpec::new(0.85, 0.5, BiteRadius::WidthFrac(0.08), 3.0, 0.30, 0.22),
                BiteSpec::new(0.72, 0.35, BiteRadius::WidthFrac(0.10), -2.0, 0.30, 0.22),
                BiteSpec::new(0.58, 0.25, BiteRadius::WidthFrac(0.12), 2.0, 0.30, 0.22),
                BiteSpec::new(0.40, 0.30, BiteRadius::WidthFrac(0.11), -3.0, 0.30, 0.22),
                BiteSpec::new(0.4, 0.5, BiteRadius::Whole { margin: 4.0 }, 2.0, 0.40, 0.30),
            ],
            shake_duration: 0.09,
            shake_y: -2.0,
            shake_scale: 1.04,
            last_shake_scale: 1.02,
            erosion: ErosionStyle::CircleMask,
            sound: "assets/nom nom.mp3".to_owned(),
        }
    }
}

impl BitePlan {
    pub fn validate(&self) -> FxResult<()> {
        if self.bites.is_empty() {
            return Err(FxError::validation("bite plan must contain at least one bite"));
        }
        for (name, v) in [
            ("start_delay", self.start_delay),
            ("shake_duration", self.shake_duration),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FxError::validation(format!("{name} must be finite and >= 0")));
            }
        }
        for (i, b) in self.bites.iter().enumerate() {
            if !(b.duration.is_finite() && b.duration > 0.0) {
                return Err(FxError::validation(format!("bite {i} duration must be > 0")));
            }
            if !b.pause_after.is_finite() || b.pause_after < 0.0 {
                return Err(FxError::validation(format!("bite {i} pause_after must be >= 0")));
            }
            if let BiteRadius::WidthFrac(f) = b.radius
                && (!f.is_finite() || f < 0.0)
            {
                return Err(FxError::validation(format!("bite {i} radius fraction must be >= 0")));
            }
        }
        Ok(())
    }

    /// Seconds from start until the last bite's pause has elapsed.
    pub fn total_duration(&self) -> f64 {
        self.start_delay
            + self
                .bites
                .iter()
                .map(|b| b.duration + b.pause_after)
                .sum::<f64>()
    }
}

/// A growing erase region in surface CSS px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bite {
    pub center: Point,
    pub radius: f64,
    /// Erase a full circle even under [`ErosionStyle::Wedge`].
    pub whole: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/mask/bite.rs"]
mod tests;
