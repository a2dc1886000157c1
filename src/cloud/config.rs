use crate::{
    foundation::{
        core::Point,
        error::{FxError, FxResult},
    },
    particles::profile::RangeF64,
};

/// Start offset, per-index stagger and duration of one staggered phase.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaggeredPhase {
    pub at: f64,
    pub stagger: f64,
    pub duration: f64,
}

impl StaggeredPhase {
    pub const fn new(at: f64, stagger: f64, duration: f64) -> Self {
        Self {
            at,
            stagger,
            duration,
        }
    }

    pub fn start_for(self, index: usize) -> f64 {
        self.at + index as f64 * self.stagger
    }

    fn validate(self, name: &str) -> FxResult<()> {
        let ok = [self.at, self.stagger, self.duration]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0);
        if !ok {
            return Err(FxError::validation(format!(
                "{name} phase timings must be finite and >= 0"
            )));
        }
        Ok(())
    }
}

/// Tuning for the dust-cloud cover.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Coverage anchors as viewport fractions; one sprite each.
    pub anchors: Vec<Point>,
    /// Sprite palette, cycled by index.
    pub sources: Vec<String>,
    /// `base = max(vmin * base_vmin_frac, origin_width * origin_width_factor)`.
    pub base_vmin_frac: f64,
    pub origin_width_factor: f64,
    /// Origin width used when there is no origin element.
    pub fallback_origin_vmin_frac: f64,
    pub size_jitter: RangeF64,
    pub cover_scale: RangeF64,
    /// Full span of the random initial rotation, degrees.
    pub rotation_jitter_deg: f64,
    pub start_scale: f64,
    pub enter: StaggeredPhase,
    pub enter_opacity: f64,
    pub enter_scale: f64,
    pub cover: StaggeredPhase,
    pub cover_opacity: f64,
    pub hold: f64,
    pub fade: StaggeredPhase,
}

impl Default for CloudConfig {
    fn default() -> Self {
        let p = Point::new;
        Self {
            anchors: vec![
                p(0.08, 0.1),
                p(0.5, 0.04),
                p(0.92, 0.12),
                p(0.04, 0.46),
                p(0.95, 0.45),
                p(0.08, 0.86),
                p(0.48, 0.94),
                p(0.92, 0.88),
                p(0.5, 0.5),
            ],
            sources: vec![
                "assets/pinkdust.png".to_owned(),
                "assets/yellow dust.png".to_owned(),
                "assets/blue dust.png".to_owned(),
            ],
            base_vmin_frac: 0.45,
            origin_width_factor: 1.55,
            fallback_origin_vmin_frac: 0.25,
            size_jitter: RangeF64::new(0.72, 1.42),
            cover_scale: RangeF64::new(1.92, 2.64),
            rotation_jitter_deg: 18.0,
            start_scale: 0.16,
            enter: StaggeredPhase::new(0.0, 0.026, 0.18),
            enter_opacity: 0.82,
            enter_scale: 0.94,
            cover: StaggeredPhase::new(0.14, 0.01, 0.56),
            cover_opacity: 0.84,
            hold: 0.14,
            fade: StaggeredPhase::new(0.84, 0.012, 0.3),
        }
    }
}

impl CloudConfig {
    pub fn validate(&self) -> FxResult<()> {
        if self.anchors.is_empty() {
            return Err(FxError::validation("cloud needs at least one anchor"));
        }
        if self.sources.is_empty() {
            return Err(FxError::validation("cloud needs at least one sprite source"));
        }
        for (name, r) in [("size_jitter", self.size_jitter), ("cover_scale", self.cover_scale)] {
            if !(r.min.is_finite() && r.max.is_finite()) || r.min > r.max || r.min < 0.0 {
                return Err(FxError::validation(format!(
                    "{name} must be a finite non-negative range with min <= max"
                )));
            }
        }
        self.enter.validate("enter")?;
        self.cover.validate("cover")?;
        self.fade.validate("fade")?;
        if !self.hold.is_finite() || self.hold < 0.0 {
            return Err(FxError::validation("hold must be finite and >= 0"));
        }
        Ok(())
    }
}
