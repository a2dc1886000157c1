use rand::Rng;

use crate::foundation::{
    core::Rgba8Premul,
    error::{FxError, FxResult},
    math,
};

/// Closed range for uniform per-particle draws.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RangeF64 {
    pub min: f64,
    pub max: f64,
}

impl RangeF64 {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn fixed(v: f64) -> Self {
        Self { min: v, max: v }
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        math::uniform(rng, self.min, self.max)
    }

    pub fn contains(self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    fn validate(self, name: &str) -> FxResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(FxError::validation(format!(
                "{name} range must be finite with min <= max (got {}..{})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Radius of the flat circle drawn for a particle of a given `size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlatRadius {
    #[default]
    HalfSize,
    Size,
}

impl FlatRadius {
    pub fn radius(self, size: f64) -> f64 {
        match self {
            Self::HalfSize => size * 0.5,
            Self::Size => size,
        }
    }
}

/// Per-kind spawn parameters. Every randomized field is drawn uniformly and
/// independently per particle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParticleProfile {
    /// Full width of the launch cone in radians, centred on the spawn angle.
    pub arc_spread: f64,
    pub speed: RangeF64,
    pub size: RangeF64,
    /// Initial alpha; overwritten from `life` on the first step.
    pub alpha: RangeF64,
    pub gravity: RangeF64,
    pub decay: RangeF64,
    pub drift: RangeF64,
    pub friction: f64,
    /// Factor applied to `drift` after each step.
    pub drift_decay: f64,
    pub stretch: RangeF64,
    /// `alpha = max(0, life * alpha_factor)`.
    pub alpha_factor: f64,
    pub flat_radius: FlatRadius,
    pub fallback_color: Rgba8Premul,
    /// Flat colours picked per particle when sprites are off. Empty means
    /// `fallback_color` only.
    pub palette: Vec<Rgba8Premul>,
    pub use_sprites: bool,
    pub default_count: usize,
}

impl Default for ParticleProfile {
    fn default() -> Self {
        Self::spray()
    }
}

impl ParticleProfile {
    /// Photographic dust spray.
    pub fn spray() -> Self {
        Self {
            arc_spread: 0.6,
            speed: RangeF64::new(12.0, 30.0),
            size: RangeF64::new(18.0, 42.0),
            alpha: RangeF64::new(0.72, 1.0),
            gravity: RangeF64::new(0.08, 0.14),
            decay: RangeF64::new(0.011, 0.018),
            drift: RangeF64::new(-0.01, 0.01),
            friction: 0.985,
            drift_decay: 0.985,
            stretch: RangeF64::fixed(1.0),
            alpha_factor: 0.8,
            flat_radius: FlatRadius::HalfSize,
            fallback_color: Rgba8Premul::from_straight_rgba(0xE9, 0x1E, 0x63, 0xFF),
            palette: Vec::new(),
            use_sprites: true,
            default_count: 80,
        }
    }

    /// Flat colour burst: full circle, no drift, circle radius equals size.
    pub fn burst() -> Self {
        let hex = |r, g, b| Rgba8Premul::from_straight_rgba(r, g, b, 0xFF);
        Self {
            arc_spread: std::f64::consts::TAU,
            speed: RangeF64::new(4.0, 12.0),
            size: RangeF64::new(3.0, 8.0),
            alpha: RangeF64::fixed(1.0),
            gravity: RangeF64::new(0.12, 0.2),
            decay: RangeF64::new(0.015, 0.03),
            drift: RangeF64::fixed(0.0),
            friction: 0.96,
            drift_decay: 1.0,
            stretch: RangeF64::fixed(1.0),
            alpha_factor: 1.0,
            flat_radius: FlatRadius::Size,
            fallback_color: hex(0xE9, 0x1E, 0x63),
            palette: vec![
                hex(0xE9, 0x1E, 0x63),
                hex(0xFF, 0xC1, 0x07),
                hex(0x21, 0x96, 0xF3),
                hex(0x4C, 0xAF, 0x50),
                hex(0x9C, 0x27, 0xB0),
                hex(0xFF, 0x57, 0x22),
            ],
            use_sprites: false,
            default_count: 60,
        }
    }

    pub fn validate(&self) -> FxResult<()> {
        if !self.arc_spread.is_finite() || self.arc_spread < 0.0 {
            return Err(FxError::validation("arc_spread must be finite and >= 0"));
        }
        self.speed.validate("speed")?;
        self.size.validate("size")?;
        self.alpha.validate("alpha")?;
        self.gravity.validate("gravity")?;
        self.decay.validate("decay")?;
        self.drift.validate("drift")?;
        self.stretch.validate("stretch")?;
        if self.decay.min <= 0.0 {
            return Err(FxError::validation("decay must be > 0 so particles expire"));
        }
        if self.size.min < 0.0 {
            return Err(FxError::validation("size must be >= 0"));
        }
        for (name, v) in [
            ("friction", self.friction),
            ("drift_decay", self.drift_decay),
            ("alpha_factor", self.alpha_factor),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FxError::validation(format!("{name} must be finite and >= 0")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/profile.rs"]
mod tests;
