use crate::foundation::{
    core::{Point, Rect, Vec2, Viewport},
    error::{FxError, FxResult},
};

/// Transient splash image fired from the nozzle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SplashSpec {
    /// Sprite path; an empty source spawns nothing.
    pub source: String,
    /// Edge length in CSS px.
    pub size: f64,
    /// Distance travelled along the launch angle.
    pub travel: f64,
    pub scale_from: f64,
    pub scale_to: f64,
    pub opacity: f64,
    pub fade_in: f64,
    pub hold: f64,
    pub fade_out: f64,
    /// Full span of the random rotation, degrees.
    pub rotate_jitter_deg: f64,
}

impl Default for SplashSpec {
    fn default() -> Self {
        Self {
            source: String::new(),
            size: 340.0,
            travel: 70.0,
            scale_from: 0.2,
            scale_to: 0.94,
            opacity: 0.92,
            fade_in: 0.08,
            hold: 0.06,
            fade_out: 0.24,
            rotate_jitter_deg: 14.0,
        }
    }
}

impl SplashSpec {
    fn with(source: &str, size: f64, travel: f64, scale_to: f64, opacity: f64) -> Self {
        Self {
            source: source.to_owned(),
            size,
            travel,
            scale_to,
            opacity,
            ..Self::default()
        }
    }

    /// The smaller companion splash: less size, travel and opacity, quicker fades.
    pub fn secondary(&self) -> Self {
        Self {
            source: self.source.clone(),
            size: self.size * 0.68,
            travel: self.travel * 0.85,
            scale_from: self.scale_from,
            scale_to: self.scale_to * 0.82,
            opacity: (self.opacity * 0.8).min(1.0),
            fade_in: 0.06,
            hold: 0.04,
            fade_out: 0.2,
            rotate_jitter_deg: 20.0,
        }
    }

    pub fn total_duration(&self) -> f64 {
        self.fade_in + self.hold + self.fade_out
    }
}

/// One configured recoil/thrust cycle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shot {
    /// Rest position as viewport fractions.
    pub anchor: Point,
    pub rotation_deg: f64,
    pub scale: f64,
    pub recoil: f64,
    pub thrust: f64,
    pub splash: SplashSpec,
}

impl Shot {
    /// Resolve against the overlay's source rect: the rest offset moves the
    /// source centre onto the anchor.
    pub fn aim(&self, source_rect: Rect, viewport: Viewport, overlay_scale: f64) -> AimedShot {
        let target = viewport.anchor(self.anchor.x, self.anchor.y);
        AimedShot {
            offset: target - source_rect.center(),
            rotation_deg: self.rotation_deg,
            base_scale: self.scale * overlay_scale,
            recoil: self.recoil,
            thrust: self.thrust,
            splash: self.splash.clone(),
        }
    }
}

/// A shot in overlay space: translation from the rest layout position.
#[derive(Clone, Debug, PartialEq)]
pub struct AimedShot {
    pub offset: Vec2,
    pub rotation_deg: f64,
    pub base_scale: f64,
    pub recoil: f64,
    pub thrust: f64,
    pub splash: SplashSpec,
}

/// Phase durations and squash factors shared by every shot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShotTiming {
    pub recoil: f64,
    pub thrust: f64,
    pub settle: f64,
    pub pause: f64,
    /// (x, y) scale multipliers during recoil.
    pub recoil_squash: Vec2,
    /// (x, y) scale multipliers during thrust.
    pub thrust_stretch: Vec2,
    pub first_fly: f64,
    pub fly: f64,
    pub suspension_fly: f64,
    pub end_pause: f64,
    pub return_to_rest: f64,
    /// Angle offset of the companion splash, radians.
    pub secondary_angle: f64,
    /// Nozzle distance from the centre as a fraction of the box height.
    pub nozzle_frac: f64,
}

impl Default for ShotTiming {
    fn default() -> Self {
        Self {
            recoil: 0.15,
            thrust: 0.14,
            settle: 0.17,
            pause: 0.06,
            recoil_squash: Vec2::new(1.08, 0.86),
            thrust_stretch: Vec2::new(0.96, 1.08),
            first_fly: 0.26,
            fly: 0.22,
            suspension_fly: 0.12,
            end_pause: 0.12,
            return_to_rest: 0.34,
            secondary_angle: -0.24,
            nozzle_frac: 0.42,
        }
    }
}

/// The full squirter sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShotPlan {
    pub shots: Vec<Shot>,
    pub overlay_scale: f64,
    pub timing: ShotTiming,
    /// Clip played with each shot's splash.
    pub splash_sound: String,
    /// Particles sprayed from the nozzle with each splash; 0 disables.
    pub spray_count: usize,
}

impl Default for ShotPlan {
    fn default() -> Self {
        Self {
            shots: vec![
                Shot {
                    anchor: Point::new(0.15, 0.68),
                    rotation_deg: 52.0,
                    scale: 1.34,
                    recoil: 13.0,
                    thrust: 22.0,
                    splash: SplashSpec::with("assets/pink dust.png", 280.0, 72.0, 0.65, 0.92),
                },
                Shot {
                    anchor: Point::new(0.5, 0.91),
                    rotation_deg: 0.0,
                    scale: 1.38,
                    recoil: 15.0,
                    thrust: 24.0,
                    splash: SplashSpec::with("assets/yellow dust.png", 280.0, 76.0, 0.65, 0.94),
                },
                Shot {
                    anchor: Point::new(0.85, 0.67),
                    rotation_deg: -72.0,
                    scale: 1.34,
                    recoil: 13.0,
                    thrust: 21.0,
                    splash: SplashSpec::with("assets/blue dust.png", 290.0, 225.0, 0.65, 0.9),
                },
            ],
            overlay_scale: 0.8,
            timing: ShotTiming::default(),
            splash_sound: "assets/powder air.mp3".to_owned(),
            spray_count: 0,
        }
    }
}

impl ShotPlan {
    pub fn validate(&self) -> FxResult<()> {
        if self.shots.is_empty() {
            return Err(FxError::validation("shot plan must contain at least one shot"));
        }
        let t = &self.timing;
        for (name, v) in [
            ("recoil", t.recoil),
            ("thrust", t.thrust),
            ("settle", t.settle),
            ("pause", t.pause),
            ("first_fly", t.first_fly),
            ("fly", t.fly),
            ("suspension_fly", t.suspension_fly),
            ("end_pause", t.end_pause),
            ("return_to_rest", t.return_to_rest),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FxError::validation(format!(
                    "shot timing '{name}' must be finite and >= 0"
                )));
            }
        }
        for (i, shot) in self.shots.iter().enumerate() {
            let s = &shot.splash;
            let fades = [s.fade_in, s.hold, s.fade_out];
            if fades.iter().any(|v| !v.is_finite() || *v < 0.0) || s.size < 0.0 {
                return Err(FxError::validation(format!(
                    "shot {i} splash timings and size must be >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shot/plan.rs"]
mod tests;
