use rand::{SeedableRng, rngs::StdRng};

use crate::{
    animation::{
        anim::PropertyTrack,
        ease::Ease,
        timeline::{Position, Timeline},
    },
    assets::store::SpriteStore,
    foundation::{
        core::{Point, Rect, Vec2},
        error::FxResult,
        math,
    },
    raster::surface::RasterSurface,
    shot::plan::SplashSpec,
};

/// Receives splash spawns fired by a shot.
pub trait SplashSpawner {
    fn spawn_splash(&mut self, origin: Point, angle_rad: f64, spec: &SplashSpec);
}

/// Snapshot of one live splash.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SplashState {
    pub source: String,
    /// Centre of the splash image.
    pub center: Point,
    pub size: f64,
    pub scale: f64,
    pub opacity: f64,
    pub rotation_deg: f64,
}

#[derive(Clone, Debug)]
struct Splash {
    source: String,
    origin: Point,
    size: f64,
    rotation_deg: f64,
    offset: PropertyTrack<Vec2>,
    scale: PropertyTrack<f64>,
    opacity: PropertyTrack<f64>,
    timeline: Timeline<()>,
}

impl Splash {
    fn new(origin: Point, angle_rad: f64, spec: &SplashSpec, rotation_deg: f64) -> FxResult<Self> {
        let travel = Vec2::new(angle_rad.cos(), angle_rad.sin()) * spec.travel;
        let mut splash = Self {
            source: spec.source.clone(),
            origin,
            size: spec.size,
            rotation_deg,
            offset: PropertyTrack::new(Vec2::ZERO),
            scale: PropertyTrack::new(spec.scale_from),
            opacity: PropertyTrack::new(0.0),
            timeline: Timeline::new(),
        };

        let t = splash.timeline.place(Position::At(0.0), spec.fade_in)?;
        splash.opacity.to(t, spec.fade_in, spec.opacity, Ease::OutCubic)?;
        splash.scale.to(t, spec.fade_in, spec.scale_to, Ease::OutCubic)?;

        let total = spec.total_duration();
        let t = splash.timeline.place(Position::At(0.0), total)?;
        splash.offset.to(t, total, travel, Ease::OutCubic)?;

        let t = splash
            .timeline
            .place(Position::At(spec.fade_in + spec.hold), spec.fade_out)?;
        splash.opacity.to(t, spec.fade_out, 0.0, Ease::InCubic)?;
        splash
            .scale
            .to(t, spec.fade_out, spec.scale_to * 1.06, Ease::InCubic)?;
        Ok(splash)
    }

    fn state(&self) -> SplashState {
        let t = self.timeline.time();
        SplashState {
            source: self.source.clone(),
            center: self.origin + self.offset.sample(t),
            size: self.size,
            scale: self.scale.sample(t),
            opacity: self.opacity.sample(t).clamp(0.0, 1.0),
            rotation_deg: self.rotation_deg,
        }
    }
}

/// Owns every live splash; each removes itself when its fade-out ends.
#[derive(Debug)]
pub struct SplashLayer {
    splashes: Vec<Splash>,
    rng: StdRng,
    spawned: usize,
}

impl Default for SplashLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashLayer {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            splashes: Vec::new(),
            rng,
            spawned: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.splashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splashes.is_empty()
    }

    /// Splashes spawned since construction.
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    /// Advance every splash and drop the finished ones; returns how many were removed.
    pub fn advance(&mut self, dt: f64) -> usize {
        let before = self.splashes.len();
        self.splashes.retain_mut(|s| {
            s.timeline.advance(dt);
            !s.timeline.is_finished()
        });
        before - self.splashes.len()
    }

    pub fn sample(&self) -> Vec<SplashState> {
        self.splashes.iter().map(Splash::state).collect()
    }

    /// Draw splashes whose sprite is decoded in `store`.
    pub fn render<S: RasterSurface>(&self, surface: &mut S, store: &SpriteStore) -> FxResult<()> {
        for state in self.sample() {
            let image = store
                .handle_for(&state.source)
                .and_then(|h| store.ready_image(h));
            let Some(image) = image else {
                continue;
            };
            let edge = state.size * state.scale;
            let dest = Rect::from_center_size(state.center, (edge, edge));
            surface.draw_image_rotated(image, dest, state.rotation_deg, state.opacity)?;
        }
        Ok(())
    }
}

impl SplashSpawner for SplashLayer {
    fn spawn_splash(&mut self, origin: Point, angle_rad: f64, spec: &SplashSpec) {
        if spec.source.is_empty() {
            return;
        }
        let rotation = math::centered(&mut self.rng, spec.rotate_jitter_deg);
        match Splash::new(origin, angle_rad, spec, rotation) {
            Ok(splash) => {
                self.splashes.push(splash);
                self.spawned += 1;
            }
            Err(err) => tracing::warn!(%err, source = %spec.source, "splash skipped"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shot/splash.rs"]
mod tests;
