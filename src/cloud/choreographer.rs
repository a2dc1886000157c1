use rand::{SeedableRng, rngs::StdRng};

use crate::{
    animation::{
        anim::PropertyTrack,
        ease::Ease,
        timeline::{Position, Timeline},
    },
    assets::store::{SpriteHandle, SpriteStore},
    cloud::config::CloudConfig,
    foundation::{
        core::{Point, Rect, Viewport},
        error::{FxError, FxResult},
        math,
    },
    raster::surface::RasterSurface,
};

/// Snapshot of one cloud sprite.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CloudSpriteState {
    pub index: usize,
    pub source: SpriteHandle,
    /// Top-left of the unscaled sprite box, viewport CSS px.
    pub top_left: Point,
    /// Edge length before `scale`.
    pub size: f64,
    pub scale: f64,
    pub opacity: f64,
    pub rotation_deg: f64,
}

impl CloudSpriteState {
    pub fn center(&self) -> Point {
        Point::new(self.top_left.x + self.size * 0.5, self.top_left.y + self.size * 0.5)
    }
}

#[derive(Clone, Debug)]
struct CloudSprite {
    source: SpriteHandle,
    size: f64,
    rotation_deg: f64,
    target: Point,
    cover_scale: f64,
    top_left: PropertyTrack<Point>,
    scale: PropertyTrack<f64>,
    opacity: PropertyTrack<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CloudCue {
    RemoveLayer,
}

/// Builds dust-cloud invocations from a [`CloudConfig`].
#[derive(Debug)]
pub struct CloudChoreographer {
    config: CloudConfig,
    rng: StdRng,
}

impl CloudChoreographer {
    pub fn new(config: CloudConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(config: CloudConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// One sprite per anchor, starting on the origin centre (viewport centre
    /// without an origin) and spreading out to cover the viewport.
    ///
    /// `sources` are cycled by sprite index.
    #[tracing::instrument(skip(self, sources))]
    pub fn build(
        &mut self,
        origin: Option<Rect>,
        viewport: Viewport,
        sources: &[SpriteHandle],
    ) -> FxResult<CloudInvocation> {
        self.config.validate()?;
        if sources.is_empty() {
            return Err(FxError::validation("cloud build needs at least one sprite"));
        }
        let cfg = &self.config;
        let vmin = viewport.min_side();
        let base_width = origin
            .map(|r| r.width())
            .filter(|w| *w > 0.0)
            .unwrap_or(vmin * cfg.fallback_origin_vmin_frac);
        let base_size = (vmin * cfg.base_vmin_frac).max(base_width * cfg.origin_width_factor);
        let start_center = origin.map_or_else(|| viewport.center(), |r| r.center());

        let mut timeline = Timeline::new();
        let mut sprites = Vec::with_capacity(cfg.anchors.len());
        for (index, anchor) in cfg.anchors.iter().enumerate() {
            let size = base_size * cfg.size_jitter.sample(&mut self.rng);
            let half = size * 0.5;
            let start = Point::new(start_center.x - half, start_center.y - half);
            let anchor_pt = viewport.anchor(anchor.x, anchor.y);
            let target = Point::new(anchor_pt.x - half, anchor_pt.y - half);
            let cover_scale = cfg.cover_scale.sample(&mut self.rng);
            let rotation_deg = math::centered(&mut self.rng, cfg.rotation_jitter_deg);

            let mut sprite = CloudSprite {
                source: sources[index % sources.len()],
                size,
                rotation_deg,
                target,
                cover_scale,
                top_left: PropertyTrack::new(start),
                scale: PropertyTrack::new(cfg.start_scale),
                opacity: PropertyTrack::new(0.0),
            };

            let enter =
                timeline.place(Position::At(cfg.enter.start_for(index)), cfg.enter.duration)?;
            sprite
                .opacity
                .to(enter, cfg.enter.duration, cfg.enter_opacity, Ease::OutCubic)?;
            sprite
                .scale
                .to(enter, cfg.enter.duration, cfg.enter_scale, Ease::OutCubic)?;
            sprites.push(sprite);
        }

        for (index, sprite) in sprites.iter_mut().enumerate() {
            let cover =
                timeline.place(Position::At(cfg.cover.start_for(index)), cfg.cover.duration)?;
            let d = cfg.cover.duration;
            sprite.top_left.to(cover, d, sprite.target, Ease::InOutCubic)?;
            sprite.scale.to(cover, d, sprite.cover_scale, Ease::InOutCubic)?;
            sprite.opacity.to(cover, d, cfg.cover_opacity, Ease::InOutCubic)?;
        }

        timeline.hold(cfg.hold)?;

        for (index, sprite) in sprites.iter_mut().enumerate() {
            let fade =
                timeline.place(Position::At(cfg.fade.start_for(index)), cfg.fade.duration)?;
            sprite.opacity.to(fade, cfg.fade.duration, 0.0, Ease::InCubic)?;
        }
        timeline.cue(Position::End, CloudCue::RemoveLayer);

        tracing::debug!(
            sprites = sprites.len(),
            duration = timeline.duration(),
            "cloud built"
        );
        Ok(CloudInvocation {
            sprites,
            timeline,
            torn_down: false,
        })
    }
}

/// One running dust cloud. The layer is torn down when the last fade ends.
#[derive(Clone, Debug)]
pub struct CloudInvocation {
    sprites: Vec<CloudSprite>,
    timeline: Timeline<CloudCue>,
    torn_down: bool,
}

impl CloudInvocation {
    /// Advance by `dt` seconds; returns true on the call that tears the layer down.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.torn_down {
            return false;
        }
        let removed = self
            .timeline
            .advance(dt)
            .contains(&CloudCue::RemoveLayer);
        if removed {
            tracing::debug!("cloud layer removed");
            self.torn_down = true;
        }
        removed
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn time(&self) -> f64 {
        self.timeline.time()
    }

    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite states at the current time (empty once torn down).
    pub fn sample(&self) -> Vec<CloudSpriteState> {
        if self.torn_down {
            return Vec::new();
        }
        self.sample_at(self.timeline.time())
    }

    /// Sprite states at any time on this invocation's timeline.
    pub fn sample_at(&self, t: f64) -> Vec<CloudSpriteState> {
        self.sprites
            .iter()
            .enumerate()
            .map(|(index, s)| CloudSpriteState {
                index,
                source: s.source,
                top_left: s.top_left.sample(t),
                size: s.size,
                scale: s.scale.sample(t),
                opacity: s.opacity.sample(t).clamp(0.0, 1.0),
                rotation_deg: s.rotation_deg,
            })
            .collect()
    }

    /// Draw the current sprites, scaled and rotated about their centres. Sprites that are
    /// not decoded are skipped.
    pub fn render<S: RasterSurface>(&self, surface: &mut S, store: &SpriteStore) -> FxResult<()> {
        surface.clear();
        for state in self.sample() {
            if state.opacity <= 0.0 {
                continue;
            }
            let Some(image) = store.ready_image(state.source) else {
                continue;
            };
            let edge = state.size * state.scale;
            let dest = Rect::from_center_size(state.center(), (edge, edge));
            surface.draw_image_rotated(image, dest, state.rotation_deg, state.opacity)?;
        }
        surface.finish_frame()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cloud/choreographer.rs"]
mod tests;
