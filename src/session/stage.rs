use crate::{
    assets::store::{SpriteHandle, SpriteStore, normalize_rel_path},
    audio::trigger::{SoundAction, SoundTrigger, fire_and_forget},
    cloud::choreographer::{CloudChoreographer, CloudInvocation},
    config::scene::SceneConfig,
    foundation::{
        core::{Point, Rect, Viewport},
        error::FxResult,
    },
    mask::session::{MaskEvent, MaskSession},
    particles::simulator::ParticleSimulator,
    raster::surface::SurfaceFactory,
    session::{
        gate::{AssetKind, InteractionGate, SessionTicket},
        shake::{MotionSample, ShakeDetector},
    },
    shot::{
        overlay::{ShotEvent, ShotOverlay, SplashBurst},
        splash::SplashLayer,
    },
};

/// Rest layout boxes of the tappable assets, in CSS px.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageLayout {
    pub pichkari: Rect,
    pub gujiya: Rect,
    /// Visual rotation of the sweet; its mask is fitted unrotated.
    pub gujiya_rotation_deg: f64,
    pub gulal: Rect,
}

/// The interaction currently holding the gate.
#[derive(Debug)]
pub enum Interaction<S> {
    Pichkari(ShotOverlay),
    Gujiya(MaskSession<S>),
    Gulal(CloudInvocation),
}

impl<S> Interaction<S> {
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Pichkari(_) => AssetKind::Pichkari,
            Self::Gujiya(_) => AssetKind::Gujiya,
            Self::Gulal(_) => AssetKind::Gulal,
        }
    }
}

/// Scene coordinator: routes taps and shakes into interactions, drives them
/// frame by frame and releases the gate when they end.
///
/// Clouds started by a shake do not hold the gate.
pub struct Stage<F: SurfaceFactory, A: SoundTrigger> {
    config: SceneConfig,
    viewport: Viewport,
    layout: StageLayout,
    gate: InteractionGate,
    shake: ShakeDetector,
    sprites: SpriteStore,
    spray: ParticleSimulator,
    spray_surface: F::Surface,
    splashes: SplashLayer,
    clouds: CloudChoreographer,
    cloud_sources: Vec<SpriteHandle>,
    gujiya: SpriteHandle,
    has_suspension: bool,
    factory: F,
    sound: A,
    active: Option<(SessionTicket, Interaction<F::Surface>)>,
    ambient: Vec<CloudInvocation>,
}

impl<F: SurfaceFactory, A: SoundTrigger> std::fmt::Debug for Stage<F, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("viewport", &self.viewport)
            .field("active", &self.active_kind())
            .field("particles", &self.spray.len())
            .field("splashes", &self.splashes.len())
            .field("ambient_clouds", &self.ambient.len())
            .finish_non_exhaustive()
    }
}

impl<F: SurfaceFactory, A: SoundTrigger> Stage<F, A> {
    /// Preload every manifest image under `config.assets.root`, then build.
    pub fn load(
        config: SceneConfig,
        viewport: Viewport,
        layout: StageLayout,
        factory: F,
        sound: A,
    ) -> FxResult<Self> {
        let mut sprites = SpriteStore::new(config.assets.root.clone());
        let assets = &config.assets;
        sprites.preload_all(assets.spray_sprites.iter().map(String::as_str))?;
        sprites.preload(&assets.gujiya)?;
        sprites.preload_all(assets.suspension.iter().map(String::as_str))?;
        sprites.preload_all(config.cloud.sources.iter().map(String::as_str))?;
        for shot in &config.shots.shots {
            if !shot.splash.source.is_empty() {
                sprites.preload(&shot.splash.source)?;
            }
        }
        Self::new(config, viewport, layout, sprites, factory, sound)
    }

    /// Build over an already populated store. Paths missing from `sprites`
    /// are registered as not ready and drawn with fallbacks.
    pub fn new(
        config: SceneConfig,
        viewport: Viewport,
        layout: StageLayout,
        mut sprites: SpriteStore,
        mut factory: F,
        sound: A,
    ) -> FxResult<Self> {
        config.validate()?;
        let profile = config.particle_profile().clone();
        let spray_sprites = if profile.use_sprites {
            config
                .assets
                .spray_sprites
                .iter()
                .map(|s| resolve(&mut sprites, s))
                .collect::<FxResult<Vec<_>>>()?
        } else {
            Vec::new()
        };
        let cloud_sources = config
            .cloud
            .sources
            .iter()
            .map(|s| resolve(&mut sprites, s))
            .collect::<FxResult<Vec<_>>>()?;
        let gujiya = resolve(&mut sprites, &config.assets.gujiya)?;
        let has_suspension = config
            .assets
            .suspension
            .iter()
            .filter_map(|s| sprites.handle_for(s))
            .any(|h| sprites.is_ready(h));

        let spray_surface = factory.create(viewport.css_size(), viewport.device_pixel_ratio)?;
        let (spray, splashes, clouds) = match config.seed {
            Some(seed) => (
                ParticleSimulator::with_seed(profile, spray_sprites, seed),
                SplashLayer::with_seed(seed.wrapping_add(1)),
                CloudChoreographer::with_seed(config.cloud.clone(), seed.wrapping_add(2)),
            ),
            None => (
                ParticleSimulator::new(profile, spray_sprites),
                SplashLayer::new(),
                CloudChoreographer::new(config.cloud.clone()),
            ),
        };

        Ok(Self {
            shake: ShakeDetector::new(config.shake.clone()),
            config,
            viewport,
            layout,
            gate: InteractionGate::new(),
            sprites,
            spray,
            spray_surface,
            splashes,
            clouds,
            cloud_sources,
            gujiya,
            has_suspension,
            factory,
            sound,
            active: None,
            ambient: Vec::new(),
        })
    }

    /// Start the interaction owned by `kind`. Returns `false` when the gate is
    /// busy or the interaction aborted on start; the gate is free again in
    /// the latter case.
    #[tracing::instrument(skip(self))]
    pub fn tap(&mut self, kind: AssetKind) -> FxResult<bool> {
        let Some(ticket) = self.gate.try_begin(kind) else {
            return Ok(false);
        };
        let started = match kind {
            AssetKind::Pichkari => ShotOverlay::pichkari(
                self.layout.pichkari,
                self.viewport,
                &self.config.shots,
                self.has_suspension,
            )
            .map(Interaction::Pichkari),
            AssetKind::Gujiya => {
                let session = MaskSession::start(
                    &mut self.factory,
                    self.sprites.ready_image(self.gujiya),
                    self.layout.gujiya.size(),
                    self.viewport.device_pixel_ratio,
                    self.layout.gujiya_rotation_deg,
                    self.config.bites.clone(),
                );
                Ok(Interaction::Gujiya(session))
            }
            AssetKind::Gulal => self
                .clouds
                .build(Some(self.layout.gulal), self.viewport, &self.cloud_sources)
                .map(Interaction::Gulal),
        };

        match started {
            Ok(Interaction::Gujiya(session)) if session.is_finished() => {
                self.gate.release(ticket);
                Ok(false)
            }
            Ok(interaction) => {
                self.active = Some((ticket, interaction));
                Ok(true)
            }
            Err(err) => {
                self.gate.release(ticket);
                Err(err)
            }
        }
    }

    /// Feed an accelerometer sample. Returns `true` when it raised a dust cloud.
    pub fn on_motion(&mut self, sample: MotionSample) -> FxResult<bool> {
        if !self.shake.on_sample(sample, !self.gate.is_busy()) {
            return Ok(false);
        }
        let cloud = self
            .clouds
            .build(Some(self.layout.gulal), self.viewport, &self.cloud_sources)?;
        self.ambient.push(cloud);
        Ok(true)
    }

    /// Spray particles from `origin` towards `angle_rad`. `count` defaults to
    /// the profile's count.
    pub fn spray_at(&mut self, origin: Point, angle_rad: f64, count: Option<usize>) -> FxResult<()> {
        let count = count.unwrap_or(self.spray.profile().default_count);
        self.spray
            .spawn(&mut self.spray_surface, self.viewport, origin, angle_rad, count)
    }

    /// Advance everything by `dt` seconds and draw the next spray frame.
    /// Returns whether another frame is wanted.
    pub fn tick(&mut self, dt: f64) -> FxResult<bool> {
        if let Some((ticket, mut interaction)) = self.active.take() {
            if self.advance_interaction(&mut interaction, dt) {
                tracing::debug!(kind = ?interaction.kind(), "interaction finished");
                self.gate.release(ticket);
            } else {
                self.active = Some((ticket, interaction));
            }
        }
        self.ambient.retain_mut(|cloud| {
            cloud.advance(dt);
            !cloud.is_torn_down()
        });
        self.splashes.advance(dt);
        let spraying = self.spray.tick(&mut self.spray_surface, &self.sprites)?;
        Ok(spraying || self.active.is_some() || !self.ambient.is_empty() || !self.splashes.is_empty())
    }

    /// Returns true once the interaction is over.
    fn advance_interaction(&mut self, interaction: &mut Interaction<F::Surface>, dt: f64) -> bool {
        match interaction {
            Interaction::Pichkari(overlay) => {
                for event in overlay.advance(dt) {
                    if let ShotEvent::Splash(burst) = event {
                        self.on_thrust(&burst);
                    }
                }
                overlay.is_finished()
            }
            Interaction::Gujiya(session) => {
                for event in session.advance(dt) {
                    match event {
                        MaskEvent::BiteStarted { clip, .. } => {
                            fire_and_forget(&mut self.sound, SoundAction::Play, &clip)
                        }
                        MaskEvent::BiteSoundEnded { clip, .. } => {
                            fire_and_forget(&mut self.sound, SoundAction::Stop, &clip)
                        }
                        MaskEvent::Finished(outcome) => {
                            tracing::debug!(?outcome, "gujiya finished")
                        }
                    }
                }
                session.is_finished()
            }
            Interaction::Gulal(cloud) => {
                cloud.advance(dt);
                cloud.is_torn_down()
            }
        }
    }

    fn on_thrust(&mut self, burst: &SplashBurst) {
        burst.spawn_into(&mut self.splashes);
        fire_and_forget(&mut self.sound, SoundAction::Play, &burst.sound);
        let count = self.config.shots.spray_count;
        if count > 0 {
            let nozzle = burst.nozzle;
            if let Err(err) = self.spray.spawn(
                &mut self.spray_surface,
                self.viewport,
                nozzle.point,
                nozzle.angle,
                count,
            ) {
                tracing::warn!(%err, "nozzle spray skipped");
            }
        }
    }

    /// Drop the running interaction and free the gate.
    pub fn cancel(&mut self) {
        if let Some((ticket, mut interaction)) = self.active.take() {
            if let Interaction::Gujiya(session) = &mut interaction {
                session.abort();
            }
            tracing::debug!(kind = ?interaction.kind(), "interaction cancelled");
            self.gate.release(ticket);
        }
    }

    /// Follow a viewport change; particles keep their positions.
    pub fn resize(&mut self, viewport: Viewport) -> FxResult<()> {
        self.viewport = viewport;
        self.spray.on_viewport_resize(viewport, &mut self.spray_surface)
    }

    pub fn set_layout(&mut self, layout: StageLayout) {
        self.layout = layout;
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    pub fn active_kind(&self) -> Option<AssetKind> {
        self.gate.active_kind()
    }

    pub fn active(&self) -> Option<&Interaction<F::Surface>> {
        self.active.as_ref().map(|(_, i)| i)
    }

    pub fn ambient_clouds(&self) -> &[CloudInvocation] {
        &self.ambient
    }

    pub fn spray(&self) -> &ParticleSimulator {
        &self.spray
    }

    pub fn spray_surface(&self) -> &F::Surface {
        &self.spray_surface
    }

    pub fn splashes(&self) -> &SplashLayer {
        &self.splashes
    }

    pub fn sprites(&self) -> &SpriteStore {
        &self.sprites
    }

    pub fn sound(&self) -> &A {
        &self.sound
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

fn resolve(store: &mut SpriteStore, source: &str) -> FxResult<SpriteHandle> {
    if let Some(handle) = store.handle_for(source) {
        return Ok(handle);
    }
    let norm = normalize_rel_path(source)?;
    Ok(store.insert_unavailable(&norm))
}

#[cfg(test)]
#[path = "../../tests/unit/session/stage.rs"]
mod tests;
