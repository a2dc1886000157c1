use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    assets::store::{SpriteHandle, SpriteStore},
    foundation::{
        core::{Point, Rect, Vec2, Viewport},
        error::FxResult,
        math,
    },
    particles::{
        particle::{Particle, ParticleLook},
        profile::ParticleProfile,
    },
    raster::surface::RasterSurface,
};

/// Frame scheduling state of a [`ParticleSimulator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

/// Owns the active particle set of one kind and steps it once per frame.
///
/// The loop runs while particles are alive: spawning into a stopped simulator
/// starts it, and the step that removes the last particle stops it.
#[derive(Debug)]
pub struct ParticleSimulator {
    profile: ParticleProfile,
    sprites: Vec<SpriteHandle>,
    particles: Vec<Particle>,
    state: LoopState,
    rng: StdRng,
    steps: u64,
}

impl ParticleSimulator {
    pub fn new(profile: ParticleProfile, sprites: Vec<SpriteHandle>) -> Self {
        Self::with_rng(profile, sprites, StdRng::from_os_rng())
    }

    /// Reproducible simulator for tests and offline renders.
    pub fn with_seed(profile: ParticleProfile, sprites: Vec<SpriteHandle>, seed: u64) -> Self {
        Self::with_rng(profile, sprites, StdRng::seed_from_u64(seed))
    }

    fn with_rng(profile: ParticleProfile, sprites: Vec<SpriteHandle>, rng: StdRng) -> Self {
        Self {
            profile,
            sprites,
            particles: Vec::new(),
            state: LoopState::Stopped,
            rng,
            steps: 0,
        }
    }

    pub fn profile(&self) -> &ParticleProfile {
        &self.profile
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// True while the host should keep calling [`ParticleSimulator::tick`].
    pub fn needs_frame(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Steps taken since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Spawn `count` particles with the simulator's own profile.
    pub fn spawn<S: RasterSurface>(
        &mut self,
        surface: &mut S,
        viewport: Viewport,
        origin: Point,
        angle_rad: f64,
        count: usize,
    ) -> FxResult<()> {
        let profile = self.profile.clone();
        self.spawn_with(surface, viewport, origin, angle_rad, count, &profile)
    }

    /// Spawn `count` particles drawn from `profile` (per-call overrides).
    ///
    /// The surface is resized to the viewport on every call, even for
    /// `count == 0`. Existing particles keep their positions.
    #[tracing::instrument(skip(self, surface, profile))]
    pub fn spawn_with<S: RasterSurface>(
        &mut self,
        surface: &mut S,
        viewport: Viewport,
        origin: Point,
        angle_rad: f64,
        count: usize,
        profile: &ParticleProfile,
    ) -> FxResult<()> {
        surface.resize(viewport.css_size(), viewport.device_pixel_ratio)?;
        self.particles.reserve(count);
        for _ in 0..count {
            let p = self.make_particle(origin, angle_rad, profile);
            self.particles.push(p);
        }
        if self.state == LoopState::Stopped && !self.particles.is_empty() {
            tracing::debug!(active = self.particles.len(), "particle loop started");
            self.state = LoopState::Running;
        }
        Ok(())
    }

    fn make_particle(
        &mut self,
        origin: Point,
        angle_rad: f64,
        profile: &ParticleProfile,
    ) -> Particle {
        let rng = &mut self.rng;
        let speed = profile.speed.sample(rng);
        let spread = math::centered(rng, profile.arc_spread);
        let dir = angle_rad + spread;
        let size = profile.size.sample(rng);
        let look = if profile.use_sprites && !self.sprites.is_empty() {
            let i = ((rng.random::<f64>() * self.sprites.len() as f64) as usize)
                .min(self.sprites.len() - 1);
            ParticleLook::Sprite(self.sprites[i])
        } else if profile.palette.is_empty() {
            ParticleLook::Flat(profile.fallback_color)
        } else {
            let i = ((rng.random::<f64>() * profile.palette.len() as f64) as usize)
                .min(profile.palette.len() - 1);
            ParticleLook::Flat(profile.palette[i])
        };
        Particle {
            pos: origin,
            vel: Vec2::new(dir.cos() * speed, dir.sin() * speed),
            size,
            look,
            alpha: profile.alpha.sample(rng),
            gravity: profile.gravity.sample(rng),
            friction: profile.friction,
            life: 1.0,
            decay: profile.decay.sample(rng),
            drift: profile.drift.sample(rng),
            stretch: profile.stretch.sample(rng),
        }
    }

    /// Physics half of a step: integrate every particle and drop the expired
    /// ones. Returns how many were removed.
    pub fn integrate(&mut self) -> usize {
        let drift_decay = self.profile.drift_decay;
        let alpha_factor = self.profile.alpha_factor;
        let before = self.particles.len();
        self.particles.retain_mut(|p| {
            p.integrate(drift_decay, alpha_factor);
            p.is_alive()
        });
        self.steps += 1;
        before - self.particles.len()
    }

    /// Draw the current set onto a cleared surface.
    pub fn render<S: RasterSurface>(
        &self,
        surface: &mut S,
        sprites: &SpriteStore,
    ) -> FxResult<()> {
        surface.clear();
        let profile = &self.profile;
        for p in &self.particles {
            let sprite = match p.look {
                ParticleLook::Sprite(h) => sprites.ready_image(h),
                ParticleLook::Flat(_) => None,
            };
            match sprite {
                Some(image) => {
                    let s = p.size;
                    let dest = Rect::from_center_size(p.pos, (s, s));
                    surface.draw_image(image, dest, p.alpha)?;
                }
                None => {
                    let color = match p.look {
                        ParticleLook::Flat(c) => c,
                        ParticleLook::Sprite(_) => profile.fallback_color,
                    };
                    let radius = profile.flat_radius.radius(p.size);
                    surface.fill_circle(p.pos, radius, color, p.alpha)?;
                }
            }
        }
        surface.finish_frame()
    }

    /// Integrate, render, and stop the loop once the set is empty.
    pub fn step<S: RasterSurface>(
        &mut self,
        surface: &mut S,
        sprites: &SpriteStore,
    ) -> FxResult<()> {
        self.integrate();
        let rendered = self.render(surface, sprites);
        if self.particles.is_empty() && self.state == LoopState::Running {
            tracing::debug!(steps = self.steps, "particle loop drained");
            self.state = LoopState::Stopped;
        }
        rendered
    }

    /// Frame callback: steps only while running. Returns whether another
    /// frame is wanted.
    pub fn tick<S: RasterSurface>(
        &mut self,
        surface: &mut S,
        sprites: &SpriteStore,
    ) -> FxResult<bool> {
        if self.state == LoopState::Running {
            self.step(surface, sprites)?;
        }
        Ok(self.needs_frame())
    }

    /// Resize the backing surface; particle positions are left untouched.
    pub fn on_viewport_resize<S: RasterSurface>(
        &self,
        viewport: Viewport,
        surface: &mut S,
    ) -> FxResult<()> {
        surface.resize(viewport.css_size(), viewport.device_pixel_ratio)
    }

    /// Drop every particle and stop the loop.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.state = LoopState::Stopped;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/simulator.rs"]
mod tests;
