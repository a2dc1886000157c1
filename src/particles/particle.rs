use crate::{
    assets::store::SpriteHandle,
    foundation::core::{Point, Rgba8Premul, Vec2},
};

/// How a particle is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleLook {
    /// Preloaded sprite; drawn as a flat circle while it is not decoded.
    Sprite(SpriteHandle),
    /// Flat filled circle.
    Flat(Rgba8Premul),
}

/// One simulated point. Positions are in CSS pixels of the spray surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Point,
    pub vel: Vec2,
    pub size: f64,
    pub look: ParticleLook,
    pub alpha: f64,
    pub life: f64,
    pub decay: f64,
    pub gravity: f64,
    pub friction: f64,
    pub drift: f64,
    pub stretch: f64,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// One explicit Euler step. `life` and `alpha` are updated together.
    pub(crate) fn integrate(&mut self, drift_decay: f64, alpha_factor: f64) {
        self.vel.x += self.drift;
        self.drift *= drift_decay;
        self.vel.y += self.gravity;
        self.vel *= self.friction;
        self.pos += self.vel;
        self.life -= self.decay;
        self.alpha = (self.life * alpha_factor).max(0.0);
    }
}
