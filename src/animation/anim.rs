use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Transform2D, Vec2},
    foundation::error::{FxError, FxResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Transform2D {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            rotation_deg: a.rotation_deg + (b.rotation_deg - a.rotation_deg) * t,
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}

/// One property tween: `from -> to` over `duration` seconds starting at `start`
/// (timeline seconds), optionally repeated with yoyo.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    pub start: f64,
    pub duration: f64,
    pub from: T,
    pub to: T,
    pub ease: Ease,
    pub repeat: u32, // extra cycles after the first
    pub yoyo: bool,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn validate(&self) -> FxResult<()> {
        if !self.start.is_finite() || !self.duration.is_finite() {
            return Err(FxError::animation("Tween start/duration must be finite"));
        }
        if self.duration < 0.0 {
            return Err(FxError::animation("Tween duration must be >= 0"));
        }
        Ok(())
    }

    /// Start plus every repeat cycle.
    pub fn end(&self) -> f64 {
        self.start + self.duration * f64::from(self.repeat + 1)
    }

    pub fn has_started(&self, t: f64) -> bool {
        t >= self.start
    }

    /// Eased progress in `[0,1]` at timeline time `t`, with yoyo folding applied.
    pub fn progress(&self, t: f64) -> f64 {
        if t < self.start {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        let cycles = f64::from(self.repeat + 1);
        let local = t - self.start;
        if local >= self.duration * cycles {
            let last_cycle_reversed = self.yoyo && self.repeat % 2 == 1;
            return if last_cycle_reversed { 0.0 } else { 1.0 };
        }
        let cycle = (local / self.duration).floor();
        let frac = (local - cycle * self.duration) / self.duration;
        let reversed = self.yoyo && (cycle as u64) % 2 == 1;
        if reversed {
            self.ease.apply(1.0 - frac)
        } else {
            self.ease.apply(frac)
        }
    }

    pub fn sample(&self, t: f64) -> T {
        T::lerp(&self.from, &self.to, self.progress(t))
    }
}

/// Animated value of a single property: an initial value plus tweens.
///
/// Tweens are kept sorted by start. A tween added with [`PropertyTrack::to`]
/// captures the track value at its start time as its `from`; once a later
/// tween has started it overrides earlier ones.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertyTrack<T> {
    pub initial: T,
    pub tweens: Vec<Tween<T>>, // sorted by start
}

impl<T> PropertyTrack<T>
where
    T: Lerp + Clone,
{
    pub fn new(initial: T) -> Self {
        Self {
            initial,
            tweens: Vec::new(),
        }
    }

    pub fn push(&mut self, tween: Tween<T>) -> FxResult<()> {
        tween.validate()?;
        let idx = self.tweens.partition_point(|tw| tw.start <= tween.start);
        self.tweens.insert(idx, tween);
        Ok(())
    }

    /// Tween from the current value at `start` to `to`.
    pub fn to(&mut self, start: f64, duration: f64, to: T, ease: Ease) -> FxResult<()> {
        let from = self.sample(start);
        self.push(Tween {
            start,
            duration,
            from,
            to,
            ease,
            repeat: 0,
            yoyo: false,
        })
    }

    /// Explicit `from -> to` tween with yoyo/repeat.
    #[allow(clippy::too_many_arguments)]
    pub fn from_to(
        &mut self,
        start: f64,
        duration: f64,
        from: T,
        to: T,
        ease: Ease,
        repeat: u32,
        yoyo: bool,
    ) -> FxResult<()> {
        self.push(Tween {
            start,
            duration,
            from,
            to,
            ease,
            repeat,
            yoyo,
        })
    }

    pub fn sample(&self, t: f64) -> T {
        let idx = self.tweens.partition_point(|tw| tw.has_started(t));
        match idx {
            0 => self.initial.clone(),
            n => self.tweens[n - 1].sample(t),
        }
    }

    /// Time after which the track value no longer changes.
    pub fn end(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
