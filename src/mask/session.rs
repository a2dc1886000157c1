use crate::{
    animation::{
        anim::PropertyTrack,
        ease::Ease,
        timeline::{Position, Timeline},
    },
    assets::store::PreparedImage,
    foundation::{
        core::{Rect, Size, Transform2D, Vec2},
        error::FxResult,
    },
    geometry::bounds::get_draw_rect,
    mask::{
        bite::{Bite, BitePlan},
        frame::draw_frame,
    },
    raster::surface::{RasterSurface, SurfaceFactory},
};

/// How a mask invocation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskOutcome {
    /// Every bite ran and the surface was torn down.
    Completed,
    /// No surface or no image; torn down early.
    Aborted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskState {
    Running,
    Finished(MaskOutcome),
}

/// Side effects a host should perform while the session advances.
#[derive(Clone, Debug, PartialEq)]
pub enum MaskEvent {
    BiteStarted { index: usize, clip: String },
    /// The clip started with bite `index` should stop now.
    BiteSoundEnded { index: usize, clip: String },
    Finished(MaskOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MaskCue {
    StartBite(usize),
    StopSound(usize),
}

#[derive(Clone, Debug)]
struct ScheduledBite {
    bite: Bite,
    max_radius: f64,
    radius: PropertyTrack<f64>,
}

/// One eating interaction: owns its overlay surface and plays the bite plan.
pub struct MaskSession<S> {
    plan: BitePlan,
    image: Option<PreparedImage>,
    surface: Option<S>,
    draw_rect: Rect,
    bites: Vec<ScheduledBite>,
    started: usize,
    drawn: Vec<Bite>,
    shake: PropertyTrack<Transform2D>,
    timeline: Timeline<MaskCue>,
    state: MaskState,
}

impl<S> std::fmt::Debug for MaskSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskSession")
            .field("draw_rect", &self.draw_rect)
            .field("started", &self.started)
            .field("time", &self.timeline.time())
            .field("state", &self.state)
            .finish()
    }
}

impl<S: RasterSurface> MaskSession<S> {
    /// Acquire an overlay surface sized to `container`, lay the image out in
    /// it and schedule every bite.
    ///
    /// `image` is `None` when the source failed to load. A failed surface or a
    /// missing image gives a session that is already
    /// `Finished(Aborted)`, so the caller can release its gate the same way
    /// it does for a completed one.
    #[tracing::instrument(skip(factory, image, plan))]
    pub fn start<F>(
        factory: &mut F,
        image: Option<&PreparedImage>,
        container: Size,
        dpr: f64,
        rotation_deg: f64,
        plan: BitePlan,
    ) -> Self
    where
        F: SurfaceFactory<Surface = S>,
    {
        let mut session = Self {
            plan,
            image: None,
            surface: None,
            draw_rect: Rect::ZERO,
            bites: Vec::new(),
            started: 0,
            drawn: Vec::new(),
            shake: PropertyTrack::new(Transform2D::default()),
            timeline: Timeline::new(),
            state: MaskState::Running,
        };

        let surface = match factory.create(container, dpr) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(%err, "mask surface unavailable; aborting");
                session.state = MaskState::Finished(MaskOutcome::Aborted);
                return session;
            }
        };
        let Some(image) = image else {
            tracing::warn!("mask image unavailable; aborting");
            drop(surface);
            session.state = MaskState::Finished(MaskOutcome::Aborted);
            return session;
        };

        let aspect = image.aspect().unwrap_or(0.0);
        session.draw_rect = get_draw_rect(container.width, container.height, aspect, rotation_deg);
        session.image = Some(image.clone());
        session.surface = Some(surface);

        if let Err(err) = session.schedule() {
            tracing::warn!(%err, "invalid bite plan; aborting");
            session.teardown(MaskOutcome::Aborted);
            return session;
        }
        if let Err(err) = session.redraw(Vec::new()) {
            tracing::warn!(%err, "initial mask draw failed; aborting");
            session.teardown(MaskOutcome::Aborted);
        }
        session
    }

    fn schedule(&mut self) -> FxResult<()> {
        self.plan.validate()?;
        let draw_rect = self.draw_rect;
        let last = self.plan.bites.len() - 1;
        self.timeline.hold(self.plan.start_delay)?;

        for (i, spec) in self.plan.bites.iter().enumerate() {
            let start = self.timeline.cue(Position::End, MaskCue::StartBite(i));
            let max_radius = spec.max_radius_in(draw_rect);
            let mut radius = PropertyTrack::new(0.0);
            radius.from_to(start, spec.duration, 0.0, max_radius, Ease::OutCubic, 0, false)?;

            let scale = if i == last {
                self.plan.last_shake_scale
            } else {
                self.plan.shake_scale
            };
            let shaken = Transform2D {
                translate: Vec2::new(spec.shake_x, self.plan.shake_y),
                rotation_deg: 0.0,
                scale: Vec2::new(scale, scale),
            };
            self.shake.from_to(
                start,
                self.plan.shake_duration,
                Transform2D::default(),
                shaken,
                Ease::InOutSine,
                1,
                true,
            )?;

            self.timeline
                .cue(Position::At(start + spec.duration), MaskCue::StopSound(i));
            self.timeline
                .place(Position::At(start), spec.duration + spec.pause_after)?;

            self.bites.push(ScheduledBite {
                bite: Bite {
                    center: spec.center_in(draw_rect),
                    radius: 0.0,
                    whole: spec.is_whole(),
                },
                max_radius,
                radius,
            });
        }
        Ok(())
    }

    /// Advance by `dt` seconds, redrawing whenever a bite radius changed.
    pub fn advance(&mut self, dt: f64) -> Vec<MaskEvent> {
        if self.state != MaskState::Running {
            return Vec::new();
        }
        let mut events = Vec::new();
        for cue in self.timeline.advance(dt) {
            match cue {
                MaskCue::StartBite(index) => {
                    tracing::debug!(index, "bite started");
                    self.started = self.started.max(index + 1);
                    events.push(MaskEvent::BiteStarted {
                        index,
                        clip: self.plan.sound.clone(),
                    });
                }
                MaskCue::StopSound(index) => events.push(MaskEvent::BiteSoundEnded {
                    index,
                    clip: self.plan.sound.clone(),
                }),
            }
        }

        let bites = self.current_bites();
        if bites != self.drawn
            && let Err(err) = self.redraw(bites)
        {
            tracing::warn!(%err, "mask frame failed; aborting");
            self.teardown(MaskOutcome::Aborted);
            events.push(MaskEvent::Finished(MaskOutcome::Aborted));
            return events;
        }

        if self.timeline.is_finished() {
            tracing::debug!("mask sequence complete");
            self.teardown(MaskOutcome::Completed);
            events.push(MaskEvent::Finished(MaskOutcome::Completed));
        }
        events
    }

    fn current_bites(&self) -> Vec<Bite> {
        let t = self.timeline.time();
        self.bites[..self.started]
            .iter()
            .map(|s| Bite {
                radius: s.radius.sample(t),
                ..s.bite
            })
            .collect()
    }

    fn redraw(&mut self, bites: Vec<Bite>) -> FxResult<()> {
        if let (Some(surface), Some(image)) = (self.surface.as_mut(), self.image.as_ref()) {
            draw_frame(surface, image, &bites, self.draw_rect, self.plan.erosion)?;
        }
        self.drawn = bites;
        Ok(())
    }

    /// Drop the surface and finish with `Aborted` (host-initiated cancel).
    pub fn abort(&mut self) {
        if self.state == MaskState::Running {
            self.teardown(MaskOutcome::Aborted);
        }
    }

    fn teardown(&mut self, outcome: MaskOutcome) {
        self.surface = None;
        self.image = None;
        self.state = MaskState::Finished(outcome);
    }
}

impl<S> MaskSession<S> {
    pub fn state(&self) -> MaskState {
        self.state
    }

    pub fn outcome(&self) -> Option<MaskOutcome> {
        match self.state {
            MaskState::Running => None,
            MaskState::Finished(o) => Some(o),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, MaskState::Finished(_))
    }

    /// Live overlay surface; `None` once torn down.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn draw_rect(&self) -> Rect {
        self.draw_rect
    }

    /// Bites as last drawn, in arrival order.
    pub fn bites(&self) -> &[Bite] {
        &self.drawn
    }

    /// Configured maximum radius of each scheduled bite.
    pub fn max_radii(&self) -> Vec<f64> {
        self.bites.iter().map(|b| b.max_radius).collect()
    }

    /// Shake pose of the overlay element at the current time.
    pub fn surface_transform(&self) -> Transform2D {
        self.shake.sample(self.timeline.time())
    }

    pub fn time(&self) -> f64 {
        self.timeline.time()
    }

    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/session.rs"]
mod tests;
