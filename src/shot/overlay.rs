use crate::{
    animation::{
        anim::PropertyTrack,
        ease::Ease,
        timeline::{Position, Timeline},
    },
    foundation::{
        core::{Rect, Transform2D, Vec2, Viewport},
        error::FxResult,
        math::direction_from_rotation,
    },
    shot::{
        nozzle::{Nozzle, nozzle_point},
        plan::{AimedShot, ShotPlan, ShotTiming, SplashSpec},
        splash::SplashSpawner,
    },
};

/// Both splashes of one shot plus the sound cue that goes with them.
#[derive(Clone, Debug, PartialEq)]
pub struct SplashBurst {
    pub shot: usize,
    pub nozzle: Nozzle,
    pub primary: SplashSpec,
    pub secondary: SplashSpec,
    /// Launch angle of the secondary splash, radians.
    pub secondary_angle: f64,
    pub sound: String,
}

impl SplashBurst {
    /// Spawn the primary then the secondary splash.
    pub fn spawn_into<P: SplashSpawner + ?Sized>(&self, spawner: &mut P) {
        spawner.spawn_splash(self.nozzle.point, self.nozzle.angle, &self.primary);
        spawner.spawn_splash(self.nozzle.point, self.secondary_angle, &self.secondary);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShotEvent {
    /// A thrust phase started.
    Splash(SplashBurst),
    /// Sequence over; the overlay is gone.
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
enum ShotCue {
    Thrust { shot: usize, at: f64 },
}

/// Floating clone of the squirter driven through recoil/thrust/settle shots.
///
/// Poses are offsets from `source_rect` (the element's rest layout box) with
/// rotation and scale about its centre. The optional suspension track is
/// pivoted at its bottom edge.
#[derive(Clone, Debug)]
pub struct ShotOverlay {
    source_rect: Rect,
    timing: ShotTiming,
    sound: String,
    pose: PropertyTrack<Transform2D>,
    suspension: Option<PropertyTrack<Transform2D>>,
    timeline: Timeline<ShotCue>,
    shots: Vec<AimedShot>,
    finished: bool,
}

impl ShotOverlay {
    pub fn new(source_rect: Rect, timing: ShotTiming, with_suspension: bool) -> Self {
        Self {
            source_rect,
            timing,
            sound: String::new(),
            pose: PropertyTrack::new(Transform2D::default()),
            suspension: with_suspension.then(|| PropertyTrack::new(Transform2D::default())),
            timeline: Timeline::new(),
            shots: Vec::new(),
            finished: false,
        }
    }

    /// Clip reported with each [`SplashBurst`].
    pub fn with_sound(mut self, clip: impl Into<String>) -> Self {
        self.sound = clip.into();
        self
    }

    /// Fly to each shot pose, fire it, then return to rest.
    #[tracing::instrument(skip(plan))]
    pub fn pichkari(
        source_rect: Rect,
        viewport: Viewport,
        plan: &ShotPlan,
        with_suspension: bool,
    ) -> FxResult<Self> {
        plan.validate()?;
        let mut overlay = Self::new(source_rect, plan.timing.clone(), with_suspension)
            .with_sound(plan.splash_sound.clone());
        overlay.pose = PropertyTrack::new(Transform2D::default().uniform_scale(plan.overlay_scale));

        for (i, shot) in plan.shots.iter().enumerate() {
            let aimed = shot.aim(source_rect, viewport, plan.overlay_scale);
            let (d, ease) = if i == 0 {
                (overlay.timing.first_fly, Ease::OutQuart)
            } else {
                (overlay.timing.fly, Ease::InOutCubic)
            };
            let t = overlay.timeline.place(Position::End, d)?;
            overlay.pose.to(t, d, rest_pose(&aimed), ease)?;
            let susp_d = overlay.timing.suspension_fly;
            if let Some(s) = overlay.suspension.as_mut() {
                s.to(t, susp_d, Transform2D::default(), Ease::OutQuad)?;
            }
            overlay.fire_shot(aimed)?;
        }

        overlay.timeline.hold(overlay.timing.end_pause)?;
        let d = overlay.timing.return_to_rest;
        let t = overlay.timeline.place(Position::End, d)?;
        overlay.pose.to(t, d, Transform2D::default(), Ease::InOutCubic)?;
        tracing::debug!(duration = overlay.timeline.duration(), "shot sequence built");
        Ok(overlay)
    }

    /// Append recoil, thrust (splash cue at its start), settle and pause.
    pub fn fire_shot(&mut self, shot: AimedShot) -> FxResult<()> {
        let timing = &self.timing;
        let dir = direction_from_rotation(shot.rotation_deg);
        let base = shot.base_scale;
        let index = self.shots.len();

        let recoil = Transform2D {
            translate: shot.offset - dir * shot.recoil,
            rotation_deg: shot.rotation_deg,
            scale: Vec2::new(base * timing.recoil_squash.x, base * timing.recoil_squash.y),
        };
        let thrust = Transform2D {
            translate: shot.offset + dir * shot.thrust,
            rotation_deg: shot.rotation_deg,
            scale: Vec2::new(base * timing.thrust_stretch.x, base * timing.thrust_stretch.y),
        };
        let rest = rest_pose(&shot);

        let t = self.timeline.place(Position::End, timing.recoil)?;
        self.pose.to(t, timing.recoil, recoil, Ease::InCubic)?;
        if let Some(s) = self.suspension.as_mut() {
            s.to(t, timing.recoil, suspension_pose(0.76, 10.0), Ease::InCubic)?;
        }

        let t = self.timeline.place(Position::End, timing.thrust)?;
        self.timeline
            .cue(Position::At(t), ShotCue::Thrust { shot: index, at: t });
        self.pose.to(t, timing.thrust, thrust, Ease::OutQuart)?;
        if let Some(s) = self.suspension.as_mut() {
            s.to(t, timing.thrust, suspension_pose(1.1, -3.0), Ease::OutCubic)?;
        }

        let t = self.timeline.place(Position::End, timing.settle)?;
        self.pose.to(t, timing.settle, rest, Ease::OutSine)?;
        if let Some(s) = self.suspension.as_mut() {
            s.to(t, timing.settle, Transform2D::default(), Ease::OutSine)?;
        }

        self.timeline.hold(timing.pause)?;
        self.shots.push(shot);
        Ok(())
    }

    /// Advance by `dt`; reports splashes in order and the final teardown.
    pub fn advance(&mut self, dt: f64) -> Vec<ShotEvent> {
        if self.finished {
            return Vec::new();
        }
        let mut events = Vec::new();
        for cue in self.timeline.advance(dt) {
            let ShotCue::Thrust { shot, at } = cue;
            events.push(ShotEvent::Splash(self.splash_burst(shot, at)));
        }
        if self.timeline.is_finished() {
            tracing::debug!("shot overlay removed");
            self.finished = true;
            events.push(ShotEvent::Finished);
        }
        events
    }

    fn splash_burst(&self, shot: usize, at: f64) -> SplashBurst {
        let pose = self.pose.sample(at);
        let nozzle = nozzle_point(
            self.bounding_rect(pose),
            pose.rotation_deg,
            self.timing.nozzle_frac,
        );
        let primary = self.shots[shot].splash.clone();
        let secondary = primary.secondary();
        SplashBurst {
            shot,
            nozzle,
            primary,
            secondary,
            secondary_angle: nozzle.angle + self.timing.secondary_angle,
            sound: self.sound.clone(),
        }
    }

    /// Axis-aligned screen box of the overlay under `pose`.
    pub fn bounding_rect(&self, pose: Transform2D) -> Rect {
        pose.to_affine(self.source_rect.center())
            .transform_rect_bbox(self.source_rect)
    }

    pub fn pose(&self) -> Transform2D {
        self.pose.sample(self.timeline.time())
    }

    pub fn suspension_pose(&self) -> Option<Transform2D> {
        let t = self.timeline.time();
        self.suspension.as_ref().map(|s| s.sample(t))
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn time(&self) -> f64 {
        self.timeline.time()
    }

    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }

    pub fn source_rect(&self) -> Rect {
        self.source_rect
    }
}

fn rest_pose(shot: &AimedShot) -> Transform2D {
    Transform2D {
        translate: shot.offset,
        rotation_deg: shot.rotation_deg,
        scale: Vec2::new(shot.base_scale, shot.base_scale),
    }
}

fn suspension_pose(scale_y: f64, y: f64) -> Transform2D {
    Transform2D {
        translate: Vec2::new(0.0, y),
        rotation_deg: 0.0,
        scale: Vec2::new(1.0, scale_y),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shot/overlay.rs"]
mod tests;
