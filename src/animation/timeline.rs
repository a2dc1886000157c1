use crate::foundation::error::{FxError, FxResult};

/// Where a new segment lands relative to what is already on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Position {
    /// At the current end of the timeline.
    End,
    /// `gap` seconds after the current end (may be negative).
    AfterEnd(f64),
    /// `offset` seconds after the start of the most recently placed segment.
    WithPrevious(f64),
    /// Absolute time.
    At(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineState {
    Idle,
    Running,
    Complete,
}

#[derive(Clone, Debug)]
struct ScheduledCue<C> {
    at: f64,
    cue: C,
}

/// Scheduling cursor plus cue list for one invocation.
///
/// Property values live in [`crate::PropertyTrack`]s; the timeline only resolves
/// segment start times and delivers cues in time order as it is advanced.
#[derive(Clone, Debug)]
pub struct Timeline<C> {
    end: f64,
    last_start: f64,
    time: f64,
    cues: Vec<ScheduledCue<C>>, // sorted by `at`, stable
    next_cue: usize,
    state: TimelineState,
}

impl<C> Default for Timeline<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Timeline<C> {
    pub fn new() -> Self {
        Self {
            end: 0.0,
            last_start: 0.0,
            time: 0.0,
            cues: Vec::new(),
            next_cue: 0,
            state: TimelineState::Idle,
        }
    }

    fn resolve(&self, position: Position) -> f64 {
        let t = match position {
            Position::End => self.end,
            Position::AfterEnd(gap) => self.end + gap,
            Position::WithPrevious(offset) => self.last_start + offset,
            Position::At(t) => t,
        };
        t.max(0.0)
    }

    /// Reserve `duration` seconds at `position`; returns the segment start.
    pub fn place(&mut self, position: Position, duration: f64) -> FxResult<f64> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(FxError::animation(
                "timeline segment duration must be finite and >= 0",
            ));
        }
        let start = self.resolve(position);
        self.last_start = start;
        self.end = self.end.max(start + duration);
        Ok(start)
    }

    /// Empty segment appended at the end.
    pub fn hold(&mut self, duration: f64) -> FxResult<f64> {
        self.place(Position::End, duration)
    }

    /// Deliver `cue` when playback reaches `position`.
    pub fn cue(&mut self, position: Position, cue: C) -> f64 {
        let at = self.resolve(position);
        self.last_start = at;
        self.end = self.end.max(at);
        let idx = self.cues.partition_point(|c| c.at <= at);
        self.cues.insert(idx, ScheduledCue { at, cue });
        at
    }

    pub fn duration(&self) -> f64 {
        self.end
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == TimelineState::Complete
    }
}

impl<C: Clone> Timeline<C> {
    /// Move playback forward by `dt` seconds and return the cues crossed, in order.
    pub fn advance(&mut self, dt: f64) -> Vec<C> {
        if self.state == TimelineState::Complete {
            return Vec::new();
        }
        self.state = TimelineState::Running;
        self.time += dt.max(0.0);

        let mut fired = Vec::new();
        while let Some(next) = self.cues.get(self.next_cue) {
            if next.at > self.time {
                break;
            }
            fired.push(next.cue.clone());
            self.next_cue += 1;
        }

        if self.time >= self.end && self.next_cue == self.cues.len() {
            self.state = TimelineState::Complete;
        }
        fired
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
