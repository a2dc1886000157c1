use crate::foundation::error::{FxError, FxResult};

/// Device-motion shake heuristic tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Samples closer than this to the previous accepted one are ignored.
    pub min_interval_ms: f64,
    /// Summed per-axis change per second needed to count as a shake.
    pub speed_threshold: f64,
    pub cooldown_ms: f64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 90.0,
            speed_threshold: 26.0,
            cooldown_ms: 1400.0,
        }
    }
}

impl ShakeConfig {
    pub fn validate(&self) -> FxResult<()> {
        for (name, v) in [
            ("min_interval_ms", self.min_interval_ms),
            ("speed_threshold", self.speed_threshold),
            ("cooldown_ms", self.cooldown_ms),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FxError::validation(format!(
                    "shake '{name}' must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// One accelerometer reading. Non-finite axes read as 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub time_ms: f64,
}

impl MotionSample {
    pub fn new(x: f64, y: f64, z: f64, time_ms: f64) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            x: finite(x),
            y: finite(y),
            z: finite(z),
            time_ms,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ShakeDetector {
    config: ShakeConfig,
    last: Option<MotionSample>,
    last_trigger_ms: Option<f64>,
}

impl ShakeDetector {
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            config,
            last: None,
            last_trigger_ms: None,
        }
    }

    pub fn config(&self) -> &ShakeConfig {
        &self.config
    }

    /// Feed one sample. Returns `true` when it should trigger the dust cloud.
    ///
    /// The first sample only primes the detector. A fast enough sample is
    /// dropped while `gate_idle` is false, and the cooldown only restarts on
    /// an actual trigger.
    pub fn on_sample(&mut self, sample: MotionSample, gate_idle: bool) -> bool {
        let sample = MotionSample::new(sample.x, sample.y, sample.z, sample.time_ms);
        let Some(last) = self.last else {
            self.last = Some(sample);
            return false;
        };

        let dt = sample.time_ms - last.time_ms;
        if dt < self.config.min_interval_ms || dt <= 0.0 {
            return false;
        }
        let delta = (sample.x - last.x).abs() + (sample.y - last.y).abs() + (sample.z - last.z).abs();
        let speed = delta / dt * 1000.0;
        self.last = Some(sample);

        if speed <= self.config.speed_threshold || !gate_idle {
            return false;
        }
        if let Some(prev) = self.last_trigger_ms
            && sample.time_ms - prev < self.config.cooldown_ms
        {
            return false;
        }
        self.last_trigger_ms = Some(sample.time_ms);
        tracing::debug!(speed, "shake detected");
        true
    }

    /// Forget the primed sample and cooldown.
    pub fn reset(&mut self) {
        self.last = None;
        self.last_trigger_ms = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/shake.rs"]
mod tests;
