use crate::foundation::math::clamp01;

/// Wall-clock to normalized progress mapping for one timeline run.
///
/// Progress is recomputed from the elapsed time on every sample and is latched so that it never
/// decreases, even when the host clock jitters backwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    start_ms: f64,
    duration_ms: f64,
    progress: f64,
}

impl AnimationClock {
    pub fn new(start_ms: f64, duration_ms: f64) -> Self {
        Self {
            start_ms,
            duration_ms,
            progress: 0.0,
        }
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Last computed progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Advance to `now_ms` and return the clamped progress.
    pub fn sample(&mut self, now_ms: f64) -> f64 {
        let elapsed = now_ms - self.start_ms;
        let raw = if self.duration_ms > 0.0 {
            clamp01(elapsed / self.duration_ms)
        } else {
            1.0
        };
        self.progress = self.progress.max(raw);
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}
