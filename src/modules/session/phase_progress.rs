use std::time::Duration;

/// Progress of the active phase at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseProgress {
    elapsed: Duration,
    total: Duration,
}

impl PhaseProgress {
    /// Creates a new PhaseProgress instance
    ///
    /// # Arguments
    /// * `elapsed` - Time spent in the phase, pauses excluded
    /// * `total` - The configured length of the phase
    ///
    /// # Returns
    /// * `Some(PhaseProgress)` if total duration is valid (> 0)
    /// * `None` if total duration is zero
    pub fn new(elapsed: Duration, total: Duration) -> Option<Self> {
        if total.is_zero() {
            return None;
        }

        Some(Self {
            elapsed: elapsed.min(total), // Clamp elapsed to total
            total,
        })
    }

    /// Returns the ratio of progress (0.0 to 1.0)
    pub fn ratio(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Percent of the phase already elapsed (0.0 to 100.0)
    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// Whole seconds left, rounded up so the display reads 1 until the very end
    pub fn remaining_secs(&self) -> u64 {
        let left = self.total.saturating_sub(self.elapsed);
        left.as_secs() + u64::from(left.subsec_nanos() > 0)
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total
    }

    /// Returns the elapsed duration
    #[cfg(test)]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the total duration
    pub fn total(&self) -> Duration {
        self.total
    }
}
