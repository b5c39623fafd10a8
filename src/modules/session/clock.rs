use crate::core::error::TimerError;
use crate::modules::session::phase_progress::PhaseProgress;
use std::time::{Duration, Instant};

/// Countdown for the active phase, anchored on a monotonic start instant.
///
/// Progress is recomputed from `phase_start` on every tick, so skipped or
/// late ticks never accumulate drift. Time spent paused is subtracted.
/// Every operation takes `now` explicitly; callers pass `Instant::now()`.
#[derive(Debug, Clone, Default)]
pub struct PhaseClock {
    phase_duration: Duration,

    /// `None` until a phase begins, and again after `reset`
    phase_start: Option<Instant>,

    /// Sum of all completed pauses within the current phase
    paused_total: Duration,

    /// Set while paused
    paused_at: Option<Instant>,
}

impl PhaseClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down a fresh phase. `duration` must be non-zero.
    pub fn begin_phase(&mut self, duration: Duration, now: Instant) {
        debug_assert!(!duration.is_zero(), "zero-length phases are never timed");

        self.phase_duration = duration;
        self.phase_start = Some(now);
        self.paused_total = Duration::ZERO;
        self.paused_at = None;
    }

    /// Progress at `now`. Only valid while running.
    pub fn tick(&self, now: Instant) -> Result<PhaseProgress, TimerError> {
        if !self.is_running() {
            return Err(TimerError::NotRunning);
        }
        self.progress(now).ok_or(TimerError::NotRunning)
    }

    /// Progress at `now`, frozen at the pause instant while paused.
    /// `None` when no phase is loaded.
    pub fn progress(&self, now: Instant) -> Option<PhaseProgress> {
        let start = self.phase_start?;
        let until = self.paused_at.unwrap_or(now);
        let elapsed = until
            .saturating_duration_since(start)
            .saturating_sub(self.paused_total);

        PhaseProgress::new(elapsed, self.phase_duration)
    }

    /// Returns `true` if the clock was running and is now paused.
    pub fn pause(&mut self, now: Instant) -> bool {
        if !self.is_running() {
            return false;
        }
        self.paused_at = Some(now);
        true
    }

    /// Returns `true` if the clock was paused and is now running again.
    pub fn resume(&mut self, now: Instant) -> bool {
        if self.phase_start.is_none() {
            return false;
        }
        match self.paused_at.take() {
            Some(at) => {
                self.paused_total += now.saturating_duration_since(at);
                true
            }
            None => false,
        }
    }

    /// Drop the current phase; ticks fail with `NotRunning` until the next `begin_phase`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.phase_start.is_some() && self.paused_at.is_none()
    }

    pub fn is_paused(&self) -> bool {
        self.phase_start.is_some() && self.paused_at.is_some()
    }

    /// Instant the running phase runs out, counting the pauses so far.
    /// `None` unless running.
    pub fn phase_end(&self) -> Option<Instant> {
        if !self.is_running() {
            return None;
        }
        let start = self.phase_start?;
        Some(start + self.phase_duration + self.paused_total)
    }
}
