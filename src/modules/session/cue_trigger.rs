/// Edge-triggered "interval almost over" detector.
///
/// Fires once for each whole second in `1..=window` of remaining time. A
/// second that already fired stays silent, even across pause/resume or
/// several sub-second ticks. Re-armed by [`CueTrigger::rearm`] at every new phase.
#[derive(Debug, Clone)]
pub struct CueTrigger {
    window: u64,
    last_cued: Option<u64>,
}

impl CueTrigger {
    pub fn new(window: u64) -> Self {
        Self {
            window,
            last_cued: None,
        }
    }

    /// Returns `true` when a cue should be played for this tick.
    pub fn observe(&mut self, remaining_secs: u64) -> bool {
        if remaining_secs == 0 || remaining_secs > self.window {
            return false;
        }
        if self.last_cued == Some(remaining_secs) {
            return false;
        }

        self.last_cued = Some(remaining_secs);
        true
    }

    pub fn rearm(&mut self) {
        self.last_cued = None;
    }
}
