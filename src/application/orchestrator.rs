use crate::core::error::TimerError;
use crate::core::models::{Phase, PlaybackPosition, Routine, TickSnapshot};
use crate::core::traits::{CueSink, PresentationSink};
use crate::modules::session::clock::PhaseClock;
use crate::modules::session::cue_trigger::CueTrigger;
use crate::modules::session::scheduler::{SessionToken, TickScheduler};
use crate::modules::session::sequencer::Sequencer;
use std::time::{Duration, Instant};

/// Output side of a session, borrowed for the duration of one call.
pub struct SessionSinks<'a> {
    pub presentation: &'a mut dyn PresentationSink,
    pub cue: &'a mut dyn CueSink,
}

/// What a tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale token or stopped clock; nothing happened
    Ignored,
    /// Countdown still running
    Running,
    /// The phase ran out and the next one began
    Advanced(Phase),
    /// The last phase ran out
    Completed,
}

/// One playback session: routine, position, clock and the single recurring tick.
///
/// The orchestrator is the only thing that mutates session state. It asks the
/// [`Sequencer`] for transitions, the [`PhaseClock`] for timing, and pushes
/// results to the sinks it is handed on each call.
pub struct Orchestrator {
    routine: Option<Routine>,
    position: PlaybackPosition,
    clock: PhaseClock,
    cue: CueTrigger,
    scheduler: TickScheduler,
}

impl Orchestrator {
    pub fn new(tick_interval: Duration, cue_window_secs: u64) -> Self {
        Self {
            routine: None,
            position: PlaybackPosition::idle(),
            clock: PhaseClock::new(),
            cue: CueTrigger::new(cue_window_secs),
            scheduler: TickScheduler::new(tick_interval),
        }
    }

    /// Start a fresh session, replacing any session in progress.
    pub fn start(
        &mut self,
        routine: Routine,
        now: Instant,
        sinks: &mut SessionSinks<'_>,
    ) -> Result<(), TimerError> {
        let position = match Sequencer::start(&routine) {
            Ok(position) => position,
            Err(e) => {
                sinks.presentation.render_error(&e.to_string());
                return Err(e);
            }
        };

        self.scheduler.cancel();
        self.clock.reset();
        self.routine = Some(routine);
        self.position = position;

        self.begin_current_phase(now)?;
        self.scheduler.schedule(now);
        self.emit(now, sinks);
        Ok(())
    }

    /// Token of the next due tick, if one is due at `now`.
    pub fn poll_due(&mut self, now: Instant) -> Option<SessionToken> {
        self.scheduler.poll(now)
    }

    /// Handle one scheduled tick.
    pub fn on_tick(
        &mut self,
        token: SessionToken,
        now: Instant,
        sinks: &mut SessionSinks<'_>,
    ) -> TickOutcome {
        if !self.scheduler.is_current(token) || self.clock.tick(now).is_err() {
            return TickOutcome::Ignored;
        }

        match self.emit(now, sinks) {
            Some(0) => self.finish_phase(now, sinks),
            Some(_) => TickOutcome::Running,
            None => TickOutcome::Ignored,
        }
    }

    /// Returns `true` if a running session was paused.
    pub fn pause(&mut self, now: Instant, sinks: &mut SessionSinks<'_>) -> bool {
        if !self.clock.pause(now) {
            return false;
        }
        self.scheduler.cancel();
        self.emit(now, sinks);
        true
    }

    /// Returns `true` if a paused session was resumed.
    pub fn resume(&mut self, now: Instant, sinks: &mut SessionSinks<'_>) -> bool {
        if !self.clock.resume(now) {
            return false;
        }
        self.scheduler.schedule(now);
        self.emit(now, sinks);
        true
    }

    pub fn toggle_pause(&mut self, now: Instant, sinks: &mut SessionSinks<'_>) -> bool {
        if self.clock.is_paused() {
            self.resume(now, sinks)
        } else {
            self.pause(now, sinks)
        }
    }

    /// Drop the session and go back to idle.
    pub fn reset(&mut self, sinks: &mut SessionSinks<'_>) {
        self.scheduler.cancel();
        self.clock.reset();
        self.cue.rearm();
        self.routine = None;
        self.position = PlaybackPosition::idle();
        sinks.presentation.render_idle();
    }

    /// Reset, then start the same routine again from its first exercise.
    ///
    /// Fails with [`TimerError::NotRunning`] when no routine is loaded.
    pub fn restart(
        &mut self,
        now: Instant,
        sinks: &mut SessionSinks<'_>,
    ) -> Result<(), TimerError> {
        let routine = self.routine.clone().ok_or(TimerError::NotRunning)?;
        self.reset(sinks);
        self.start(routine, now, sinks)
    }

    /// Snapshot of the active phase at `now`; `None` when no phase is timed.
    pub fn snapshot(&self, now: Instant) -> Option<TickSnapshot> {
        let routine = self.routine.as_ref()?;
        let progress = self.clock.progress(now)?;

        Some(TickSnapshot {
            phase: self.position.phase,
            label: Sequencer::label(routine, &self.position),
            next_label: Sequencer::lookahead(routine, &self.position),
            remaining_seconds: progress.remaining_secs(),
            total_seconds: progress.total().as_secs(),
            percent_elapsed: progress.percent(),
            set_index: self.position.set_index,
            sets: routine.sets,
            paused: self.clock.is_paused(),
        })
    }

    #[cfg(test)]
    pub fn position(&self) -> PlaybackPosition {
        self.position
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.position.phase
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn is_active(&self) -> bool {
        self.position.phase.is_timed()
    }

    fn begin_current_phase(&mut self, now: Instant) -> Result<(), TimerError> {
        let routine = self.routine.as_ref().ok_or(TimerError::NotRunning)?;
        let duration = Sequencer::phase_duration(routine, &self.position).ok_or_else(|| {
            TimerError::invalid_routine(format!("{:?} phase has no duration", self.position.phase))
        })?;

        self.clock.begin_phase(duration, now);
        self.cue.rearm();
        Ok(())
    }

    fn finish_phase(&mut self, now: Instant, sinks: &mut SessionSinks<'_>) -> TickOutcome {
        // The next phase starts where this one ran out, not at the tick that noticed it
        let anchor = self.clock.phase_end().map_or(now, |end| end.min(now));

        let next = match self.routine.as_ref() {
            Some(routine) => Sequencer::advance(routine, &self.position),
            None => return TickOutcome::Ignored,
        };

        let next = match next {
            Ok(next) => next,
            Err(e) => {
                debug_assert!(false, "orchestrator advanced an untimed phase: {}", e);
                self.reset(sinks);
                return TickOutcome::Ignored;
            }
        };

        self.position = next;

        if next.phase == Phase::Complete {
            self.scheduler.cancel();
            self.clock.reset();
            sinks.presentation.render_complete();
            return TickOutcome::Completed;
        }

        if let Err(e) = self.begin_current_phase(anchor) {
            sinks.presentation.render_error(&e.to_string());
            self.reset(sinks);
            return TickOutcome::Ignored;
        }

        self.emit(now, sinks);
        TickOutcome::Advanced(next.phase)
    }

    /// Render the current snapshot and fire the cue if due. Returns the remaining seconds.
    fn emit(&mut self, now: Instant, sinks: &mut SessionSinks<'_>) -> Option<u64> {
        let snapshot = self.snapshot(now)?;
        sinks.presentation.render(&snapshot);

        if !snapshot.paused && self.cue.observe(snapshot.remaining_seconds) {
            sinks.cue.cue();
        }

        Some(snapshot.remaining_seconds)
    }
}
