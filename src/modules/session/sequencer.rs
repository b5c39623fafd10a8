use crate::core::error::TimerError;
use crate::core::models::{Phase, PlaybackPosition, Routine};
use std::time::Duration;

pub const REST_LABEL: &str = "Rest";
pub const COMPLETE_LABEL: &str = "Done!";

/// Pure phase transitions of a routine.
///
/// Maps `(Routine, PlaybackPosition)` to the next position. Knows nothing
/// about time: the orchestrator calls [`Sequencer::advance`] exactly once per
/// finished phase. Rest phases configured as 0 seconds are never produced.
pub struct Sequencer;

impl Sequencer {
    /// Initial position of a session: first exercise of the first set.
    pub fn start(routine: &Routine) -> Result<PlaybackPosition, TimerError> {
        routine.validate()?;
        Ok(PlaybackPosition::new(0, 1, Phase::Exercise))
    }

    /// Position that follows `position` once its phase has run out.
    ///
    /// Fails with [`TimerError::InvalidTransition`] for `Complete` and `Idle`.
    pub fn advance(
        routine: &Routine,
        position: &PlaybackPosition,
    ) -> Result<PlaybackPosition, TimerError> {
        let index = position.exercise_index;
        let set = position.set_index;
        let last = routine.exercises.len().saturating_sub(1);

        let next = match position.phase {
            Phase::Exercise if index < last => {
                if routine.rest_between_exercises > 0 {
                    PlaybackPosition::new(index, set, Phase::RestBetweenExercises)
                } else {
                    PlaybackPosition::new(index + 1, set, Phase::Exercise)
                }
            }
            Phase::Exercise if set < routine.sets => {
                if routine.rest_between_sets > 0 {
                    PlaybackPosition::new(index, set, Phase::RestBetweenSets)
                } else {
                    PlaybackPosition::new(0, set + 1, Phase::Exercise)
                }
            }
            Phase::Exercise => PlaybackPosition::new(index, set, Phase::Complete),
            Phase::RestBetweenExercises => PlaybackPosition::new(index + 1, set, Phase::Exercise),
            Phase::RestBetweenSets => PlaybackPosition::new(0, set + 1, Phase::Exercise),
            phase @ (Phase::Complete | Phase::Idle) => {
                return Err(TimerError::InvalidTransition { phase });
            }
        };

        Ok(next)
    }

    /// Name of the next exercise to be played after `position`, or an empty
    /// string when the session ends first. Does not mutate anything.
    pub fn lookahead(routine: &Routine, position: &PlaybackPosition) -> String {
        let mut cursor = *position;

        loop {
            cursor = match Self::advance(routine, &cursor) {
                Ok(next) => next,
                Err(_) => return String::new(),
            };

            match cursor.phase {
                Phase::Exercise => {
                    return routine
                        .exercises
                        .get(cursor.exercise_index)
                        .map(|e| e.name.clone())
                        .unwrap_or_default();
                }
                Phase::Complete => return String::new(),
                _ => {}
            }
        }
    }

    /// Display name for the phase at `position`
    pub fn label(routine: &Routine, position: &PlaybackPosition) -> String {
        match position.phase {
            Phase::Exercise => routine
                .exercises
                .get(position.exercise_index)
                .map(|e| e.name.clone())
                .unwrap_or_default(),
            Phase::RestBetweenExercises | Phase::RestBetweenSets => REST_LABEL.to_string(),
            Phase::Complete => COMPLETE_LABEL.to_string(),
            Phase::Idle => String::new(),
        }
    }

    /// Countdown length of the phase at `position`.
    ///
    /// `None` for phases without a countdown, including a rest configured as 0.
    pub fn phase_duration(routine: &Routine, position: &PlaybackPosition) -> Option<Duration> {
        let secs = match position.phase {
            Phase::Exercise => routine.exercises.get(position.exercise_index)?.duration,
            Phase::RestBetweenExercises => routine.rest_between_exercises,
            Phase::RestBetweenSets => routine.rest_between_sets,
            Phase::Complete | Phase::Idle => return None,
        };

        (secs > 0).then(|| Duration::from_secs(u64::from(secs)))
    }

    /// Every timed position of a full session, in playback order.
    pub fn plan(routine: &Routine) -> Result<Vec<PlaybackPosition>, TimerError> {
        let mut position = Self::start(routine)?;
        let mut plan = Vec::new();

        while position.phase != Phase::Complete {
            plan.push(position);
            position = Self::advance(routine, &position)?;
        }

        Ok(plan)
    }
}
