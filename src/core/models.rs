use crate::core::error::TimerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A single timed exercise inside a routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    /// Duration in seconds (always > 0 once validated)
    pub duration: u32,
}

impl Exercise {
    pub fn new(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Parses the `"Name:seconds"` form used on the command line.
impl FromStr for Exercise {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, secs) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected NAME:SECONDS, got '{}'", s))?;

        let name = name.trim();
        if name.is_empty() {
            return Err("exercise name must not be empty".to_string());
        }

        let duration: u32 = secs
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration '{}' for '{}'", secs.trim(), name))?;
        if duration == 0 {
            return Err(format!("duration of '{}' must be greater than zero", name));
        }

        Ok(Exercise::new(name, duration))
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s)", self.name, self.duration)
    }
}

/// A named workout: an ordered exercise list repeated `sets` times.
///
/// Rest values of 0 mean "no rest". Always serialized through [`RoutineRecord`]
/// so that anything read back from disk is validated on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoutineRecord", into = "RoutineRecord")]
pub struct Routine {
    pub exercises: Vec<Exercise>,
    pub sets: u32,
    pub rest_between_exercises: u32,
    pub rest_between_sets: u32,
}

impl Routine {
    pub fn new(
        exercises: Vec<Exercise>,
        sets: u32,
        rest_between_exercises: u32,
        rest_between_sets: u32,
    ) -> Result<Self, TimerError> {
        let routine = Self {
            exercises,
            sets,
            rest_between_exercises,
            rest_between_sets,
        };
        routine.validate()?;
        Ok(routine)
    }

    pub fn validate(&self) -> Result<(), TimerError> {
        if self.exercises.is_empty() {
            return Err(TimerError::invalid_routine("routine has no exercises"));
        }
        if self.sets == 0 {
            return Err(TimerError::invalid_routine("sets must be at least 1"));
        }

        for (i, exercise) in self.exercises.iter().enumerate() {
            if exercise.name.trim().is_empty() {
                return Err(TimerError::invalid_routine(format!(
                    "exercise #{} has an empty name",
                    i + 1
                )));
            }
            if exercise.duration == 0 {
                return Err(TimerError::invalid_routine(format!(
                    "exercise '{}' has a zero duration",
                    exercise.name
                )));
            }
        }

        Ok(())
    }

    /// Planned wall time of a full session, rests included.
    /// Saturates at `u64::MAX` seconds for absurdly long routines.
    pub fn total_duration(&self) -> Duration {
        let sets = u64::from(self.sets);
        let per_set = self
            .exercises
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(u64::from(e.duration)));
        let rests_per_set = self.exercises.len().saturating_sub(1) as u64;

        let exercise_secs = per_set.saturating_mul(sets);
        let rbe_secs = rests_per_set
            .saturating_mul(u64::from(self.rest_between_exercises))
            .saturating_mul(sets);
        let rbs_secs = sets
            .saturating_sub(1)
            .saturating_mul(u64::from(self.rest_between_sets));

        Duration::from_secs(
            exercise_secs
                .saturating_add(rbe_secs)
                .saturating_add(rbs_secs),
        )
    }
}

/// On-disk shape of a routine.
///
/// Keys match the records the browser version kept in `localStorage`, and
/// numbers are signed so negative values are reported as invalid routines
/// instead of opaque parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineRecord {
    #[serde(default)]
    pub exercises: Vec<ExerciseRecord>,
    #[serde(default = "default_sets")]
    pub sets: i64,
    #[serde(default)]
    pub rest_between_exercises: i64,
    #[serde(default)]
    pub rest_between_sets: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub name: String,
    pub duration: i64,
}

fn default_sets() -> i64 {
    1
}

fn non_negative(value: i64, field: &str) -> Result<u32, TimerError> {
    if value < 0 {
        return Err(TimerError::invalid_routine(format!(
            "{} must not be negative (got {})",
            field, value
        )));
    }
    u32::try_from(value)
        .map_err(|_| TimerError::invalid_routine(format!("{} is too large ({})", field, value)))
}

impl TryFrom<RoutineRecord> for Routine {
    type Error = TimerError;

    fn try_from(record: RoutineRecord) -> Result<Self, Self::Error> {
        let exercises = record
            .exercises
            .into_iter()
            .map(|e| {
                let duration = non_negative(e.duration, "duration")?;
                Ok(Exercise::new(e.name.trim(), duration))
            })
            .collect::<Result<Vec<_>, TimerError>>()?;

        Routine::new(
            exercises,
            non_negative(record.sets, "sets")?,
            non_negative(record.rest_between_exercises, "restBetweenExercises")?,
            non_negative(record.rest_between_sets, "restBetweenSets")?,
        )
    }
}

impl From<Routine> for RoutineRecord {
    fn from(routine: Routine) -> Self {
        Self {
            exercises: routine
                .exercises
                .into_iter()
                .map(|e| ExerciseRecord {
                    name: e.name,
                    duration: i64::from(e.duration),
                })
                .collect(),
            sets: i64::from(routine.sets),
            rest_between_exercises: i64::from(routine.rest_between_exercises),
            rest_between_sets: i64::from(routine.rest_between_sets),
        }
    }
}

/// Mutually exclusive states of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Exercise,
    RestBetweenExercises,
    RestBetweenSets,
    Complete,
    Idle,
}

impl Phase {
    /// Returns `true` while a countdown is attached to the phase.
    pub fn is_timed(self) -> bool {
        matches!(
            self,
            Phase::Exercise | Phase::RestBetweenExercises | Phase::RestBetweenSets
        )
    }
}

/// Where a session currently is inside its routine.
///
/// `exercise_index` is only meaningful for `Exercise` and
/// `RestBetweenExercises`; `set_index` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackPosition {
    pub exercise_index: usize,
    pub set_index: u32,
    pub phase: Phase,
}

impl PlaybackPosition {
    pub const fn new(exercise_index: usize, set_index: u32, phase: Phase) -> Self {
        Self {
            exercise_index,
            set_index,
            phase,
        }
    }

    pub const fn idle() -> Self {
        Self::new(0, 1, Phase::Idle)
    }
}

impl Default for PlaybackPosition {
    fn default() -> Self {
        Self::idle()
    }
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSnapshot {
    pub phase: Phase,
    pub label: String,
    /// Upcoming exercise name, empty when the session ends next
    pub next_label: String,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub percent_elapsed: f64,
    pub set_index: u32,
    pub sets: u32,
    pub paused: bool,
}
