use crate::application::state::AppState;
use crate::core::error::TimerError;
use crate::core::events::UiEvent;
use crate::core::models::{Routine, TickSnapshot};
use anyhow::Result;

/// Abstraction for persistent storage
pub trait StorageBackend: Send {
    /// Load application state
    fn load(&self) -> Result<AppState>;

    /// Save application state
    fn save(&self, state: &AppState) -> Result<()>;
}

/// Named routine store. The playback core only ever calls [`get`](Self::get).
pub trait RoutineRepository {
    /// Look up a routine by name
    fn get(&self, name: &str) -> Result<Routine, TimerError>;

    /// All routines, sorted by name. Entries that fail validation carry the error.
    fn list(&self) -> Vec<(String, Result<Routine, TimerError>)>;

    /// Create or overwrite a routine
    fn save(&mut self, name: &str, routine: Routine) -> Result<()>;

    /// Remove a routine. Returns `false` if it did not exist.
    fn delete(&mut self, name: &str) -> Result<bool>;
}

/// Receives the session's output on every tick
pub trait PresentationSink {
    /// Show the current phase, clock and progress
    fn render(&mut self, snapshot: &TickSnapshot);

    /// Called once when the last phase finishes
    fn render_complete(&mut self);

    /// Called when the session is reset
    fn render_idle(&mut self);

    /// Surface a problem to the user without stopping the UI
    fn render_error(&mut self, message: &str);
}

/// Plays the near-end-of-interval cue
pub trait CueSink {
    fn cue(&mut self);
}

/// Abstraction for UI rendering
pub trait UiRenderer: PresentationSink {
    /// Initialize the UI (setup terminal, etc.)
    fn init(&mut self) -> Result<()>;

    /// Cleanup the UI (restore terminal, etc.)
    fn cleanup(&mut self) -> Result<()>;

    /// Draw the latest state pushed through [`PresentationSink`]
    fn draw(&mut self) -> Result<()>;

    /// Poll for user input (non-blocking)
    /// Returns events generated from user input
    fn poll_input(&mut self) -> Result<Vec<UiEvent>>;

    /// Whether the event loop should stop by itself once the routine completes
    fn exits_on_complete(&self) -> bool {
        false
    }
}
