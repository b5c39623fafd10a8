use crate::modules::session::scheduler::SessionToken;

/// All events that can occur in the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    // Session events
    Session(SessionEvent),

    // UI events
    Ui(UiEvent),

    // Application lifecycle
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A scheduled tick fired; stale tokens are dropped by the orchestrator
    Tick { token: SessionToken },

    /// The session reached the end of its last set
    Completed,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// User requested pause/resume toggle
    TogglePauseRequested,

    /// User requested to start (or restart) the routine
    StartRequested,

    /// User requested to stop and return to idle
    ResetRequested,

    /// User requested quit
    QuitRequested,
}

/// Type alias for event sender
pub type EventSender = crossbeam_channel::Sender<AppEvent>;

/// Type alias for event receiver
pub type EventReceiver = crossbeam_channel::Receiver<AppEvent>;
