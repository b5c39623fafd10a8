use crate::application::orchestrator::{Orchestrator, SessionSinks, TickOutcome};
use crate::application::state::ConfigState;
use crate::core::error::TimerError;
use crate::core::events::*;
use crate::core::models::Routine;
use crate::core::traits::{CueSink, UiRenderer};
use anyhow::{Context, Result};
use crossbeam_channel::bounded;
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Runs one routine in the terminal until the user quits
pub struct Application {
    event_tx: EventSender,
    event_rx: EventReceiver,

    orchestrator: Orchestrator,
    routine: Routine,
    frame_interval: Duration,

    // Module references
    ui_renderer: Box<dyn UiRenderer>,
    cue_sink: Box<dyn CueSink>,

    running: bool,
}

impl Application {
    pub fn new(
        routine: Routine,
        config: &ConfigState,
        ui_renderer: Box<dyn UiRenderer>,
        cue_sink: Box<dyn CueSink>,
    ) -> Self {
        let (tx, rx) = bounded(100);
        let tick_interval = config.tick_interval();

        Self {
            event_tx: tx,
            event_rx: rx,
            orchestrator: Orchestrator::new(tick_interval, config.cue_window_secs),
            routine,
            frame_interval: FRAME_INTERVAL.min(tick_interval),
            ui_renderer,
            cue_sink,
            running: false,
        }
    }

    /// Set up the terminal and start the routine
    pub fn init(&mut self) -> Result<()> {
        self.ui_renderer.init()?;

        let mut sinks = SessionSinks {
            presentation: self.ui_renderer.as_mut(),
            cue: self.cue_sink.as_mut(),
        };
        self.orchestrator
            .start(self.routine.clone(), Instant::now(), &mut sinks)
            .context("Could not start routine")?;

        Ok(())
    }

    /// Run the main event loop
    pub fn run(&mut self) -> Result<()> {
        self.running = true;

        while self.running {
            if let Some(token) = self.orchestrator.poll_due(Instant::now()) {
                self.event_tx
                    .send(AppEvent::Session(SessionEvent::Tick { token }))?;
            }

            for event in self.ui_renderer.poll_input()? {
                self.event_tx.send(AppEvent::Ui(event))?;
            }

            self.process_events()?;
            self.ui_renderer.draw()?;

            std::thread::sleep(self.frame_interval);
        }

        Ok(())
    }

    /// Process all pending events in the queue
    fn process_events(&mut self) -> Result<()> {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Session(se) => self.handle_session_event(se)?,
            AppEvent::Ui(ue) => self.handle_ui_event(ue)?,
            AppEvent::Shutdown => {
                self.running = false;
            }
        }
        Ok(())
    }

    fn handle_session_event(&mut self, event: SessionEvent) -> Result<()> {
        match event {
            SessionEvent::Tick { token } => {
                let mut sinks = SessionSinks {
                    presentation: self.ui_renderer.as_mut(),
                    cue: self.cue_sink.as_mut(),
                };
                let outcome = self.orchestrator.on_tick(token, Instant::now(), &mut sinks);

                if outcome == TickOutcome::Completed {
                    self.event_tx
                        .send(AppEvent::Session(SessionEvent::Completed))?;
                }
            }

            SessionEvent::Completed => {
                if self.ui_renderer.exits_on_complete() {
                    self.event_tx.send(AppEvent::Shutdown)?;
                }
            }
        }
        Ok(())
    }

    fn handle_ui_event(&mut self, event: UiEvent) -> Result<()> {
        let now = Instant::now();
        let mut sinks = SessionSinks {
            presentation: self.ui_renderer.as_mut(),
            cue: self.cue_sink.as_mut(),
        };

        match event {
            UiEvent::TogglePauseRequested => {
                self.orchestrator.toggle_pause(now, &mut sinks);
            }

            UiEvent::StartRequested => {
                let started = match self.orchestrator.restart(now, &mut sinks) {
                    Err(TimerError::NotRunning) => {
                        self.orchestrator.start(self.routine.clone(), now, &mut sinks)
                    }
                    other => other,
                };

                // Validation failures are already on screen
                if started.is_err() {
                    self.orchestrator.reset(&mut sinks);
                }
            }

            UiEvent::ResetRequested => {
                self.orchestrator.reset(&mut sinks);
            }

            UiEvent::QuitRequested => {
                self.event_tx.send(AppEvent::Shutdown)?;
            }
        }

        Ok(())
    }

    /// Restore the terminal
    pub fn cleanup(&mut self) -> Result<()> {
        let mut sinks = SessionSinks {
            presentation: self.ui_renderer.as_mut(),
            cue: self.cue_sink.as_mut(),
        };
        if self.orchestrator.is_active() {
            self.orchestrator.reset(&mut sinks);
        }

        self.ui_renderer.cleanup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Exercise, Phase, TickSnapshot};
    use crate::core::traits::PresentationSink;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct ScriptedUi {
        log: Log,
        exits_on_complete: bool,
    }

    impl PresentationSink for ScriptedUi {
        fn render(&mut self, snapshot: &TickSnapshot) {
            self.log.borrow_mut().push(format!(
                "render {:?} {} paused={}",
                snapshot.phase, snapshot.label, snapshot.paused
            ));
        }

        fn render_complete(&mut self) {
            self.log.borrow_mut().push("complete".to_string());
        }

        fn render_idle(&mut self) {
            self.log.borrow_mut().push("idle".to_string());
        }

        fn render_error(&mut self, message: &str) {
            self.log.borrow_mut().push(format!("error {}", message));
        }
    }

    impl UiRenderer for ScriptedUi {
        fn init(&mut self) -> Result<()> {
            self.log.borrow_mut().push("init".to_string());
            Ok(())
        }

        fn cleanup(&mut self) -> Result<()> {
            self.log.borrow_mut().push("cleanup".to_string());
            Ok(())
        }

        fn draw(&mut self) -> Result<()> {
            Ok(())
        }

        fn poll_input(&mut self) -> Result<Vec<UiEvent>> {
            Ok(Vec::new())
        }

        fn exits_on_complete(&self) -> bool {
            self.exits_on_complete
        }
    }

    struct NoCue;

    impl CueSink for NoCue {
        fn cue(&mut self) {}
    }

    fn app(exits_on_complete: bool) -> (Application, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let routine = Routine::new(
            vec![Exercise::new("Push-ups", 30), Exercise::new("Squats", 20)],
            2,
            10,
            15,
        )
        .unwrap();
        let ui = ScriptedUi {
            log: Rc::clone(&log),
            exits_on_complete,
        };
        let app = Application::new(routine, &ConfigState::default(), Box::new(ui), Box::new(NoCue));
        (app, log)
    }

    fn last(log: &Log) -> String {
        log.borrow().last().cloned().unwrap_or_default()
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    #[test]
    fn init_starts_the_first_exercise() {
        let (mut app, log) = app(false);
        app.init().unwrap();

        assert_eq!(log.borrow()[0], "init");
        assert_eq!(last(&log), "render Exercise Push-ups paused=false");
        assert_eq!(app.orchestrator.phase(), Phase::Exercise);
    }

    #[test]
    fn cleanup_resets_and_restores_terminal() {
        let (mut app, log) = app(false);
        app.init().unwrap();
        app.cleanup().unwrap();

        let log = log.borrow();
        assert_eq!(log[log.len() - 2], "idle");
        assert_eq!(log[log.len() - 1], "cleanup");
    }

    // ── Key handling ─────────────────────────────────────────────────────────

    #[test]
    fn pause_key_toggles() {
        let (mut app, log) = app(false);
        app.init().unwrap();

        app.handle_event(AppEvent::Ui(UiEvent::TogglePauseRequested)).unwrap();
        assert!(app.orchestrator.is_paused());
        assert_eq!(last(&log), "render Exercise Push-ups paused=true");

        app.handle_event(AppEvent::Ui(UiEvent::TogglePauseRequested)).unwrap();
        assert!(!app.orchestrator.is_paused());
    }

    #[test]
    fn reset_then_start_begins_again() {
        let (mut app, log) = app(false);
        app.init().unwrap();

        app.handle_event(AppEvent::Ui(UiEvent::ResetRequested)).unwrap();
        assert_eq!(app.orchestrator.phase(), Phase::Idle);
        assert_eq!(last(&log), "idle");

        app.handle_event(AppEvent::Ui(UiEvent::StartRequested)).unwrap();
        assert_eq!(app.orchestrator.phase(), Phase::Exercise);
        assert_eq!(last(&log), "render Exercise Push-ups paused=false");
    }

    #[test]
    fn start_key_mid_session_restarts() {
        let (mut app, log) = app(false);
        app.init().unwrap();
        app.handle_event(AppEvent::Ui(UiEvent::TogglePauseRequested)).unwrap();

        app.handle_event(AppEvent::Ui(UiEvent::StartRequested)).unwrap();

        let log = log.borrow();
        assert_eq!(log[log.len() - 2], "idle");
        assert_eq!(log[log.len() - 1], "render Exercise Push-ups paused=false");
        assert!(!app.orchestrator.is_paused());
    }

    #[test]
    fn quit_stops_the_loop() {
        let (mut app, _log) = app(false);
        app.init().unwrap();
        app.running = true;

        app.event_tx
            .send(AppEvent::Ui(UiEvent::QuitRequested))
            .unwrap();
        app.process_events().unwrap();

        assert!(!app.running);
    }

    // ── Completion ───────────────────────────────────────────────────────────

    #[test]
    fn plain_renderer_exits_on_completion() {
        let (mut app, _log) = app(true);
        app.running = true;

        app.handle_event(AppEvent::Session(SessionEvent::Completed)).unwrap();
        app.process_events().unwrap();

        assert!(!app.running);
    }

    #[test]
    fn full_screen_renderer_stays_open_on_completion() {
        let (mut app, _log) = app(false);
        app.running = true;

        app.handle_event(AppEvent::Session(SessionEvent::Completed)).unwrap();
        app.process_events().unwrap();

        assert!(app.running);
    }
}
