use crate::core::error::TimerError;
use crate::core::events::UiEvent;
use crate::core::models::{Phase, Routine, TickSnapshot};
use crate::core::traits::{PresentationSink, UiRenderer};
use crate::modules::session::sequencer::Sequencer;
use crate::modules::ui::progress_formatter::{
    FormattedProgress, format_duration_compact, next_caption, phase_tag, set_caption, text_bar,
};
use anyhow::Result;
use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
};
use std::io::{Write, stdout};
use std::time::Duration;

const BAR_WIDTH: usize = 24;

/// Single-line renderer for plain terminals and `--plain` sessions.
pub struct TerminalRenderer {
    initialized: bool,
    line: String,
    dirty: bool,
    finished: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            initialized: false,
            line: String::new(),
            dirty: false,
            finished: false,
        }
    }

    pub fn print_message(&self, message: &str) {
        println!("{}", message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    pub fn print_routine_list(&self, routines: &[(String, Result<Routine, TimerError>)]) {
        let total = routines.len();
        for (index, (name, routine)) in routines.iter().enumerate() {
            println!("[{}/{}] {}", index + 1, total, list_entry(name, routine));
        }
    }

    pub fn print_routine(&self, name: &str, routine: &Routine) {
        println!("{}", routine_summary(name, routine));
        println!(
            "  Rest between exercises: {}s | Rest between sets: {}s",
            routine.rest_between_exercises, routine.rest_between_sets
        );

        match Sequencer::plan(routine) {
            Ok(plan) => {
                for position in plan {
                    let secs = Sequencer::phase_duration(routine, &position)
                        .map(|d| d.as_secs())
                        .unwrap_or(0);
                    println!(
                        "  set {} {:>8}  {} ({}s)",
                        position.set_index,
                        phase_tag(position.phase),
                        Sequencer::label(routine, &position),
                        secs
                    );
                }
            }
            Err(e) => self.print_error(&e.to_string()),
        }
    }

    /// Text of the status line for one snapshot
    pub fn status_line(snapshot: &TickSnapshot) -> String {
        let progress = FormattedProgress::from_snapshot(snapshot);
        let mut line = format!(
            "{} {} {} {} | {}",
            phase_tag(snapshot.phase),
            snapshot.label,
            text_bar(snapshot.percent_elapsed, BAR_WIDTH),
            progress.clock_text,
            set_caption(snapshot),
        );

        let next = next_caption(snapshot);
        if !next.is_empty() {
            line.push_str(" | ");
            line.push_str(&next);
        }
        if snapshot.paused {
            line.push_str(" | PAUSED");
        }
        line
    }

    fn set_line(&mut self, line: String) {
        if line != self.line {
            self.line = line;
            self.dirty = true;
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn list_entry(name: &str, routine: &Result<Routine, TimerError>) -> String {
    match routine {
        Ok(routine) => routine_summary(name, routine),
        Err(e) => format!("{} - unplayable ({})", name, e),
    }
}

/// "Legs - 2 exercises x 3 sets (4:15)"
pub fn routine_summary(name: &str, routine: &Routine) -> String {
    format!(
        "{} - {} exercise{} x {} set{} ({})",
        name,
        routine.exercises.len(),
        if routine.exercises.len() == 1 { "" } else { "s" },
        routine.sets,
        if routine.sets == 1 { "" } else { "s" },
        format_duration_compact(routine.total_duration()),
    )
}

impl PresentationSink for TerminalRenderer {
    fn render(&mut self, snapshot: &TickSnapshot) {
        self.finished = false;
        self.set_line(Self::status_line(snapshot));
    }

    fn render_complete(&mut self) {
        self.finished = true;
        self.set_line(format!("{} Workout complete", phase_tag(Phase::Complete)));
    }

    fn render_idle(&mut self) {
        self.finished = false;
        self.set_line("Stopped | [S: Start | Q: Quit]".to_string());
    }

    fn render_error(&mut self, message: &str) {
        self.set_line(format!("ERROR: {}", message));
    }
}

impl UiRenderer for TerminalRenderer {
    fn init(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.initialized = true;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.initialized {
            terminal::disable_raw_mode()?;
            self.initialized = false;
            println!();
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let mut stdout = stdout();
        stdout.execute(cursor::MoveToColumn(0))?;
        stdout.execute(terminal::Clear(ClearType::CurrentLine))?;

        print!("{}", self.line);
        if !self.finished {
            print!(" | [Space: Pause | R: Reset | Q: Quit]");
        }

        stdout.flush()?;
        self.dirty = false;
        Ok(())
    }

    fn poll_input(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        events.push(UiEvent::QuitRequested);
                    }
                    KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                        events.push(UiEvent::TogglePauseRequested);
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        events.push(UiEvent::ResetRequested);
                    }
                    KeyCode::Char('s') | KeyCode::Char('S') => {
                        events.push(UiEvent::StartRequested);
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        events.push(UiEvent::QuitRequested);
                    }
                    _ => {}
                }
            }
        }

        Ok(events)
    }

    fn exits_on_complete(&self) -> bool {
        true
    }
}
