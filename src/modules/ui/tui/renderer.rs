use crate::core::events::UiEvent;
use crate::core::models::{Phase, TickSnapshot};
use crate::core::traits::{PresentationSink, UiRenderer};
use crate::modules::ui::progress_formatter::{
    FormattedProgress, next_caption, phase_tag, set_caption,
};
use crate::utils::APP_NAME;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use std::io::{Stdout, stdout};
use std::time::Duration;

/// What the screen currently shows
#[derive(Debug, Clone, PartialEq)]
enum Screen {
    Idle,
    Running(TickSnapshot),
    Complete,
}

pub struct TuiRenderer {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    routine_name: String,
    screen: Screen,
    error: Option<String>,
}

impl TuiRenderer {
    pub fn new(routine_name: impl Into<String>) -> Self {
        Self {
            terminal: None,
            routine_name: routine_name.into(),
            screen: Screen::Idle,
            error: None,
        }
    }

    /// Draw one frame. The completed frame borrows the terminal, so only
    /// the outcome is kept.
    fn draw_frame<B>(&self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B: Backend,
        B::Error: Send + Sync + 'static,
    {
        terminal.draw(|f| self.draw_ui(f)).map(|_| ())?;
        Ok(())
    }

    fn draw_ui(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(7),    // Current interval
                Constraint::Length(3), // Progress
                Constraint::Length(3), // Controls / errors
            ])
            .split(f.area());

        self.draw_header(f, chunks[0]);
        self.draw_interval(f, chunks[1]);
        self.draw_progress(f, chunks[2]);
        self.draw_controls(f, chunks[3]);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(format!("{} - {}", APP_NAME, self.routine_name))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_interval(&self, f: &mut Frame, area: Rect) {
        let content = match &self.screen {
            Screen::Idle => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Ready",
                    Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Press s to start"),
            ],
            Screen::Complete => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Done!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Workout complete. Press s to go again or q to quit"),
            ],
            Screen::Running(snapshot) => {
                let progress = FormattedProgress::from_snapshot(snapshot);
                let status = if snapshot.paused {
                    Span::styled(
                        "PAUSED",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(
                        phase_tag(snapshot.phase),
                        Style::default()
                            .fg(phase_color(snapshot.phase))
                            .add_modifier(Modifier::BOLD),
                    )
                };

                vec![
                    Line::from(status),
                    Line::from(Span::styled(
                        snapshot.label.clone(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        progress.clock_text,
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(set_caption(snapshot)),
                    Line::from(Span::styled(
                        next_caption(snapshot),
                        Style::default().fg(Color::Gray),
                    )),
                ]
            }
        };

        let paragraph = Paragraph::new(content)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Interval "));
        f.render_widget(paragraph, area);
    }

    fn draw_progress(&self, f: &mut Frame, area: Rect) {
        let (ratio, label, color) = match &self.screen {
            Screen::Running(snapshot) => {
                let progress = FormattedProgress::from_snapshot(snapshot);
                (
                    (snapshot.percent_elapsed / 100.0).clamp(0.0, 1.0),
                    progress.combined_label,
                    phase_color(snapshot.phase),
                )
            }
            Screen::Complete => (1.0, "Done!".to_string(), Color::Green),
            Screen::Idle => (0.0, String::new(), Color::DarkGray),
        };

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Progress "))
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio(ratio)
            .label(label);
        f.render_widget(gauge, area);
    }

    fn draw_controls(&self, f: &mut Frame, area: Rect) {
        let line = match &self.error {
            Some(message) => Line::from(Span::styled(
                format!("Error: {}", message),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            None => Line::from(vec![
                Span::raw("Space/p: Pause/Resume • "),
                Span::raw("s: Start/Restart • "),
                Span::raw("r: Reset • "),
                Span::raw("q: Quit"),
            ]),
        };

        let controls = Paragraph::new(vec![line])
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title(" Controls "));
        f.render_widget(controls, area);
    }
}

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Exercise => Color::Green,
        Phase::RestBetweenExercises => Color::Blue,
        Phase::RestBetweenSets => Color::Magenta,
        Phase::Complete => Color::Green,
        Phase::Idle => Color::DarkGray,
    }
}

impl PresentationSink for TuiRenderer {
    fn render(&mut self, snapshot: &TickSnapshot) {
        self.error = None;
        self.screen = Screen::Running(snapshot.clone());
    }

    fn render_complete(&mut self) {
        self.screen = Screen::Complete;
    }

    fn render_idle(&mut self) {
        self.screen = Screen::Idle;
    }

    fn render_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

impl UiRenderer for TuiRenderer {
    fn init(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        self.terminal = Some(Terminal::new(backend)?);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        if let Some(mut terminal) = self.terminal.take() {
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()?;
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let mut terminal = match self.terminal.take() {
            Some(t) => t,
            None => return Ok(()),
        };

        let result = self.draw_frame(&mut terminal);
        self.terminal = Some(terminal);
        result
    }

    fn poll_input(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(events);
                }

                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        events.push(UiEvent::QuitRequested);
                    }
                    KeyCode::Char('q') | KeyCode::Esc => {
                        events.push(UiEvent::QuitRequested);
                    }
                    KeyCode::Char(' ') | KeyCode::Char('p') => {
                        events.push(UiEvent::TogglePauseRequested);
                    }
                    KeyCode::Char('s') => {
                        events.push(UiEvent::StartRequested);
                    }
                    KeyCode::Char('r') => {
                        events.push(UiEvent::ResetRequested);
                    }
                    _ => {}
                }
            }
        }

        Ok(events)
    }
}
