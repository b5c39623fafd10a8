use crate::application::app::Application;
use crate::cli_handlers::{CliCommand, open_library};
use crate::core::traits::{RoutineRepository, UiRenderer};
use crate::modules::audio::cue_backend::cue_backend_for;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use crate::modules::ui::tui::renderer::TuiRenderer;
use crate::utils::APP_NAME;
use anyhow::Result;

pub struct StartCommand {
    pub name: String,
    pub plain: bool,
}

impl CliCommand for StartCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let library = open_library()?;

        let routine = match library.get(&self.name) {
            Ok(routine) => routine,
            Err(e) => {
                let ui = TerminalRenderer::new();
                ui.print_error(&format!("{}. Run '{} list' to see saved routines.", e, APP_NAME));
                return Ok(());
            }
        };

        let config = library.state().config.clone();
        let ui_renderer: Box<dyn UiRenderer> = if self.plain {
            Box::new(TerminalRenderer::new())
        } else {
            Box::new(TuiRenderer::new(self.name.trim()))
        };

        let mut app = Application::new(routine, &config, ui_renderer, cue_backend_for(&config));

        // Terminal must be restored even if the loop fails
        let result = app.init().and_then(|_| app.run());
        app.cleanup()?;
        result
    }
}
