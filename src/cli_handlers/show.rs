use crate::cli_handlers::{CliCommand, open_library};
use crate::core::traits::RoutineRepository;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

pub struct ShowCommand {
    pub name: String,
}

impl CliCommand for ShowCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let library = open_library()?;
        let ui = TerminalRenderer::new();

        match library.get(&self.name) {
            Ok(routine) => ui.print_routine(self.name.trim(), &routine),
            Err(e) => ui.print_error(&e.to_string()),
        }

        Ok(())
    }
}
