use crate::cli_handlers::{CliCommand, open_library};
use crate::core::traits::RoutineRepository;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use crate::utils::APP_NAME;
use anyhow::Result;

pub struct ListCommand;

impl CliCommand for ListCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let library = open_library()?;
        let ui = TerminalRenderer::new();

        let routines = library.list();
        if routines.is_empty() {
            ui.print_error(&format!(
                "No routines saved. Run '{} save <name> -e \"Push-ups:30\"' first.",
                APP_NAME
            ));
            return Ok(());
        }

        ui.print_routine_list(&routines);

        Ok(())
    }
}
