use crate::cli_handlers::{CliCommand, open_library};
use crate::core::models::{Exercise, Routine};
use crate::core::traits::RoutineRepository;
use crate::modules::ui::terminal::renderer::{TerminalRenderer, routine_summary};
use anyhow::Result;

pub struct SaveCommand {
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub sets: u32,
    pub rest_exercises: u32,
    pub rest_sets: u32,
}

impl SaveCommand {
    /// Build the routine and store it, returning what was saved
    fn save_into(self, repo: &mut dyn RoutineRepository) -> Result<(String, Routine)> {
        let routine = Routine::new(self.exercises, self.sets, self.rest_exercises, self.rest_sets)?;
        let name = self.name.trim().to_string();
        repo.save(&name, routine.clone())?;
        Ok((name, routine))
    }
}

impl CliCommand for SaveCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let mut library = open_library()?;
        let ui = TerminalRenderer::new();

        let (name, routine) = (*self).save_into(&mut library)?;
        ui.print_message(&format!("Saved {}", routine_summary(&name, &routine)));

        Ok(())
    }
}
