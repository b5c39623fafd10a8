use crate::cli_handlers::{CliCommand, open_library};
use crate::core::traits::RoutineRepository;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;
use std::io::{self, BufRead, Write};

pub struct DeleteCommand {
    pub name: String,
    pub yes: bool,
}

fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn confirm(name: &str) -> Result<bool> {
    print!("Delete routine '{}'? [y/N] ", name);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_confirmation(&answer))
}

impl CliCommand for DeleteCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let mut library = open_library()?;
        let ui = TerminalRenderer::new();
        let name = self.name.trim();

        if let Err(e) = library.get(name) {
            ui.print_error(&e.to_string());
            return Ok(());
        }

        if !self.yes && !confirm(name)? {
            ui.print_message("Cancelled");
            return Ok(());
        }

        if library.delete(name)? {
            ui.print_message(&format!("Deleted '{}'", name));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_confirms() {
        assert!(is_confirmation("y\n"));
        assert!(is_confirmation(" YES "));
        assert!(!is_confirmation("\n"));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation("yep"));
    }
}
