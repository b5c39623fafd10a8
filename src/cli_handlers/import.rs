use crate::cli_handlers::{CliCommand, open_library};
use crate::core::traits::RoutineRepository;
use crate::modules::storage::routine_file::load_routine_file;
use crate::modules::ui::terminal::renderer::{TerminalRenderer, routine_summary};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct ImportCommand {
    pub file: PathBuf,
    pub name: Option<String>,
}

/// Explicit name, or the file name without its extension
fn routine_name(file: &Path, name: Option<&str>) -> Option<String> {
    let name = match name {
        Some(name) => Some(name.trim().to_string()),
        None => file
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.trim().to_string()),
    };
    name.filter(|name| !name.is_empty())
}

impl CliCommand for ImportCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let routine = load_routine_file(&self.file)?;
        let name = routine_name(&self.file, self.name.as_deref())
            .with_context(|| format!("Cannot derive a routine name from {}", self.file.display()))?;

        let mut library = open_library()?;
        let replaced = library.get(&name).is_ok();
        library.save(&name, routine.clone())?;

        let ui = TerminalRenderer::new();
        let verb = if replaced { "Replaced" } else { "Imported" };
        ui.print_message(&format!("{} {}", verb, routine_summary(&name, &routine)));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_defaults_to_file_stem() {
        assert_eq!(
            routine_name(Path::new("/tmp/Leg Day.toml"), None),
            Some("Leg Day".to_string())
        );
    }

    #[test]
    fn explicit_name_wins() {
        assert_eq!(
            routine_name(Path::new("legs.json"), Some(" Legs ")),
            Some("Legs".to_string())
        );
        assert_eq!(routine_name(Path::new("legs.json"), Some("  ")), None);
    }
}
