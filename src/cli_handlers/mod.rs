mod delete;
mod import;
mod list;
mod save;
mod settings;
mod show;
mod start;

pub use delete::DeleteCommand;
pub use import::ImportCommand;
pub use list::ListCommand;
pub use save::SaveCommand;
pub use settings::SettingsCommand;
pub use show::ShowCommand;
pub use start::StartCommand;

use crate::cli::Commands;
use crate::modules::library::routine_library::RoutineLibrary;
use crate::modules::storage::json_backend::JsonStorageBackend;
use anyhow::Result;

/// Every CLI command implements this trait.
///
/// Commands own their arguments and are consumed on execution; they run exactly once.
pub trait CliCommand {
    fn execute(self: Box<Self>) -> Result<()>;
}

/// Converts a parsed [`Commands`] variant into a boxed [`CliCommand`] ready to execute.
pub fn from_cli(cmd: Commands) -> Box<dyn CliCommand> {
    match cmd {
        Commands::Start { name, plain } => Box::new(StartCommand { name, plain }),
        Commands::List => Box::new(ListCommand),
        Commands::Show { name } => Box::new(ShowCommand { name }),
        Commands::Save {
            name,
            exercises,
            sets,
            rest_exercises,
            rest_sets,
        } => Box::new(SaveCommand {
            name,
            exercises,
            sets,
            rest_exercises,
            rest_sets,
        }),
        Commands::Import { file, name } => Box::new(ImportCommand { file, name }),
        Commands::Delete { name, yes } => Box::new(DeleteCommand { name, yes }),
        Commands::Settings {
            cue,
            cue_window,
            cue_volume,
            tick_ms,
        } => Box::new(SettingsCommand {
            cue,
            cue_window,
            cue_volume,
            tick_ms,
        }),
    }
}

/// Routine library stored in the user's config directory
fn open_library() -> Result<RoutineLibrary> {
    RoutineLibrary::open(Box::new(JsonStorageBackend::new()?))
}
