use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::models::Exercise;
use crate::utils::APP_NAME;

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(about = "Terminal interval-workout timer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Switch::On
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a saved routine
    Start {
        /// Name of the routine
        name: String,

        /// Single-line output instead of the full-screen UI; exits when done
        #[arg(long)]
        plain: bool,
    },

    /// List saved routines
    List,

    /// Show the intervals of a saved routine
    Show {
        /// Name of the routine
        name: String,
    },

    /// Create or overwrite a routine
    Save {
        /// Name of the routine
        name: String,

        /// Exercise as NAME:SECONDS, in order (repeatable)
        #[arg(short, long = "exercise", value_name = "NAME:SECONDS", required = true)]
        exercises: Vec<Exercise>,

        /// Number of times the exercise list is repeated
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        sets: u32,

        /// Rest between exercises in seconds (0 skips it)
        #[arg(long = "rest-exercises", value_name = "SECONDS", default_value_t = 0)]
        rest_exercises: u32,

        /// Rest between sets in seconds (0 skips it)
        #[arg(long = "rest-sets", value_name = "SECONDS", default_value_t = 0)]
        rest_sets: u32,
    },

    /// Import a routine from a .toml or .json file
    Import {
        /// Path to the routine file
        file: PathBuf,

        /// Name to save it under (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Delete a saved routine
    Delete {
        /// Name of the routine
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or change settings
    Settings {
        /// Beep during the last seconds of each interval
        #[arg(long, value_enum)]
        cue: Option<Switch>,

        /// How many final seconds get a beep
        #[arg(
            long = "cue-window",
            value_name = "SECONDS",
            value_parser = clap::value_parser!(u64).range(0..=60)
        )]
        cue_window: Option<u64>,

        /// Beep volume (0-100)
        #[arg(
            long = "cue-volume",
            value_name = "PERCENT",
            value_parser = clap::value_parser!(u8).range(0..=100)
        )]
        cue_volume: Option<u8>,

        /// Countdown refresh interval in milliseconds
        #[arg(
            long = "tick-ms",
            value_name = "MS",
            value_parser = clap::value_parser!(u64).range(10..=1000)
        )]
        tick_ms: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn save_collects_exercises_in_order() {
        let cli = Cli::try_parse_from([
            APP_NAME, "save", "Legs", "-e", "Push-ups:30", "-e", "Squats:20", "--sets", "2",
            "--rest-exercises", "10", "--rest-sets", "15",
        ])
        .unwrap();

        match cli.command {
            Commands::Save {
                name,
                exercises,
                sets,
                rest_exercises,
                rest_sets,
            } => {
                assert_eq!(name, "Legs");
                assert_eq!(
                    exercises,
                    vec![Exercise::new("Push-ups", 30), Exercise::new("Squats", 20)]
                );
                assert_eq!((sets, rest_exercises, rest_sets), (2, 10, 15));
            }
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn save_rejects_bad_input() {
        assert!(Cli::try_parse_from([APP_NAME, "save", "Legs"]).is_err());
        assert!(Cli::try_parse_from([APP_NAME, "save", "Legs", "-e", "Squats"]).is_err());
        assert!(Cli::try_parse_from([APP_NAME, "save", "Legs", "-e", "Squats:0"]).is_err());
        assert!(
            Cli::try_parse_from([APP_NAME, "save", "Legs", "-e", "Squats:20", "--sets", "0"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from([
                APP_NAME,
                "save",
                "Legs",
                "-e",
                "Squats:20",
                "--rest-sets",
                "-5"
            ])
            .is_err()
        );
    }

    #[test]
    fn settings_flags_are_optional_and_bounded() {
        let cli = Cli::try_parse_from([APP_NAME, "settings", "--cue", "off"]).unwrap();
        match cli.command {
            Commands::Settings {
                cue,
                cue_window,
                cue_volume,
                tick_ms,
            } => {
                assert_eq!(cue, Some(Switch::Off));
                assert!(cue_window.is_none() && cue_volume.is_none() && tick_ms.is_none());
            }
            _ => panic!("expected settings"),
        }

        assert!(Cli::try_parse_from([APP_NAME, "settings", "--cue-volume", "101"]).is_err());
        assert!(Cli::try_parse_from([APP_NAME, "settings", "--tick-ms", "5"]).is_err());
    }

    #[test]
    fn start_defaults_to_full_screen() {
        let cli = Cli::try_parse_from([APP_NAME, "start", "Legs"]).unwrap();
        assert!(matches!(cli.command, Commands::Start { plain: false, .. }));
    }
}
