use crate::application::state::ConfigState;
use crate::cli::Switch;
use crate::cli_handlers::{CliCommand, open_library};
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

pub struct SettingsCommand {
    pub cue: Option<Switch>,
    pub cue_window: Option<u64>,
    pub cue_volume: Option<u8>,
    pub tick_ms: Option<u64>,
}

impl SettingsCommand {
    fn has_changes(&self) -> bool {
        self.cue.is_some()
            || self.cue_window.is_some()
            || self.cue_volume.is_some()
            || self.tick_ms.is_some()
    }

    fn apply(&self, config: &mut ConfigState) {
        if let Some(cue) = self.cue {
            config.cue_enabled = cue.is_on();
        }
        if let Some(window) = self.cue_window {
            config.cue_window_secs = window;
        }
        if let Some(volume) = self.cue_volume {
            config.cue_volume = volume;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
    }
}

fn describe(config: &ConfigState) -> String {
    format!(
        "Cue: {} | Cue window: {}s | Cue volume: {}% | Tick: {}ms",
        if config.cue_enabled { "on" } else { "off" },
        config.cue_window_secs,
        config.cue_volume,
        config.tick_interval_ms,
    )
}

impl CliCommand for SettingsCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let mut library = open_library()?;
        let ui = TerminalRenderer::new();

        if self.has_changes() {
            library.update(|state| self.apply(&mut state.config))?;
            ui.print_message("Settings updated");
        }

        ui.print_message(&describe(&library.state().config));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> SettingsCommand {
        SettingsCommand {
            cue: None,
            cue_window: None,
            cue_volume: None,
            tick_ms: None,
        }
    }

    #[test]
    fn no_flags_means_show_only() {
        assert!(!command().has_changes());
    }

    #[test]
    fn only_given_fields_change() {
        let mut config = ConfigState::default();
        let cmd = SettingsCommand {
            cue: Some(Switch::Off),
            cue_volume: Some(80),
            ..command()
        };
        assert!(cmd.has_changes());

        cmd.apply(&mut config);
        assert!(!config.cue_enabled);
        assert_eq!(config.cue_volume, 80);
        assert_eq!(config.cue_window_secs, ConfigState::default().cue_window_secs);
        assert_eq!(config.tick_interval_ms, ConfigState::default().tick_interval_ms);
    }

    #[test]
    fn describe_lists_every_setting() {
        assert_eq!(
            describe(&ConfigState::default()),
            "Cue: on | Cue window: 3s | Cue volume: 40% | Tick: 100ms"
        );
    }
}
