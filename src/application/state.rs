use crate::core::models::RoutineRecord;
use crate::utils::{DEFAULT_CUE_VOLUME, DEFAULT_CUE_WINDOW_SECS, DEFAULT_TICK_INTERVAL_MS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Everything persisted in `db.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub config: ConfigState,

    /// Saved routines keyed by name, kept as stored.
    /// Each one is validated when it is looked up, so a bad entry never
    /// hides the others.
    #[serde(default)]
    pub routines: BTreeMap<String, RoutineRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Play a beep during the last seconds of every interval
    pub cue_enabled: bool,

    /// How many final seconds get a beep
    pub cue_window_secs: u64,

    /// Beep volume (0-100)
    pub cue_volume: u8,

    /// How often the countdown is recomputed and redrawn
    pub tick_interval_ms: u64,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            cue_enabled: true,
            cue_window_secs: DEFAULT_CUE_WINDOW_SECS,
            cue_volume: DEFAULT_CUE_VOLUME,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl ConfigState {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_loads_defaults() {
        let state: AppState = serde_json::from_str("{}").unwrap();
        assert!(state.routines.is_empty());
        assert_eq!(state.config, ConfigState::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let state: AppState = serde_json::from_str(r#"{"config":{"cue_enabled":false}}"#).unwrap();
        assert!(!state.config.cue_enabled);
        assert_eq!(state.config.cue_window_secs, DEFAULT_CUE_WINDOW_SECS);
    }

    #[test]
    fn tick_interval_is_never_zero() {
        let config = ConfigState {
            tick_interval_ms: 0,
            ..ConfigState::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }
}
