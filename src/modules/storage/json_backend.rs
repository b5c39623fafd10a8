use crate::application::state::AppState;
use crate::core::traits::StorageBackend;
use crate::utils::APP_NAME;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Stores the whole [`AppState`] as pretty-printed JSON in the user's config directory.
pub struct JsonStorageBackend {
    file_path: PathBuf,
}

impl JsonStorageBackend {
    pub fn new() -> Result<Self> {
        let mut path = dirs::config_dir().context("Could not find config directory")?;
        path.push(APP_NAME);

        fs::create_dir_all(&path)
            .with_context(|| format!("Could not create {}", path.display()))?;

        path.push("db.json");
        Ok(Self { file_path: path })
    }

    /// Use an explicit database file (parent directories are created on save)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
        }
    }
}

impl StorageBackend for JsonStorageBackend {
    fn load(&self) -> Result<AppState> {
        if !self.file_path.exists() {
            return Ok(AppState::default());
        }
        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Could not read {}", self.file_path.display()))?;
        let state: AppState = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt database at {}", self.file_path.display()))?;
        Ok(state)
    }

    fn save(&self, state: &AppState) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Could not write {}", self.file_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Exercise, Routine, RoutineRecord};

    #[test]
    fn missing_file_loads_default_state() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonStorageBackend::with_path(dir.path().join("db.json"));
        let state = backend.load().unwrap();
        assert!(state.routines.is_empty());
    }

    #[test]
    fn saved_state_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonStorageBackend::with_path(dir.path().join("nested").join("db.json"));

        let mut state = AppState::default();
        state.config.cue_enabled = false;
        state.routines.insert(
            "Morning".to_string(),
            RoutineRecord::from(Routine::new(vec![Exercise::new("Plank", 45)], 3, 0, 30).unwrap()),
        );
        backend.save(&state).unwrap();

        let loaded = backend.load().unwrap();
        assert!(!loaded.config.cue_enabled);
        assert_eq!(loaded.routines, state.routines);
    }

    #[test]
    fn reads_routines_in_browser_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(
            &path,
            r#"{"routines":{"Legs":{"exercises":[{"name":"Squats","duration":20}],
               "sets":2,"restBetweenSets":15,"restBetweenExercises":0}}}"#,
        )
        .unwrap();

        let state = JsonStorageBackend::with_path(&path).load().unwrap();
        let legs = &state.routines["Legs"];
        assert_eq!(legs.sets, 2);
        assert_eq!(legs.rest_between_sets, 15);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonStorageBackend::with_path(&path).load().unwrap_err();
        assert!(err.to_string().contains("Corrupt database"));
    }
}
