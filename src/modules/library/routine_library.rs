use crate::application::state::AppState;
use crate::core::error::TimerError;
use crate::core::models::{Routine, RoutineRecord};
use crate::core::traits::{RoutineRepository, StorageBackend};
use anyhow::{Result, bail};

/// [`RoutineRepository`] backed by a [`StorageBackend`].
///
/// Holds the loaded [`AppState`] and writes it back after every change.
pub struct RoutineLibrary {
    storage: Box<dyn StorageBackend>,
    state: AppState,
}

impl RoutineLibrary {
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self> {
        let state = storage.load()?;
        Ok(Self { storage, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply a change to the stored state and persist it.
    pub fn update(&mut self, change: impl FnOnce(&mut AppState)) -> Result<()> {
        change(&mut self.state);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.state)
    }
}

impl RoutineRepository for RoutineLibrary {
    fn get(&self, name: &str) -> Result<Routine, TimerError> {
        let record = self
            .state
            .routines
            .get(name.trim())
            .ok_or_else(|| TimerError::NotFound(name.trim().to_string()))?;
        Routine::try_from(record.clone())
    }

    fn list(&self) -> Vec<(String, Result<Routine, TimerError>)> {
        self.state
            .routines
            .iter()
            .map(|(name, record)| (name.clone(), Routine::try_from(record.clone())))
            .collect()
    }

    fn save(&mut self, name: &str, routine: Routine) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Routine name must not be empty");
        }
        routine.validate()?;

        self.state
            .routines
            .insert(name.to_string(), RoutineRecord::from(routine));
        self.persist()
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        if self.state.routines.remove(name.trim()).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }
}
