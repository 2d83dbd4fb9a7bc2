// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serialized admission: validate and commit under one lock.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::cheat::{Cheat, CheatId, GameId};
use crate::error::{AdmitError, StoreError};
use crate::format::{FormatCatalog, StaticCatalog};
use crate::store::CheatStore;
use crate::validator::{CheatValidator, ValidatorSettings};

/// A cheat store paired with the catalog and settings used to admit records.
///
/// Every write resolves the candidate's format, validates it, and commits it
/// while holding the store lock, so the query the validator sees is the state
/// the write lands on. Concurrent admissions for the same game cannot both
/// pass.
#[derive(Debug)]
pub struct CheatLibrary<S, C = StaticCatalog> {
    store: Mutex<S>,
    catalog: C,
    settings: ValidatorSettings,
}

impl<S, C> CheatLibrary<S, C>
where
    S: CheatStore,
    C: FormatCatalog,
{
    /// Wrap `store`, resolving formats through `catalog`.
    pub fn new(store: S, catalog: C) -> Self {
        Self {
            store: Mutex::new(store),
            catalog,
            settings: ValidatorSettings::default(),
        }
    }

    /// Replace the validator settings.
    pub fn with_settings(mut self, settings: ValidatorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current validator settings.
    pub fn settings(&self) -> ValidatorSettings {
        self.settings
    }

    /// The format catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Validate `cheat` against the current contents without committing.
    pub fn check(&self, cheat: &Cheat) -> Result<(), AdmitError> {
        let store = self.lock()?;
        self.validate_against(&store, cheat)
    }

    /// Validate and insert a new cheat.
    pub fn admit(&self, cheat: Cheat) -> Result<(), AdmitError> {
        let mut store = self.lock()?;
        self.validate_against(&store, &cheat)?;
        let id = cheat.identifier;
        store.insert(cheat).map_err(log_guard_refusal)?;
        debug!(%id, "cheat admitted");
        Ok(())
    }

    /// Validate an edited cheat and replace its stored version. Returns the
    /// previous record.
    pub fn update(&self, cheat: Cheat) -> Result<Cheat, AdmitError> {
        let mut store = self.lock()?;
        self.validate_against(&store, &cheat)?;
        let id = cheat.identifier;
        let previous = store.replace(cheat).map_err(log_guard_refusal)?;
        debug!(%id, "cheat updated");
        Ok(previous)
    }

    /// Delete a cheat. Returns the removed record.
    pub fn remove(&self, id: CheatId) -> Result<Cheat, AdmitError> {
        let removed = self.lock()?.remove(id)?;
        debug!(%id, "cheat removed");
        Ok(removed)
    }

    /// Snapshot of every cheat owned by `game`.
    pub fn cheats_for(&self, game: &GameId) -> Result<Vec<Cheat>, AdmitError> {
        Ok(self.lock()?.cheats_for(game))
    }

    /// Consume the library and return the store.
    pub fn into_inner(self) -> Result<S, AdmitError> {
        self.store
            .into_inner()
            .map_err(|_| AdmitError::Store(StoreError::Poisoned))
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>, StoreError> {
        self.store.lock().map_err(|_| StoreError::Poisoned)
    }

    fn validate_against(&self, store: &S, cheat: &Cheat) -> Result<(), AdmitError> {
        let format = self.catalog.format_for(cheat.cheat_type)?;
        CheatValidator::new(format, store)
            .with_settings(self.settings)
            .validate(cheat)?;
        Ok(())
    }
}

fn log_guard_refusal(err: StoreError) -> StoreError {
    if let StoreError::Conflict { id, reason } = &err {
        warn!(%id, rule = reason.tag(), "store guard refused a validated cheat");
    }
    err
}
