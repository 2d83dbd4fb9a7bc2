// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory cheat store.

use crate::cheat::{Cheat, CheatId, GameId};
use crate::error::{CheatError, StoreError};
use crate::store::{CheatQuery, CheatStore, RecordStore};

/// Insertion-ordered in-memory [`CheatStore`].
///
/// # Uniqueness Guard
///
/// Writes re-check per-game name and code uniqueness against every other
/// record, using the same rule as validation (name before code, first record
/// in insertion order wins). A refused write leaves the store unchanged.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Cheat>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record with identifier `id`, if present.
    pub fn get(&self, id: CheatId) -> Option<&Cheat> {
        self.records.iter().find(|c| c.identifier == id)
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[Cheat] {
        &self.records
    }

    fn position(&self, id: CheatId) -> Option<usize> {
        self.records.iter().position(|c| c.identifier == id)
    }

    fn guard(&self, cheat: &Cheat) -> Result<(), StoreError> {
        match first_conflict(&self.records, cheat) {
            Some(reason) => Err(StoreError::Conflict {
                id: cheat.identifier,
                reason,
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<Cheat> for MemoryStore {
    /// Collect records verbatim, without the uniqueness guard.
    fn from_iter<I: IntoIterator<Item = Cheat>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl RecordStore for MemoryStore {
    fn find(&self, query: &CheatQuery<'_>) -> Vec<Cheat> {
        self.records.find(query)
    }
}

impl CheatStore for MemoryStore {
    fn insert(&mut self, cheat: Cheat) -> Result<(), StoreError> {
        if self.position(cheat.identifier).is_some() {
            return Err(StoreError::DuplicateIdentifier(cheat.identifier));
        }
        self.guard(&cheat)?;
        self.records.push(cheat);
        Ok(())
    }

    fn replace(&mut self, cheat: Cheat) -> Result<Cheat, StoreError> {
        let Some(index) = self.position(cheat.identifier) else {
            return Err(StoreError::NotFound(cheat.identifier));
        };
        self.guard(&cheat)?;
        Ok(std::mem::replace(&mut self.records[index], cheat))
    }

    fn remove(&mut self, id: CheatId) -> Result<Cheat, StoreError> {
        let Some(index) = self.position(id) else {
            return Err(StoreError::NotFound(id));
        };
        Ok(self.records.remove(index))
    }

    fn cheats_for(&self, game: &GameId) -> Vec<Cheat> {
        self.records
            .iter()
            .filter(|c| c.game.as_ref() == Some(game))
            .cloned()
            .collect()
    }
}

/// Uniqueness rule `cheat` violates against `records`, ignoring its own id.
///
/// Exposed for stores that keep records elsewhere but want the same guard.
pub fn first_conflict<'a, I>(records: I, cheat: &Cheat) -> Option<CheatError>
where
    I: IntoIterator<Item = &'a Cheat>,
{
    let game = cheat.game.as_ref()?;
    let query = CheatQuery {
        game,
        exclude: cheat.identifier,
        code: &cheat.code,
        name: &cheat.name,
    };
    records.into_iter().find_map(|c| query.conflict(c))
}
