// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Record store ports.
//!
//! [`RecordStore`] is the read capability the validator consumes: one
//! predicate query per validation. [`CheatStore`] adds the writes a
//! [`CheatLibrary`](crate::CheatLibrary) commits after validation.
//!
//! Match semantics are exact equality on the stored strings and references.
//! Result order is whatever the store yields; callers must not rely on it
//! unless the store documents one.

use crate::cheat::{Cheat, CheatId, GameId};
use crate::error::{CheatError, StoreError};

/// The uniqueness query issued for one candidate:
/// `game == G AND identifier != id AND (code == C OR name == N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheatQuery<'a> {
    /// Game the matches must belong to.
    pub game: &'a GameId,
    /// Identifier to exclude (the candidate's own).
    pub exclude: CheatId,
    /// Raw code to match.
    pub code: &'a str,
    /// Name to match.
    pub name: &'a str,
}

impl CheatQuery<'_> {
    /// Returns `true` if `cheat` satisfies the predicate.
    pub fn matches(&self, cheat: &Cheat) -> bool {
        cheat.game.as_ref() == Some(self.game)
            && cheat.identifier != self.exclude
            && (cheat.code == self.code || cheat.name == self.name)
    }

    /// The uniqueness rule `cheat` violates against this query, if any.
    ///
    /// A record sharing both name and code reports [`CheatError::DuplicateName`].
    pub fn conflict(&self, cheat: &Cheat) -> Option<CheatError> {
        if !self.matches(cheat) {
            return None;
        }
        if cheat.name == self.name {
            Some(CheatError::DuplicateName)
        } else {
            Some(CheatError::DuplicateCode)
        }
    }
}

/// Read side of a cheat store.
pub trait RecordStore {
    /// All records matching `query`, in store order.
    fn find(&self, query: &CheatQuery<'_>) -> Vec<Cheat>;
}

/// Write side of a cheat store.
///
/// Implementations should enforce per-game name/code uniqueness themselves
/// (returning [`StoreError::Conflict`]); validation alone cannot close the
/// race between concurrent writers.
pub trait CheatStore: RecordStore {
    /// Add a new record.
    fn insert(&mut self, cheat: Cheat) -> Result<(), StoreError>;

    /// Replace the record with the same identifier; returns the old record.
    fn replace(&mut self, cheat: Cheat) -> Result<Cheat, StoreError>;

    /// Delete a record; returns it.
    fn remove(&mut self, id: CheatId) -> Result<Cheat, StoreError>;

    /// Every record owned by `game`, in store order.
    fn cheats_for(&self, game: &GameId) -> Vec<Cheat>;
}

impl RecordStore for [Cheat] {
    fn find(&self, query: &CheatQuery<'_>) -> Vec<Cheat> {
        self.iter().filter(|c| query.matches(c)).cloned().collect()
    }
}

impl RecordStore for Vec<Cheat> {
    fn find(&self, query: &CheatQuery<'_>) -> Vec<Cheat> {
        self.as_slice().find(query)
    }
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn find(&self, query: &CheatQuery<'_>) -> Vec<Cheat> {
        (**self).find(query)
    }
}
