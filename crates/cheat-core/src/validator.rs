// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Admission checks for a single candidate cheat.
//!
//! Rules run in a fixed order and stop at the first violation:
//!
//! 1. name must be non-empty ([`CheatError::InvalidName`]);
//! 2. a game must be attached ([`CheatError::InvalidGame`]);
//! 3. one store query for other records of the same game sharing the name or
//!    the raw code. Each match is checked name first
//!    ([`CheatError::DuplicateName`]), then code ([`CheatError::DuplicateCode`]);
//! 4. the code, with line breaks removed, must have a length that is a
//!    multiple of the format's group length ([`CheatError::InvalidCode`]).
//!
//! Uniqueness compares the raw code while the length rule sees the sanitized
//! code, so two codes differing only in line breaks are distinct cheats.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cheat::{sanitized_len, Cheat};
use crate::error::CheatError;
use crate::format::CheatFormat;
use crate::store::{CheatQuery, RecordStore};

/// Which duplicate wins when the store returns several matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First record in the order the store returned them.
    #[default]
    StoreOrder,
    /// Record with the lowest identifier.
    LowestIdentifier,
}

/// Tunables for [`CheatValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorSettings {
    /// Ordering applied to uniqueness matches before they are inspected.
    pub tie_break: TieBreak,
    /// Reject codes that are empty after sanitization. Off by default: an
    /// empty code is a multiple of every group length.
    pub reject_empty_code: bool,
}

/// Validates candidates against one format and one store.
///
/// Read-only: issues exactly one store query per call and never mutates the
/// candidate or the store. It does not guard against concurrent writers; see
/// [`CheatLibrary`](crate::CheatLibrary) for serialized admission.
#[derive(Debug)]
pub struct CheatValidator<'a, S: ?Sized> {
    format: &'a CheatFormat,
    store: &'a S,
    settings: ValidatorSettings,
}

impl<'a, S> CheatValidator<'a, S>
where
    S: RecordStore + ?Sized,
{
    /// Bind a validator to `format` and `store` with default settings.
    pub fn new(format: &'a CheatFormat, store: &'a S) -> Self {
        Self {
            format,
            store,
            settings: ValidatorSettings::default(),
        }
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: ValidatorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The bound format.
    pub fn format(&self) -> &CheatFormat {
        self.format
    }

    /// Run every admission rule against `cheat`.
    pub fn validate(&self, cheat: &Cheat) -> Result<(), CheatError> {
        let outcome = self.check(cheat);
        match outcome {
            Ok(()) => trace!(id = %cheat.identifier, format = self.format.name(), "cheat accepted"),
            Err(kind) => debug!(
                id = %cheat.identifier,
                game = ?cheat.game,
                rule = kind.tag(),
                "cheat rejected"
            ),
        }
        outcome
    }

    fn check(&self, cheat: &Cheat) -> Result<(), CheatError> {
        if cheat.name.is_empty() {
            return Err(CheatError::InvalidName);
        }
        let Some(game) = cheat.game.as_ref() else {
            return Err(CheatError::InvalidGame);
        };

        let query = CheatQuery {
            game,
            exclude: cheat.identifier,
            code: &cheat.code,
            name: &cheat.name,
        };
        let mut matches = self.store.find(&query);
        if self.settings.tie_break == TieBreak::LowestIdentifier {
            matches.sort_by_key(|c| c.identifier);
        }
        for existing in &matches {
            if existing.name == cheat.name {
                return Err(CheatError::DuplicateName);
            }
            if existing.code == cheat.code {
                return Err(CheatError::DuplicateCode);
            }
        }

        let len = sanitized_len(&cheat.code);
        if len == 0 && self.settings.reject_empty_code {
            return Err(CheatError::InvalidCode);
        }
        if len % self.format.group_len() != 0 {
            return Err(CheatError::InvalidCode);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::cheat::{CheatId, GameId};
    use crate::format::CheatType;

    fn format(pattern: &str) -> CheatFormat {
        CheatFormat::new("test", CheatType::GameShark, pattern).unwrap()
    }

    fn cheat(id: u64, name: &str, code: &str) -> Cheat {
        Cheat::new(CheatId(id), name, code, GameId::new("g"), CheatType::GameShark)
    }

    /// Store that counts queries and hands back a fixed result set.
    struct Scripted {
        rows: Vec<Cheat>,
        calls: Cell<usize>,
    }

    impl RecordStore for Scripted {
        fn find(&self, _query: &CheatQuery<'_>) -> Vec<Cheat> {
            self.calls.set(self.calls.get() + 1);
            self.rows.clone()
        }
    }

    #[test]
    fn empty_name_wins_over_everything() {
        let f = format("XXXXXXXX");
        let store: Vec<Cheat> = Vec::new();
        let mut c = cheat(1, "", "ABC");
        c.game = None;
        assert_eq!(
            CheatValidator::new(&f, &store).validate(&c),
            Err(CheatError::InvalidName)
        );
    }

    #[test]
    fn missing_game_checked_before_store() {
        let f = format("XXXXXXXX");
        let store = Scripted {
            rows: vec![cheat(2, "A", "DEADBEEF")],
            calls: Cell::new(0),
        };
        let mut c = cheat(1, "A", "DEADBEEF");
        c.game = None;
        assert_eq!(
            CheatValidator::new(&f, &store).validate(&c),
            Err(CheatError::InvalidGame)
        );
        assert_eq!(store.calls.get(), 0);
    }

    #[test]
    fn exactly_one_query_per_validation() {
        let f = format("XXXXXXXX");
        let store = Scripted {
            rows: Vec::new(),
            calls: Cell::new(0),
        };
        CheatValidator::new(&f, &store)
            .validate(&cheat(1, "A", "DEADBEEF"))
            .unwrap();
        assert_eq!(store.calls.get(), 1);
    }

    #[test]
    fn group_length_rule() {
        let f = format("XXXXXXXX");
        let store: Vec<Cheat> = Vec::new();
        let v = CheatValidator::new(&f, &store);
        assert_eq!(v.validate(&cheat(1, "A", "DEADBEEF")), Ok(()));
        assert_eq!(
            v.validate(&cheat(1, "A", "DEADBEE")),
            Err(CheatError::InvalidCode)
        );
        assert_eq!(v.validate(&cheat(1, "A", "DEAD\nBEEF")), Ok(()));
    }

    #[test]
    fn duplicate_check_precedes_code_check() {
        let f = format("XXXX");
        let store = vec![cheat(1, "A", "XYZ")];
        assert_eq!(
            CheatValidator::new(&f, &store).validate(&cheat(2, "A", "XYZ")),
            Err(CheatError::DuplicateName)
        );
    }

    #[test]
    fn store_order_decides_between_matches() {
        let f = format("XXXX");
        let store = Scripted {
            rows: vec![cheat(9, "Other", "AAAA"), cheat(3, "A", "BBBB")],
            calls: Cell::new(0),
        };
        let candidate = cheat(1, "A", "AAAA");
        assert_eq!(
            CheatValidator::new(&f, &store).validate(&candidate),
            Err(CheatError::DuplicateCode)
        );
    }

    #[test]
    fn lowest_identifier_tie_break() {
        let f = format("XXXX");
        let store = Scripted {
            rows: vec![cheat(9, "Other", "AAAA"), cheat(3, "A", "BBBB")],
            calls: Cell::new(0),
        };
        let settings = ValidatorSettings {
            tie_break: TieBreak::LowestIdentifier,
            ..ValidatorSettings::default()
        };
        let candidate = cheat(1, "A", "AAAA");
        assert_eq!(
            CheatValidator::new(&f, &store)
                .with_settings(settings)
                .validate(&candidate),
            Err(CheatError::DuplicateName)
        );
    }

    #[test]
    fn empty_code_passes_unless_configured() {
        let f = format("XXXX");
        let store: Vec<Cheat> = Vec::new();
        let v = CheatValidator::new(&f, &store);
        assert_eq!(v.validate(&cheat(1, "A", "")), Ok(()));
        assert_eq!(v.validate(&cheat(1, "A", "\n")), Ok(()));

        let strict = v.with_settings(ValidatorSettings {
            reject_empty_code: true,
            ..ValidatorSettings::default()
        });
        assert_eq!(
            strict.validate(&cheat(1, "A", "\n")),
            Err(CheatError::InvalidCode)
        );
        assert_eq!(strict.validate(&cheat(1, "A", "ABCD")), Ok(()));
    }

    #[test]
    fn candidate_is_not_mutated() {
        let f = format("XXXX");
        let store: Vec<Cheat> = Vec::new();
        let c = cheat(1, "A", "AB\nCD");
        let before = c.clone();
        CheatValidator::new(&f, &store).validate(&c).unwrap();
        assert_eq!(c, before);
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let s: ValidatorSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, ValidatorSettings::default());
        let s: ValidatorSettings =
            serde_json::from_str(r#"{"tie_break":"lowest_identifier"}"#).unwrap();
        assert_eq!(s.tie_break, TieBreak::LowestIdentifier);
        assert!(!s.reject_empty_code);
    }
}
