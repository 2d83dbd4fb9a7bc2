// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cheat records and the identifiers they carry.

use serde::{Deserialize, Serialize};

use crate::format::CheatType;

/// Opaque identifier assigned to a cheat when it is created.
///
/// Used to exclude a record from its own uniqueness checks when an existing
/// cheat is edited and re-validated.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheatId(pub u64);

impl std::fmt::Display for CheatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to the game that owns a cheat (e.g. the ROM digest).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    /// Wrap a game reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cheat record, either a candidate awaiting admission or a stored entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cheat {
    /// Creation-time identifier.
    pub identifier: CheatId,
    /// Display name; unique within the owning game.
    pub name: String,
    /// Code payload. May span several lines; unique (verbatim) within the game.
    pub code: String,
    /// Owning game. A candidate without one is rejected.
    #[serde(default)]
    pub game: Option<GameId>,
    /// Format family of `code`.
    #[serde(rename = "type")]
    pub cheat_type: CheatType,
}

impl Cheat {
    /// Build a cheat attached to `game`.
    pub fn new(
        identifier: CheatId,
        name: impl Into<String>,
        code: impl Into<String>,
        game: GameId,
        cheat_type: CheatType,
    ) -> Self {
        Self {
            identifier,
            name: name.into(),
            code: code.into(),
            game: Some(game),
            cheat_type,
        }
    }

    /// The code with every line break removed.
    pub fn sanitized_code(&self) -> String {
        sanitize_code(&self.code)
    }
}

/// Returns `true` for the characters stripped by [`sanitize_code`].
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Remove all line breaks from `code`, preserving the order of everything else.
pub fn sanitize_code(code: &str) -> String {
    code.chars().filter(|&c| !is_line_break(c)).collect()
}

/// Character count of the sanitized form of `code`, without allocating it.
pub fn sanitized_len(code: &str) -> usize {
    code.chars().filter(|&c| !is_line_break(c)).count()
}
