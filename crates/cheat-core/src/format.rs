// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cheat types, per-type code formats, and the catalog that maps one to the
//! other.
//!
//! A [`CheatFormat`] is described by a pattern such as `"XXXXXXXX YYYYYYYY"`.
//! Codes are stored already formatted (one pattern-sized unit per line), so
//! the pattern's character count is the group length every sanitized code
//! must be a multiple of.

use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::CheatError;

/// Format family of a cheat code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheatType {
    /// Action Replay codes.
    ActionReplay,
    /// Game Genie codes.
    GameGenie,
    /// GameShark codes.
    GameShark,
    /// Code Breaker codes.
    CodeBreaker,
    /// Pro Action Replay codes.
    ProActionReplay,
}

impl CheatType {
    /// Every known type.
    pub const ALL: [CheatType; 5] = [
        CheatType::ActionReplay,
        CheatType::GameGenie,
        CheatType::GameShark,
        CheatType::CodeBreaker,
        CheatType::ProActionReplay,
    ];

    /// Stable snake_case tag (the serialized form).
    pub fn tag(self) -> &'static str {
        match self {
            Self::ActionReplay => "action_replay",
            Self::GameGenie => "game_genie",
            Self::GameShark => "game_shark",
            Self::CodeBreaker => "code_breaker",
            Self::ProActionReplay => "pro_action_replay",
        }
    }
}

impl std::fmt::Display for CheatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CheatType {
    type Err = CheatError;

    /// Parse a type tag; unknown tags are [`CheatError::UnknownCheatType`].
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.tag() == tag)
            .ok_or(CheatError::UnknownCheatType)
    }
}

/// Errors building a [`CheatFormat`] or a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Pattern has no characters, so there is no group length.
    #[error("format `{0}` has an empty pattern")]
    EmptyPattern(String),
    /// Two formats registered for the same type.
    #[error("more than one format registered for cheat type `{0}`")]
    DuplicateType(CheatType),
}

/// Serialized description of a format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpec {
    /// Human-readable format name.
    pub name: String,
    /// Type this format applies to.
    #[serde(rename = "type")]
    pub cheat_type: CheatType,
    /// Code layout, e.g. `"XXXX-YYYY"`.
    pub pattern: String,
}

/// A code format with a guaranteed positive group length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FormatSpec", into = "FormatSpec")]
pub struct CheatFormat {
    name: String,
    cheat_type: CheatType,
    pattern: String,
    group_len: NonZeroUsize,
}

impl CheatFormat {
    /// Build a format from its pattern. Empty patterns are rejected.
    pub fn new(
        name: impl Into<String>,
        cheat_type: CheatType,
        pattern: impl Into<String>,
    ) -> Result<Self, FormatError> {
        let name = name.into();
        let pattern = pattern.into();
        let Some(group_len) = NonZeroUsize::new(pattern.chars().count()) else {
            return Err(FormatError::EmptyPattern(name));
        };
        Ok(Self {
            name,
            cheat_type,
            pattern,
            group_len,
        })
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type this format applies to.
    pub fn cheat_type(&self) -> CheatType {
        self.cheat_type
    }

    /// Code layout pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Characters per code unit; sanitized codes must be a multiple of it.
    pub fn group_len(&self) -> NonZeroUsize {
        self.group_len
    }
}

impl TryFrom<FormatSpec> for CheatFormat {
    type Error = FormatError;

    fn try_from(spec: FormatSpec) -> Result<Self, Self::Error> {
        Self::new(spec.name, spec.cheat_type, spec.pattern)
    }
}

impl From<CheatFormat> for FormatSpec {
    fn from(format: CheatFormat) -> Self {
        Self {
            name: format.name,
            cheat_type: format.cheat_type,
            pattern: format.pattern,
        }
    }
}

/// Lookup from cheat type to its format.
pub trait FormatCatalog {
    /// Format for `cheat_type`, or [`CheatError::UnknownCheatType`] when the
    /// catalog has none.
    fn format_for(&self, cheat_type: CheatType) -> Result<&CheatFormat, CheatError>;
}

/// Persisted catalog contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Registered formats, at most one per type.
    pub formats: Vec<CheatFormat>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        let builtin = [
            ("Action Replay", CheatType::ActionReplay, "XXXXXXXX YYYYYYYY"),
            ("GameShark", CheatType::GameShark, "XXXXXXXX YYYYYYYY"),
            ("Code Breaker", CheatType::CodeBreaker, "XXXXXXXX YYYY"),
            ("Game Genie", CheatType::GameGenie, "XXXX-YYYY"),
            ("Pro Action Replay", CheatType::ProActionReplay, "XXXXXXXX"),
        ];
        let formats = builtin
            .into_iter()
            .filter_map(|(name, ty, pattern)| CheatFormat::new(name, ty, pattern).ok())
            .collect();
        Self { formats }
    }
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    formats: Vec<CheatFormat>,
}

impl StaticCatalog {
    /// Build a catalog, rejecting duplicate registrations for one type.
    pub fn new(formats: Vec<CheatFormat>) -> Result<Self, FormatError> {
        let mut seen = Vec::with_capacity(formats.len());
        for format in &formats {
            if seen.contains(&format.cheat_type) {
                return Err(FormatError::DuplicateType(format.cheat_type));
            }
            seen.push(format.cheat_type);
        }
        Ok(Self { formats })
    }

    /// Build a catalog from persisted settings.
    pub fn from_settings(settings: CatalogSettings) -> Result<Self, FormatError> {
        Self::new(settings.formats)
    }

    /// Registered formats, in registration order.
    pub fn formats(&self) -> &[CheatFormat] {
        &self.formats
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self {
            formats: CatalogSettings::default().formats,
        }
    }
}

impl FormatCatalog for StaticCatalog {
    fn format_for(&self, cheat_type: CheatType) -> Result<&CheatFormat, CheatError> {
        self.formats
            .iter()
            .find(|f| f.cheat_type == cheat_type)
            .ok_or(CheatError::UnknownCheatType)
    }
}
