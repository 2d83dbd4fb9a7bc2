// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rejection taxonomy for cheat admission, plus the message table callers use
//! to present rejections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cheat::CheatId;

/// Why a cheat was rejected.
///
/// Every kind is terminal: nothing is retried, and only the first violated
/// rule is ever reported. The `Display` text is the default English message;
/// callers that localize should go through [`ErrorMessages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheatError {
    /// Sanitized code length is not a multiple of the format's group length.
    #[error("The cheat code isn't in the correct format.")]
    InvalidCode,
    /// Name is empty.
    #[error("The name of this cheat is invalid.")]
    InvalidName,
    /// No owning game.
    #[error("There is no associated game with this cheat.")]
    InvalidGame,
    /// Another cheat in the same game has this name.
    #[error("A cheat already exists with this name.")]
    DuplicateName,
    /// Another cheat in the same game has this code.
    #[error("A cheat already exists with this code.")]
    DuplicateCode,
    /// The cheat type tag has no known format.
    #[error("This cheat type is not supported.")]
    UnknownCheatType,
}

impl CheatError {
    /// Every kind, in declaration order.
    pub const ALL: [CheatError; 6] = [
        CheatError::InvalidCode,
        CheatError::InvalidName,
        CheatError::InvalidGame,
        CheatError::DuplicateName,
        CheatError::DuplicateCode,
        CheatError::UnknownCheatType,
    ];

    /// Stable snake_case tag, suitable for logs and message-table keys.
    pub fn tag(self) -> &'static str {
        match self {
            Self::InvalidCode => "invalid_code",
            Self::InvalidName => "invalid_name",
            Self::InvalidGame => "invalid_game",
            Self::DuplicateName => "duplicate_name",
            Self::DuplicateCode => "duplicate_code",
            Self::UnknownCheatType => "unknown_cheat_type",
        }
    }
}

/// Failures raised by a store when applying a write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with this identifier.
    #[error("cheat {0} is not in the store")]
    NotFound(CheatId),
    /// A record with this identifier already exists.
    #[error("cheat {0} is already in the store")]
    DuplicateIdentifier(CheatId),
    /// The store's own uniqueness guard refused the write.
    #[error("store refused cheat {id}: {reason}")]
    Conflict {
        /// Identifier of the refused record.
        id: CheatId,
        /// The uniqueness rule that was violated.
        reason: CheatError,
    },
    /// A previous holder of the store lock panicked.
    #[error("cheat store lock poisoned")]
    Poisoned,
}

/// Failure of a validate-then-commit operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmitError {
    /// The candidate failed validation.
    #[error(transparent)]
    Rejected(#[from] CheatError),
    /// The store refused the write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AdmitError {
    /// The rejection kind, if this failure maps onto one.
    ///
    /// Store-level conflicts report the uniqueness rule they enforced.
    pub fn kind(&self) -> Option<CheatError> {
        match self {
            Self::Rejected(kind) | Self::Store(StoreError::Conflict { reason: kind, .. }) => {
                Some(*kind)
            }
            Self::Store(_) => None,
        }
    }
}

/// Caller-owned table of user-facing rejection messages.
///
/// Starts from the English defaults; overrides replace individual entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMessages {
    overrides: HashMap<CheatError, String>,
}

impl ErrorMessages {
    /// Table with only the built-in English messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the message for `kind`.
    pub fn with(mut self, kind: CheatError, message: impl Into<String>) -> Self {
        self.overrides.insert(kind, message.into());
        self
    }

    /// Message to show for `kind`.
    pub fn message(&self, kind: CheatError) -> String {
        self.overrides
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.to_string())
    }

    /// Message to show for an admission failure. Non-rejection store
    /// failures fall back to their own `Display`.
    pub fn describe(&self, err: &AdmitError) -> String {
        err.kind()
            .map_or_else(|| err.to_string(), |kind| self.message(kind))
    }
}
