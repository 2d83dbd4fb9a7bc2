// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Admission gate for emulator cheat records.
//!
//! A candidate [`Cheat`] must pass [`CheatValidator::validate`] before it is
//! written to a game's cheat list. The validator is a pure gate: it reads the
//! store through the [`RecordStore`] port, checks the code against a
//! [`CheatFormat`] from a [`FormatCatalog`], and reports the first rule the
//! candidate breaks as a [`CheatError`].
//!
//! # Concurrency
//!
//! The validator has no locking of its own. Two validations racing on the
//! same game can both pass. [`CheatLibrary`] closes that gap by validating
//! and committing under one lock, and [`MemoryStore`] re-checks uniqueness on
//! every write.
//!
//! # Messages
//!
//! [`CheatError`]'s `Display` is the English default. Applications that want
//! their own wording own an [`ErrorMessages`] table.
#![forbid(unsafe_code)]

mod cheat;
pub mod config;
mod error;
mod format;
mod library;
mod memory;
mod store;
mod validator;

pub use cheat::{is_line_break, sanitize_code, sanitized_len, Cheat, CheatId, GameId};
pub use error::{AdmitError, CheatError, ErrorMessages, StoreError};
pub use format::{
    CatalogSettings, CheatFormat, CheatType, FormatCatalog, FormatError, FormatSpec,
    StaticCatalog,
};
pub use library::CheatLibrary;
pub use memory::{first_conflict, MemoryStore};
pub use store::{CheatQuery, CheatStore, RecordStore};
pub use validator::{CheatValidator, TieBreak, ValidatorSettings};
