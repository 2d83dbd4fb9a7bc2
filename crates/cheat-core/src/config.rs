// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port for validator settings, the format catalog
//! and message overrides.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::error::ErrorMessages;
use crate::format::{CatalogSettings, FormatError, StaticCatalog};
use crate::validator::ValidatorSettings;

/// Key for [`ValidatorSettings`].
pub const SETTINGS_KEY: &str = "validator";
/// Key for [`CatalogSettings`].
pub const CATALOG_KEY: &str = "catalog";
/// Key for [`ErrorMessages`] overrides.
pub const MESSAGES_KEY: &str = "messages";

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catalog contents are inconsistent.
    #[error("catalog error: {0}")]
    Catalog(#[from] FormatError),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Thin service that serializes config values and delegates storage to a `ConfigStore`.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. Returns `Ok(None)` if missing.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) => {
                if bytes.is_empty() {
                    return Ok(None);
                }
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Like [`load`](Self::load), falling back to `T::default()` when missing.
    pub fn load_or_default<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Serialize and persist a config value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }

    /// Validator settings, defaulted when missing.
    pub fn validator_settings(&self) -> Result<ValidatorSettings, ConfigError> {
        self.load_or_default(SETTINGS_KEY)
    }

    /// Format catalog, defaulted to the built-in formats when missing.
    pub fn catalog(&self) -> Result<StaticCatalog, ConfigError> {
        let settings: CatalogSettings = self.load_or_default(CATALOG_KEY)?;
        Ok(StaticCatalog::from_settings(settings)?)
    }

    /// Message overrides; empty (English defaults) when missing.
    pub fn messages(&self) -> Result<ErrorMessages, ConfigError> {
        self.load_or_default(MESSAGES_KEY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::error::CheatError;
    use crate::format::{CheatFormat, CheatType, FormatCatalog};
    use crate::validator::TieBreak;

    #[derive(Default)]
    struct MapStore(RefCell<HashMap<String, Vec<u8>>>);

    impl ConfigStore for MapStore {
        fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
            self.0.borrow().get(key).cloned().ok_or(ConfigError::NotFound)
        }

        fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
            self.0.borrow_mut().insert(key.to_owned(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let svc = ConfigService::new(MapStore::default());
        assert_eq!(svc.validator_settings().unwrap(), ValidatorSettings::default());
        assert_eq!(svc.catalog().unwrap().formats().len(), CheatType::ALL.len());
        assert_eq!(
            svc.messages().unwrap().message(CheatError::InvalidName),
            CheatError::InvalidName.to_string()
        );
    }

    #[test]
    fn empty_blob_is_treated_as_missing() {
        let store = MapStore::default();
        store.save_raw(SETTINGS_KEY, b"").unwrap();
        let svc = ConfigService::new(store);
        assert_eq!(svc.load::<ValidatorSettings>(SETTINGS_KEY).unwrap(), None);
    }

    #[test]
    fn saved_settings_are_loaded_back() {
        let svc = ConfigService::new(MapStore::default());
        let settings = ValidatorSettings {
            tie_break: TieBreak::LowestIdentifier,
            reject_empty_code: true,
        };
        svc.save(SETTINGS_KEY, &settings).unwrap();
        assert_eq!(svc.validator_settings().unwrap(), settings);
    }

    #[test]
    fn custom_catalog_replaces_builtin() {
        let svc = ConfigService::new(MapStore::default());
        let catalog = CatalogSettings {
            formats: vec![CheatFormat::new("GG", CheatType::GameGenie, "XXX-YYY-ZZZ").unwrap()],
        };
        svc.save(CATALOG_KEY, &catalog).unwrap();
        let loaded = svc.catalog().unwrap();
        assert_eq!(
            loaded.format_for(CheatType::GameGenie).unwrap().group_len().get(),
            11
        );
        assert!(loaded.format_for(CheatType::GameShark).is_err());
    }

    #[test]
    fn duplicate_catalog_entries_surface_as_catalog_error() {
        let store = MapStore::default();
        let json = br#"{"formats":[
            {"name":"A","type":"game_shark","pattern":"XXXXXXXX"},
            {"name":"B","type":"game_shark","pattern":"XXXX"}
        ]}"#;
        store.save_raw(CATALOG_KEY, json).unwrap();
        let err = ConfigService::new(store).catalog().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Catalog(FormatError::DuplicateType(CheatType::GameShark))
        ));
    }

    #[test]
    fn malformed_json_is_serde_error() {
        let store = MapStore::default();
        store.save_raw(SETTINGS_KEY, b"{not json").unwrap();
        let err = ConfigService::new(store).validator_settings().unwrap_err();
        assert!(matches!(err, ConfigError::Serde(_)));
    }
}
