// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cheat library linter.
//!
//! Replays a JSON cheat library through the admission gate, in file order,
//! starting from an empty store. Each rejected entry is printed with the
//! message from the configured message table.
//!
//! # Usage
//! ```text
//! cheat-lint <LIBRARY.json> [--config-dir DIR] [--catalog FILE] [--settings FILE] [--messages FILE]
//! ```
//!
//! Exits with code `0` when every entry is admitted and `1` otherwise.

// The linter reports findings on stdout.
#![allow(clippy::print_stdout)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use cheat_config_fs::FsConfigStore;
use cheat_core::config::{ConfigService, ConfigStore};
use cheat_core::{
    AdmitError, CatalogSettings, Cheat, CheatError, CheatId, CheatLibrary, ErrorMessages, GameId,
    MemoryStore, StaticCatalog, ValidatorSettings,
};
use clap::Parser;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a cheat library through the admission gate")]
struct Args {
    /// JSON array of cheats, in import order
    library: PathBuf,
    /// Directory holding validator.json, catalog.json and messages.json (defaults to the platform config dir)
    #[arg(long)]
    config_dir: Option<PathBuf>,
    /// Catalog file overriding the config directory
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Validator settings file overriding the config directory
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Message table file overriding the config directory
    #[arg(long)]
    messages: Option<PathBuf>,
}

/// One library entry as written on disk. The type stays a raw tag so an
/// unknown one is reported per entry instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct LibraryEntry {
    identifier: CheatId,
    name: String,
    code: String,
    #[serde(default)]
    game: Option<GameId>,
    #[serde(rename = "type")]
    cheat_type: String,
}

impl LibraryEntry {
    fn into_cheat(self) -> Result<Cheat, CheatError> {
        Ok(Cheat {
            identifier: self.identifier,
            name: self.name,
            code: self.code,
            game: self.game,
            cheat_type: self.cheat_type.parse()?,
        })
    }
}

#[derive(Debug)]
struct Rejection {
    id: CheatId,
    name: String,
    error: AdmitError,
}

struct Setup {
    catalog: StaticCatalog,
    settings: ValidatorSettings,
    messages: ErrorMessages,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let setup = load_setup(&args)?;
    let entries = read_json::<Vec<LibraryEntry>>(&args.library)?;
    let total = entries.len();
    let rejections = lint(entries, &setup);

    for r in &rejections {
        println!("{}\t{}\t{}", r.id, r.name, setup.messages.describe(&r.error));
    }
    info!(
        library = %args.library.display(),
        total,
        rejected = rejections.len(),
        "lint finished"
    );

    Ok(if rejections.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_setup(args: &Args) -> Result<Setup> {
    let service = match &args.config_dir {
        Some(dir) => Some(ConfigService::new(
            FsConfigStore::at(dir).with_context(|| format!("open config dir {}", dir.display()))?,
        )),
        None => match FsConfigStore::new() {
            Ok(store) => Some(ConfigService::new(store)),
            Err(err) => {
                warn!(%err, "no config directory; using built-in defaults");
                None
            }
        },
    };
    resolve_setup(args, service.as_ref())
}

fn resolve_setup<S: ConfigStore>(args: &Args, service: Option<&ConfigService<S>>) -> Result<Setup> {
    let catalog = match (&args.catalog, service) {
        (Some(path), _) => StaticCatalog::from_settings(read_json::<CatalogSettings>(path)?)
            .with_context(|| format!("catalog {}", path.display()))?,
        (None, Some(svc)) => svc.catalog().context("load catalog config")?,
        (None, None) => StaticCatalog::default(),
    };
    let settings = match (&args.settings, service) {
        (Some(path), _) => read_json(path)?,
        (None, Some(svc)) => svc.validator_settings().context("load validator config")?,
        (None, None) => ValidatorSettings::default(),
    };
    let messages = match (&args.messages, service) {
        (Some(path), _) => read_json(path)?,
        (None, Some(svc)) => svc.messages().context("load message config")?,
        (None, None) => ErrorMessages::default(),
    };
    Ok(Setup {
        catalog,
        settings,
        messages,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

fn lint(entries: Vec<LibraryEntry>, setup: &Setup) -> Vec<Rejection> {
    let library =
        CheatLibrary::new(MemoryStore::new(), setup.catalog.clone()).with_settings(setup.settings);
    let mut rejections = Vec::new();
    for entry in entries {
        let id = entry.identifier;
        let name = entry.name.clone();
        let outcome = entry
            .into_cheat()
            .map_err(AdmitError::from)
            .and_then(|cheat| library.admit(cheat));
        if let Err(error) = outcome {
            rejections.push(Rejection { id, name, error });
        }
    }
    rejections
}
