//! shiptrack settings.
//!
//! Two TOML files live under the storage root (`~/.shiptrack/`):
//!
//! - `config.toml`: where the feed is published and who is acting.
//! - `journey.toml`: the journey store, rewritten on every mode switch or save.
//!
//! Missing files mean defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::journey::{self, JourneyError, JourneyStore};
use crate::model::{JourneyConfig, JourneyMode, JourneyNodeConfig};

const CONFIG_FILE: &str = "config.toml";
const JOURNEY_FILE: &str = "journey.toml";

/// Errors that can occur while reading or writing settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid settings at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("invalid {mode} allocation in {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        mode: JourneyMode,
        source: JourneyError,
    },
}

/// User settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Where `refresh` fetches from when `--source` isn't given.
    /// An `http(s)://` URL or a local path.
    pub feed_url: Option<String>,

    /// The default acting user for comments.
    pub user: Option<String>,
}

impl Config {
    /// Loads `config.toml` from the root, or defaults if it doesn't exist.
    pub fn load(root: &Path) -> Result<Self, SettingsError> {
        read_toml(&root.join(CONFIG_FILE)).map(Option::unwrap_or_default)
    }
}

/// On-disk shape of the journey store.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct JourneyFile {
    active_mode: JourneyMode,
    #[serde(default)]
    modes: Vec<ModeAllocation>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ModeAllocation {
    mode: JourneyMode,
    nodes: Vec<JourneyNodeConfig>,
}

/// Loads the journey store, falling back to defaults if the file is missing.
///
/// Modes absent from the file keep their default allocation. Every stored
/// allocation is validated before it can become active.
pub fn load_journey(root: &Path) -> Result<JourneyStore, SettingsError> {
    let path = root.join(JOURNEY_FILE);
    let Some(file) = read_toml::<JourneyFile>(&path)? else {
        return Ok(JourneyStore::default());
    };

    let mut config = JourneyConfig::default();
    for ModeAllocation { mode, nodes } in file.modes {
        journey::validate(mode, &nodes).map_err(|source| SettingsError::Invalid {
            path: path.clone(),
            mode,
            source,
        })?;
        config.set_allocation(mode, nodes);
    }
    Ok(JourneyStore::new(config, file.active_mode))
}

/// Writes the whole journey store.
pub fn save_journey(root: &Path, store: &JourneyStore) -> Result<(), SettingsError> {
    let (config, active_mode) = store.get();
    let file = JourneyFile {
        active_mode,
        modes: config
            .iter()
            .map(|(mode, nodes)| ModeAllocation {
                mode,
                nodes: nodes.to_vec(),
            })
            .collect(),
    };
    let contents = toml::to_string(&file)?;

    let path = root.join(JOURNEY_FILE);
    fs::create_dir_all(root).map_err(|source| SettingsError::Write {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, contents).map_err(|source| SettingsError::Write { path, source })
}

fn read_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>, SettingsError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&contents)
        .map(Some)
        .map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
