//=========================================================================
// Save System
//=========================================================================
//
// Reads and writes `SaveFile<T>` documents for one save folder.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::{SaveConfig, SaveError, SaveFile, SaveHeader, SaveNaming, SAVE_FORMAT_VERSION};
use crate::core::validation::Validation;

//=== SaveSystem ==========================================================

/// Typed save store for game data `T`.
///
/// # Example
///
/// ```no_run
/// use serde::{Deserialize, Serialize};
/// use stratus::core::save::{SaveConfig, SaveSystem};
///
/// #[derive(Serialize, Deserialize)]
/// struct Progress { level: u32 }
///
/// let saves: SaveSystem<Progress> = SaveSystem::new(SaveConfig::new("saves"));
/// let path = saves.save(&Progress { level: 3 })?;
/// println!("saved to {}", path.display());
///
/// let latest = saves.latest()?.unwrap();
/// assert_eq!(saves.load(&latest)?.data.level, 3);
/// # Ok::<(), stratus::core::save::SaveError>(())
/// ```
pub struct SaveSystem<T> {
    config: SaveConfig,
    _data: PhantomData<fn() -> T>,
}

/// Header-only view used to check the version before parsing `data`.
#[derive(Deserialize)]
struct HeaderView {
    header: SaveHeader,
}

impl<T> SaveSystem<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(config: SaveConfig) -> Self {
        Self { config, _data: PhantomData }
    }

    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    //--- Writing ----------------------------------------------------------

    /// Writes `data` under the next name from the naming policy.
    pub fn save(&self, data: &T) -> Result<PathBuf, SaveError> {
        let name = self.next_name()?;
        self.save_as(&name, data)
    }

    /// Writes `data` under `name`, replacing any existing save.
    pub fn save_as(&self, name: &str, data: &T) -> Result<PathBuf, SaveError> {
        Self::check_name(name)?;
        fs::create_dir_all(&self.config.folder)?;

        let file = SaveFile { header: SaveHeader::new(name), data };
        let json = serde_json::to_string_pretty(&file)?;

        let path = self.path_for(name);
        fs::write(&path, json)?;
        info!(target: "save", "Saved '{}' to {}", name, path.display());
        Ok(path)
    }

    //--- Reading ----------------------------------------------------------

    pub fn load(&self, name: &str) -> Result<SaveFile<T>, SaveError> {
        Self::check_name(name)?;
        let path = self.path_for(name);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SaveError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let view: HeaderView = serde_json::from_str(&text)?;
        if view.header.version != SAVE_FORMAT_VERSION {
            warn!(
                target: "save",
                "Save '{}' has format version {}, expected {}",
                name,
                view.header.version,
                SAVE_FORMAT_VERSION
            );
            return Err(SaveError::VersionMismatch {
                found: view.header.version,
                expected: SAVE_FORMAT_VERSION,
            });
        }

        let file = serde_json::from_str(&text)?;
        debug!(target: "save", "Loaded '{}'", name);
        Ok(file)
    }

    /// Whether `name` loads cleanly, with the failure reason otherwise.
    pub fn validate(&self, name: &str) -> Validation {
        match self.load(name) {
            Ok(_) => Validation::valid(),
            Err(e) => Validation::invalid(e.to_string()),
        }
    }

    //--- Management -------------------------------------------------------

    /// Save names (without extension) in the folder.
    ///
    /// Names ending in `_<number>` sort by that number within their prefix,
    /// so `save_10` follows `save_9`. A missing folder means no saves.
    pub fn list(&self) -> Result<Vec<String>, SaveError> {
        let entries = match fs::read_dir(&self.config.folder) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && self.has_save_extension(&path) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        Ok(names)
    }

    /// Most recently written save that still parses, by header timestamp.
    /// Saves from the same second fall back to `list()` order.
    pub fn latest(&self) -> Result<Option<String>, SaveError> {
        let mut latest: Option<(u64, String)> = None;

        for name in self.list()? {
            let text = fs::read_to_string(self.path_for(&name))?;
            let view: HeaderView = match serde_json::from_str(&text) {
                Ok(view) => view,
                Err(e) => {
                    warn!(target: "save", "Skipping unreadable save '{}': {}", name, e);
                    continue;
                }
            };

            let newer = latest
                .as_ref()
                .map_or(true, |(timestamp, _)| view.header.timestamp >= *timestamp);
            if newer {
                latest = Some((view.header.timestamp, name));
            }
        }

        Ok(latest.map(|(_, name)| name))
    }

    pub fn exists(&self, name: &str) -> bool {
        Self::check_name(name).is_ok() && self.path_for(name).is_file()
    }

    pub fn delete(&self, name: &str) -> Result<(), SaveError> {
        Self::check_name(name)?;
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => {
                info!(target: "save", "Deleted '{}'", name);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SaveError::NotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// File path a save called `name` is stored at.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.config.folder.join(format!("{}.{}", name, self.config.extension))
    }

    //--- Naming -----------------------------------------------------------

    /// Name the next `save()` call will use.
    pub fn next_name(&self) -> Result<String, SaveError> {
        match &self.config.naming {
            SaveNaming::Sequential { prefix } => {
                let marker = format!("{}_", prefix);
                let highest = self
                    .list()?
                    .iter()
                    .filter_map(|name| name.strip_prefix(&marker)?.parse::<u64>().ok())
                    .max()
                    .unwrap_or(0);
                let next = highest
                    .checked_add(1)
                    .ok_or_else(|| SaveError::NamesExhausted(format!("{}{}", marker, highest)))?;
                Ok(format!("{}{}", marker, next))
            }
            SaveNaming::Timestamped { prefix } => {
                let millis = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis())
                    .unwrap_or(0);

                let base = format!("{}_{}", prefix, millis);
                let mut name = base.clone();
                let mut suffix = 1;
                while self.path_for(&name).exists() {
                    name = format!("{}_{}", base, suffix);
                    suffix += 1;
                }
                Ok(name)
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn has_save_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.config.extension.as_str())
    }

    fn check_name(name: &str) -> Result<(), SaveError> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(|c| c == '/' || c == '\\');

        if invalid {
            Err(SaveError::InvalidName(name.to_string()))
        } else {
            Ok(())
        }
    }
}

/// `save_10` → `("save", Some(10))`, `manual` → `("manual", None)`.
fn sort_key(name: &str) -> (&str, Option<u64>, &str) {
    match name.rsplit_once('_') {
        Some((prefix, index)) => match index.parse::<u64>() {
            Ok(index) => (prefix, Some(index), name),
            Err(_) => (name, None, name),
        },
        None => (name, None, name),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
