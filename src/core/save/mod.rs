//=========================================================================
// Save System
//=========================================================================
//
// JSON save files under a configurable folder, named by policy.
//
// Architecture:
//   SaveConfig { folder, naming, extension }
//        ↓
//   SaveSystem<T> → save()/save_as() → <folder>/<name>.<extension>
//                 ← load()           ← SaveFile<T> { header, data }
//
// The header carries the format version; loading a file written with a
// different version fails instead of guessing at its layout.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Module Declarations =================================================

mod save_system;

//=== Public API ==========================================================

pub use save_system::SaveSystem;

/// Version written into every save header.
pub const SAVE_FORMAT_VERSION: u32 = 1;

//=== SaveError ===========================================================

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Version mismatch: save version {found}, current version {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Save not found: {0}")]
    NotFound(String),

    #[error("Invalid save name: {0:?}")]
    InvalidName(String),

    #[error("No sequential save name left after {0}")]
    NamesExhausted(String),
}

//=== SaveNaming ==========================================================

/// How `SaveSystem::save` names new files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveNaming {
    /// `<prefix>_1`, `<prefix>_2`, ... one past the highest existing index.
    Sequential { prefix: String },

    /// `<prefix>_<unix millis>`.
    Timestamped { prefix: String },
}

impl Default for SaveNaming {
    fn default() -> Self {
        Self::Sequential { prefix: "save".to_string() }
    }
}

//=== SaveConfig ==========================================================

/// Where and how saves are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveConfig {
    pub folder: PathBuf,
    #[serde(default)]
    pub naming: SaveNaming,
    #[serde(default = "SaveConfig::default_extension")]
    pub extension: String,
}

impl SaveConfig {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            naming: SaveNaming::default(),
            extension: Self::default_extension(),
        }
    }

    pub fn with_naming(mut self, naming: SaveNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Sets the file extension; a leading dot is ignored.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    fn default_extension() -> String {
        "json".to_string()
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self::new("saves")
    }
}

//=== SaveHeader / SaveFile ===============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHeader {
    pub version: u32,
    pub name: String,
    /// Unix timestamp in seconds.
    pub timestamp: u64,
}

impl SaveHeader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            name: name.into(),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

/// On-disk save layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile<T> {
    pub header: SaveHeader,
    pub data: T,
}
