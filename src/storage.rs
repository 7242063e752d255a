/// High-score persistence.
///
/// The store is a flat string-to-string map, the same shape as browser local
/// storage.  The only key the game uses is [`HIGH_SCORE_KEY`], holding the
/// score as a decimal string.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const HIGH_SCORE_KEY: &str = "highScore";
pub const STORAGE_FILE: &str = "local_storage.json";

// ── Store trait ───────────────────────────────────────────────────────────────

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// ── In-memory store ───────────────────────────────────────────────────────────

/// Non-persistent store, used by tests and when no data directory exists.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.to_string(), value.to_string());
        MemoryStore { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── JSON file store ───────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Default)]
struct StorageFile {
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

/// Store backed by a small JSON object on disk.  The file is read once when
/// opened and rewritten in full on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    contents: StorageFile,
}

impl JsonFileStore {
    /// Open the store at `path`.  A missing or corrupt file is treated as
    /// empty; the next `set` overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let contents = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<StorageFile>(&text) {
                Ok(contents) => {
                    debug!("Loaded {} stored value(s) from {:?}", contents.entries.len(), path);
                    contents
                }
                Err(e) => {
                    warn!("Ignoring unreadable storage file {:?}: {}", path, e);
                    StorageFile::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No storage file at {:?}, starting empty", path);
                StorageFile::default()
            }
            Err(e) => {
                warn!("Failed to read storage file {:?}: {}", path, e);
                StorageFile::default()
            }
        };
        JsonFileStore { path, contents }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.contents.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.contents.entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(&self.contents)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

// ── High-score helpers ────────────────────────────────────────────────────────

/// Stored high score, or 0 when absent or not a number.
pub fn load_high_score(store: &dyn KeyValueStore) -> u32 {
    store
        .get(HIGH_SCORE_KEY)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

pub fn save_high_score(store: &mut dyn KeyValueStore, score: u32) -> Result<()> {
    store.set(HIGH_SCORE_KEY, &score.to_string())
}
