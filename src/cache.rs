//! Key-value stores for fetched holiday lists.
//!
//! The pipeline only needs `get` and `set`; entries are never expired or
//! invalidated by it. [`MemoryStore`] lives as long as the process,
//! [`FileStore`] survives across sessions.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::data::CACHE_KEY_PREFIX;

/// Abstract cache behavior: look up and store raw bytes by key.
pub trait CacheStore {
    fn get(&self, key: &str) -> crate::Result<Option<Vec<u8>>>;

    fn set(&mut self, key: &str, value: &[u8]) -> crate::Result<()>;
}

impl<S: CacheStore + ?Sized> CacheStore for &mut S {
    fn get(&self, key: &str) -> crate::Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> crate::Result<()> {
        (**self).set(key, value)
    }
}

impl<S: CacheStore + ?Sized> CacheStore for Box<S> {
    fn get(&self, key: &str) -> crate::Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> crate::Result<()> {
        (**self).set(key, value)
    }
}

// ── in-process ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> crate::Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> crate::Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

// ── on disk ────────────────────────────────────────────────────────────────

/// One `{key}.json` file per entry inside a directory.
///
/// The directory is created on first write. Keys are used as file stems
/// verbatim, so they must not contain path separators.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> io::Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid cache key {key:?}"),
            ));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// Remove a single entry. Returns whether it existed.
    pub fn remove(&mut self, key: &str) -> crate::Result<bool> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove every holiday entry, plus staging files left by interrupted
    /// writes. Other files in the directory are left alone. Returns how many
    /// entries were removed.
    pub fn clear(&mut self) -> crate::Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(it) => it,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|it| it.to_str()) else {
                continue;
            };
            if !name.starts_with(CACHE_KEY_PREFIX) {
                continue;
            }
            if name.ends_with(".json") {
                fs::remove_file(&path)?;
                removed += 1;
            } else if name.ends_with(".json.tmp") {
                fs::remove_file(&path)?;
            }
        }
        debug!(dir = %self.dir.display(), removed, "cleared cache");
        Ok(removed)
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> crate::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> crate::Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so readers never see half a file.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }
}
