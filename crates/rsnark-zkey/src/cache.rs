// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Loaded keys shared across calls, keyed by canonical path.
//!
//! An entry is reused only while the file's length and modification time
//! are unchanged; otherwise the key is reloaded and the entry replaced.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
    time::SystemTime,
};

use crate::{ProvingKey, ZkeyError};

#[derive(Debug)]
struct Entry {
    len: u64,
    modified: Option<SystemTime>,
    key: Arc<ProvingKey>,
}

#[derive(Debug, Default)]
pub struct ZkeyCache {
    entries: Mutex<HashMap<PathBuf, Entry>>,
}

impl ZkeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<ProvingKey>, ZkeyError> {
        let path = fs::canonicalize(path.as_ref())?;
        let meta = fs::metadata(&path)?;
        let len = meta.len();
        let modified = meta.modified().ok();

        if let Some(entry) = self.lock().get(&path) {
            if entry.len == len && entry.modified == modified {
                tracing::debug!(path = %path.display(), "zkey cache hit");
                return Ok(Arc::clone(&entry.key));
            }
        }

        // Loaded outside the lock so other paths are not blocked.
        let key = Arc::new(ProvingKey::from_file(&path)?);
        self.lock().insert(
            path,
            Entry {
                len,
                modified,
                key: Arc::clone(&key),
            },
        );
        Ok(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock cannot leave a half-written entry.
    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Entry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
