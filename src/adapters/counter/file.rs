//! File-backed counter store
//!
//! All counters live in one JSON object. Each increment holds an exclusive
//! OS lock on a sidecar `<file>.lock` for the whole read-modify-write, so
//! separate processes sharing the file serialize per store. The rewrite goes
//! through a uniquely named temporary file in the same directory and is
//! persisted with a rename.

use crate::adapters::traits::CounterStore;
use crate::domain::errors::CounterError;
use crate::domain::Result;
use async_trait::async_trait;
use fs4::FileExt;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

/// Counter store persisted to a JSON file
#[derive(Debug)]
pub struct FileCounterStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the sidecar file holding the cross-process lock
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }
}

#[async_trait]
impl CounterStore for FileCounterStore {
    async fn increment(&self, key: &str, amount: u64) -> Result<Option<u64>> {
        // serializes callers within this process; the file lock covers other processes
        let _guard = self.lock.lock().await;

        let path = self.path.clone();
        let lock_path = self.lock_path();
        let owned_key = key.to_string();
        let value = tokio::task::spawn_blocking(move || {
            locked_increment(&path, &lock_path, &owned_key, amount)
        })
        .await
        .map_err(|e| CounterError::Store(format!("counter task failed: {e}")))??;

        tracing::trace!(key = %key, value, path = %self.path.display(), "Counter incremented");

        Ok(Some(value))
    }
}

fn store_error(action: &str, path: &Path, e: impl std::fmt::Display) -> CounterError {
    CounterError::Store(format!("failed to {action} {}: {e}", path.display()))
}

/// Read-modify-write of one counter under an exclusive file lock
fn locked_increment(path: &Path, lock_path: &Path, key: &str, amount: u64) -> Result<u64> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| store_error("create counter directory", dir, e))?;

    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| store_error("open counter lock", lock_path, e))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| store_error("lock counter file", lock_path, e))?;

    let mut counters = read_counters(path)?;
    let value = counters.entry(key.to_string()).or_insert(0);
    *value = value.saturating_add(amount);
    let value = *value;

    write_counters(path, dir, &counters)?;

    // closing the handle releases the lock
    drop(lock_file);
    Ok(value)
}

fn read_counters(path: &Path) -> Result<BTreeMap<String, u64>> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map_err(|e| store_error("parse counter file", path, e).into()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(store_error("read counter file", path, e).into()),
    }
}

fn write_counters(path: &Path, dir: &Path, counters: &BTreeMap<String, u64>) -> Result<()> {
    let body = serde_json::to_vec_pretty(counters)?;

    let mut temp =
        NamedTempFile::new_in(dir).map_err(|e| store_error("create temp file in", dir, e))?;
    temp.write_all(&body)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| store_error("write temp file for", path, e))?;
    temp.persist(path)
        .map_err(|e| store_error("replace counter file", path, e.error))?;

    Ok(())
}
