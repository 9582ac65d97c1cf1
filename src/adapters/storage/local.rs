//! Directory-backed object store
//!
//! Each bucket is a directory under the root; object keys map to relative
//! paths inside it.

use crate::adapters::traits::ObjectStore;
use crate::domain::errors::StorageError;
use crate::domain::Result;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Object store over the local filesystem
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a bucket/key pair to a path, rejecting keys that escape the bucket
    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let mut path = self.root.join(checked_relative(bucket)?);
        path.push(checked_relative(key)?);
        Ok(path)
    }
}

fn checked_relative(part: &str) -> Result<PathBuf> {
    let relative = Path::new(part);
    let safe = !part.is_empty()
        && relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

    if !safe {
        return Err(StorageError::InvalidKey(part.to_string()).into());
    }
    Ok(relative.to_path_buf())
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        let body = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                }
            } else {
                StorageError::ReadFailed {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: e.to_string(),
                }
            }
        })?;
        Ok(body)
    }

    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        let write_failed = |message: String| StorageError::WriteFailed {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_failed(e.to_string()))?;
        }
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| write_failed(e.to_string()))?;

        tracing::debug!(bucket = %bucket, key = %key, "Object written");
        Ok(())
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        tokio::fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                }
            } else {
                StorageError::DeleteFailed {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        tracing::debug!(bucket = %bucket, key = %key, "Object deleted");
        Ok(())
    }
}
