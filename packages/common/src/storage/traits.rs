use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::error::StorageError;

/// Flat, name-addressed file storage.
///
/// Every file lives directly under [`FileStore::root`]; names never contain
/// directory components.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Directory all files are written into.
    fn root(&self) -> &Path;

    /// Write `data` under `name`, replacing any existing file, and return the
    /// on-disk path.
    async fn put(&self, name: &str, data: &[u8]) -> Result<PathBuf, StorageError>;
}
