use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::error::StorageError;
use super::traits::FileStore;

/// Stores files in a single local directory.
///
/// Writes go to a sibling staging directory (`{base_path}.tmp`) first and are
/// renamed into place, so a reader of `base_path` never observes a
/// half-written file.
pub struct FilesystemFileStore {
    base_path: PathBuf,
    staging_path: PathBuf,
}

impl FilesystemFileStore {
    /// Create the store, creating `base_path` and its staging directory if
    /// they do not exist yet.
    pub async fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        let staging_path = staging_dir_for(&base_path);
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(&staging_path).await?;
        Ok(Self {
            base_path,
            staging_path,
        })
    }

    /// Directory partial writes are staged in. Never below [`FileStore::root`].
    pub fn staging_path(&self) -> &Path {
        &self.staging_path
    }

    fn file_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.is_empty()
            || name.starts_with('.')
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0')
        {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.base_path.join(name))
    }

    fn temp_path(&self) -> PathBuf {
        self.staging_path.join(uuid::Uuid::new_v4().to_string())
    }
}

/// `{base_path}.tmp`, next to `base_path` so renames stay on one filesystem.
fn staging_dir_for(base_path: &Path) -> PathBuf {
    let trimmed: PathBuf = base_path.components().collect();
    let mut name = trimmed.into_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[async_trait]
impl FileStore for FilesystemFileStore {
    fn root(&self) -> &Path {
        &self.base_path
    }

    async fn put(&self, name: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.file_path(name)?;

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored file");
        Ok(path)
    }
}
