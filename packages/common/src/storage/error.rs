use thiserror::Error;

/// Errors that can occur while reading or writing stored files.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file name is not a plain, flat file name.
    #[error("invalid file name: {0}")]
    InvalidName(String),

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
