/// Reasons a requested image file name is rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    Empty,
    TooLong,
    /// Contains `/` or `\`.
    ContainsPathSeparator,
    /// Starts with `.`, which also covers `..`.
    Hidden,
    /// Contains characters that would need escaping in a URL path.
    UnsafeCharacter,
}

/// Longest accepted logical file name, extension excluded.
pub const MAX_FILENAME_LEN: usize = 128;

impl FilenameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "File name cannot be empty",
            Self::TooLong => "File name exceeds maximum length of 128 characters",
            Self::ContainsPathSeparator => "Invalid file name: path separators are not allowed",
            Self::Hidden => "Invalid file name: names starting with '.' are not allowed",
            Self::UnsafeCharacter => {
                "Invalid file name: only letters, digits, '-', '_' and '.' are allowed"
            }
        }
    }
}

/// Validate a logical file name for a stored image.
///
/// The name becomes both the on-disk name and the last URL segment, so it
/// must be flat and URL-safe. Returns the trimmed name.
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed.chars().count() > MAX_FILENAME_LEN {
        return Err(FilenameError::TooLong);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(FilenameError::UnsafeCharacter);
    }

    Ok(trimmed)
}
