use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::blog_image;
use crate::error::AppError;
use crate::utils::filename::validate_flat_filename;

use super::shared::FieldValidator;

/// Extensions accepted for uploaded images.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

#[derive(Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct ImageResponse {
    pub id: Uuid,
    #[schema(example = "3f2c9d1e")]
    pub file_name: String,
    #[schema(example = ".png")]
    pub file_extension: String,
    pub title: Option<String>,
    #[schema(example = "http://localhost:3000/Images/3f2c9d1e.png")]
    pub url: String,
    /// Calendar date only, `YYYY-MM-DD`.
    #[schema(example = "2024-05-17")]
    pub created_at: NaiveDate,
}

impl From<blog_image::Model> for ImageResponse {
    fn from(m: blog_image::Model) -> Self {
        Self {
            id: m.id,
            file_name: m.file_name,
            file_extension: m.file_extension,
            title: m.title,
            url: m.url,
            created_at: m.created_at.date_naive(),
        }
    }
}

/// Lowercase extension of `original_name`, with the leading dot.
pub fn extension_of(original_name: &str) -> Option<String> {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
}

/// Multipart layout accepted by the upload endpoint. Documentation only; the
/// handler reads the parts one by one.
#[derive(utoipa::ToSchema)]
pub struct ImageUploadRequest {
    /// Image file (`.jpg`, `.jpeg` or `.png`).
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Stored file name without extension. Generated when omitted.
    pub file_name: Option<String>,
    pub title: Option<String>,
}

/// Validated pieces of a multipart image upload.
#[derive(Debug)]
pub struct ImageUploadForm {
    pub file_name: String,
    pub file_extension: String,
    pub title: Option<String>,
}

/// Check the uploaded file and the optional logical file name.
///
/// A fresh name is generated when the client does not supply one.
pub fn validate_image_upload(
    original_name: Option<&str>,
    size: u64,
    max_size: u64,
    requested_name: Option<String>,
    title: Option<String>,
) -> Result<ImageUploadForm, AppError> {
    let mut v = FieldValidator::new();

    let file_extension = match original_name {
        None => {
            v.add("file", "The file field is required.");
            String::new()
        }
        Some(name) => match extension_of(name) {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => ext,
            _ => {
                v.add(
                    "file",
                    format!("Unsupported file extension. Allowed: {}", ALLOWED_EXTENSIONS.join(", ")),
                );
                String::new()
            }
        },
    };

    if size > max_size {
        v.add(
            "file",
            format!("File size exceeds the maximum of {max_size} bytes"),
        );
    }

    let file_name = match requested_name.as_deref().map(str::trim) {
        None | Some("") => Uuid::new_v4().simple().to_string(),
        Some(name) => match validate_flat_filename(name) {
            Ok(name) => name.to_string(),
            Err(e) => {
                v.add("file_name", e.message());
                String::new()
            }
        },
    };

    v.finish()?;

    Ok(ImageUploadForm {
        file_name,
        file_extension,
        title: super::shared::non_blank(title),
    })
}
