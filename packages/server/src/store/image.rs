use common::Clock;
use common::storage::FileStore;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::blog_image;
use crate::error::AppError;
use crate::extractors::origin::RequestOrigin;

/// URL path segment (below the base path) that stored images are served from.
pub const IMAGES_ROUTE: &str = "/Images";

/// An uploaded image ready to be stored.
pub struct ImageUpload {
    pub file_name: String,
    /// Lowercase extension including the leading dot.
    pub file_extension: String,
    pub title: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn stored_name(&self) -> String {
        format!("{}{}", self.file_name, self.file_extension)
    }
}

/// Write the file, derive its public URL and record the metadata row.
///
/// The file is written before anything else and is not removed if a later
/// step fails. Without a request origin the URL cannot be built and the call
/// fails with [`AppError::InvalidOperation`].
pub async fn store_uploaded_image<C: ConnectionTrait>(
    db: &C,
    files: &dyn FileStore,
    clock: &dyn Clock,
    origin: Option<&RequestOrigin>,
    upload: ImageUpload,
) -> Result<blog_image::Model, AppError> {
    let stored_name = upload.stored_name();
    let path = files.put(&stored_name, &upload.bytes).await?;

    let origin = origin.ok_or_else(|| {
        AppError::InvalidOperation("No request context available to build the image URL".into())
    })?;
    let url = origin.absolute_url(&format!("{IMAGES_ROUTE}/{stored_name}"));

    let image = blog_image::ActiveModel {
        id: Set(Uuid::new_v4()),
        file_name: Set(upload.file_name),
        file_extension: Set(upload.file_extension),
        title: Set(upload.title),
        url: Set(url),
        created_at: Set(clock.now()),
    };
    let model = image.insert(db).await?;

    tracing::info!(id = %model.id, path = %path.display(), "Stored image");
    Ok(model)
}

/// All images, newest first.
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<blog_image::Model>, AppError> {
    Ok(blog_image::Entity::find()
        .order_by_desc(blog_image::Column::CreatedAt)
        .all(db)
        .await?)
}
