use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::origin::CurrentOrigin;
use crate::models::image::{ImageResponse, ImageUploadRequest, validate_image_upload};
use crate::models::shared::ApiResponse;
use crate::state::AppState;
use crate::store::image::{self as image_store, ImageUpload};

#[utoipa::path(
    get,
    path = "/",
    tag = "Images",
    operation_id = "listImages",
    summary = "List all uploaded images",
    responses(
        (status = 200, description = "Image list, newest first", body = ApiResponse<Vec<ImageResponse>>),
        (status = 500, description = "Unexpected failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_images(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<ImageResponse>>, AppError> {
    let images = image_store::list_all(&state.db).await?;

    Ok(ApiResponse::ok(
        "Success",
        images.into_iter().map(ImageResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Images",
    operation_id = "uploadImage",
    summary = "Upload an image",
    description = "Stores the file under the images directory and returns its public URL. \
                   An existing file with the same name is overwritten.",
    request_body(content = ImageUploadRequest, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<ImageResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Storage failure or missing request host (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, origin, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    CurrentOrigin(origin): CurrentOrigin,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let max_size = state.config.storage.max_image_size;

    let mut original_name: Option<String> = None;
    let mut bytes: Vec<u8> = Vec::new();
    let mut file_name: Option<String> = None;
    let mut title: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                original_name = field.file_name().map(str::to_string);
                bytes = read_limited(field, max_size).await?;
            }
            Some("file_name") => {
                file_name = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("title") => {
                title = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let form = validate_image_upload(
        original_name.as_deref(),
        bytes.len() as u64,
        max_size,
        file_name,
        title,
    )?;

    let upload = ImageUpload {
        file_name: form.file_name,
        file_extension: form.file_extension,
        title: form.title,
        bytes,
    };
    let image = image_store::store_uploaded_image(
        &state.db,
        state.images.as_ref(),
        state.clock.as_ref(),
        origin.as_ref(),
        upload,
    )
    .await?;

    info!(id = %image.id, url = %image.url, "Uploaded image");
    Ok(ApiResponse::created(
        "Image uploaded successfully",
        ImageResponse::from(image),
    ))
}

/// Buffer a file part, bailing out as soon as it grows past `max_size`.
async fn read_limited(mut field: Field<'_>, max_size: u64) -> Result<Vec<u8>, AppError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (buf.len() + chunk.len()) as u64 > max_size {
            return Err(AppError::field(
                "file",
                format!("File size exceeds the maximum of {max_size} bytes"),
            ));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::field("file", format!("Invalid multipart payload: {}", e.body_text()))
}
