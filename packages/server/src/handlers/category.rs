use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::category::{CategoryRequest, CategoryResponse};
use crate::models::shared::ApiResponse;
use crate::state::AppState;
use crate::store::category as category_store;

#[utoipa::path(
    get,
    path = "/",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List all categories",
    description = "Returns every category ordered by name.",
    responses(
        (status = 200, description = "Category list", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 500, description = "Unexpected failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<CategoryResponse>>, AppError> {
    let categories = category_store::list_all(&state.db).await?;

    Ok(ApiResponse::ok(
        "Success",
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    operation_id = "getCategory",
    summary = "Get a category by ID",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Malformed ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<ApiResponse<CategoryResponse>, AppError> {
    let category = category_store::get_by_id(&state.db, id)
        .await?
        .ok_or_else(category_not_found)?;

    Ok(ApiResponse::ok(
        "Category retrieved successfully",
        category.into(),
    ))
}

#[utoipa::path(
    get,
    path = "/by-handle/{url_handle}",
    tag = "Categories",
    operation_id = "getCategoryByHandle",
    summary = "Get a category by its URL handle",
    params(("url_handle" = String, Path, description = "Category URL handle")),
    responses(
        (status = 200, description = "Category details", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_category_by_handle(
    State(state): State<AppState>,
    AppPath(url_handle): AppPath<String>,
) -> Result<ApiResponse<CategoryResponse>, AppError> {
    let category = category_store::get_by_url_handle(&state.db, &url_handle)
        .await?
        .ok_or_else(category_not_found)?;

    Ok(ApiResponse::ok(
        "Category retrieved successfully",
        category.into(),
    ))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Categories",
    operation_id = "createCategory",
    summary = "Create a category",
    description = "Creates a category with a server-generated ID. Any `id` in the body is ignored.",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponse>,
            headers(("Location" = String, description = "URL of the new category"))),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = payload.into_draft()?;

    let category = category_store::create(&state.db, draft).await?;
    info!(id = %category.id, "Created category");

    let location = super::location(&state, "Category", category.id);
    Ok((
        [(header::LOCATION, location)],
        ApiResponse::created(
            "Category created successfully",
            CategoryResponse::from(category),
        ),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    operation_id = "updateCategory",
    summary = "Replace a category",
    description = "Overwrites the name and URL handle of an existing category.",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<CategoryRequest>,
) -> Result<ApiResponse<CategoryResponse>, AppError> {
    let draft = payload.into_draft()?;

    let category = category_store::update(&state.db, id, draft)
        .await?
        .ok_or_else(category_not_found)?;

    Ok(ApiResponse::ok(
        "Category updated successfully",
        category.into(),
    ))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    operation_id = "deleteCategory",
    summary = "Delete a category",
    description = "Deletes the category and detaches it from every post. Returns the deleted category.",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<ApiResponse<CategoryResponse>, AppError> {
    let txn = state.db.begin().await?;
    let category = category_store::delete(&txn, id)
        .await?
        .ok_or_else(category_not_found)?;
    txn.commit().await?;

    info!(%id, "Deleted category");
    Ok(ApiResponse::ok(
        "Category deleted successfully",
        category.into(),
    ))
}

fn category_not_found() -> AppError {
    AppError::NotFound("Category not found".into())
}
