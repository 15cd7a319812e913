use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entity::category;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::blog_post::{BlogPostRequest, BlogPostResponse};
use crate::models::shared::ApiResponse;
use crate::state::AppState;
use crate::store::blog_post as blog_post_store;
use crate::store::category as category_store;

#[utoipa::path(
    get,
    path = "/",
    tag = "Blog Posts",
    operation_id = "listBlogPosts",
    summary = "List all blog posts",
    description = "Returns every post with its categories, newest publish date first.",
    responses(
        (status = 200, description = "Blog post list", body = ApiResponse<Vec<BlogPostResponse>>),
        (status = 500, description = "Unexpected failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blog_posts(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<BlogPostResponse>>, AppError> {
    let posts = blog_post_store::list_all(&state.db).await?;

    Ok(ApiResponse::ok(
        "Success",
        posts.into_iter().map(BlogPostResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blog Posts",
    operation_id = "getBlogPost",
    summary = "Get a blog post by ID",
    params(("id" = Uuid, Path, description = "Blog post ID")),
    responses(
        (status = 200, description = "Blog post details", body = ApiResponse<BlogPostResponse>),
        (status = 400, description = "Malformed ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_blog_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<ApiResponse<BlogPostResponse>, AppError> {
    let post = blog_post_store::get_by_id(&state.db, id)
        .await?
        .ok_or_else(blog_post_not_found)?;

    Ok(ApiResponse::ok("Success", post.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blog Posts",
    operation_id = "createBlogPost",
    summary = "Create a blog post",
    description = "Creates a post with a server-generated ID. Every referenced category must exist, \
                   otherwise nothing is written. `publish_date` defaults to the current time.",
    request_body = BlogPostRequest,
    responses(
        (status = 201, description = "Blog post created", body = ApiResponse<BlogPostResponse>,
            headers(("Location" = String, description = "URL of the new blog post"))),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_blog_post(
    State(state): State<AppState>,
    AppJson(payload): AppJson<BlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (draft, category_ids) = payload.into_draft()?;

    let txn = state.db.begin().await?;
    let categories = resolve_categories(&txn, &category_ids).await?;
    let post = blog_post_store::create(&txn, draft, categories, state.clock.as_ref()).await?;
    txn.commit().await?;

    info!(id = %post.post.id, categories = post.categories.len(), "Created blog post");

    let location = super::location(&state, "BlogPost", post.post.id);
    Ok((
        [(header::LOCATION, location)],
        ApiResponse::created(
            "Blog post created successfully",
            BlogPostResponse::from(post),
        ),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Blog Posts",
    operation_id = "updateBlogPost",
    summary = "Replace a blog post",
    description = "Overwrites every mutable field and the category set. An absent or empty \
                   `categories` list detaches all categories. An absent `publish_date` keeps \
                   the stored one.",
    params(("id" = Uuid, Path, description = "Blog post ID")),
    request_body = BlogPostRequest,
    responses(
        (status = 200, description = "Blog post updated", body = ApiResponse<BlogPostResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_blog_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<BlogPostRequest>,
) -> Result<ApiResponse<BlogPostResponse>, AppError> {
    let (draft, category_ids) = payload.into_draft()?;

    let txn = state.db.begin().await?;
    let categories = resolve_categories(&txn, &category_ids).await?;
    let post = blog_post_store::update(&txn, id, draft, categories)
        .await?
        .ok_or_else(blog_post_not_found)?;
    txn.commit().await?;

    info!(%id, categories = post.categories.len(), "Updated blog post");
    Ok(ApiResponse::ok("Blog post updated successfully", post.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blog Posts",
    operation_id = "deleteBlogPost",
    summary = "Delete a blog post",
    description = "Deletes the post and its category links. Returns the deleted post.",
    params(("id" = Uuid, Path, description = "Blog post ID")),
    responses(
        (status = 200, description = "Blog post deleted", body = ApiResponse<BlogPostResponse>),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_blog_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<ApiResponse<BlogPostResponse>, AppError> {
    let txn = state.db.begin().await?;
    let post = blog_post_store::delete(&txn, id)
        .await?
        .ok_or_else(blog_post_not_found)?;
    txn.commit().await?;

    info!(%id, "Deleted blog post");
    Ok(ApiResponse::ok("Blog post deleted successfully", post.into()))
}

/// Check that every id exists, then load the categories.
///
/// Runs on the caller's transaction so the check and the write see the same
/// rows.
async fn resolve_categories<C: ConnectionTrait>(
    db: &C,
    ids: &[Uuid],
) -> Result<Vec<category::Model>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    if !category_store::validate_ids(db, ids).await? {
        return Err(AppError::field(
            "categories",
            "One or more category IDs are invalid",
        ));
    }

    category_store::get_many_by_ids(db, ids).await
}

fn blog_post_not_found() -> AppError {
    AppError::NotFound("Blog post not found".into())
}
