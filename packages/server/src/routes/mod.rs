use axum::extract::DefaultBodyLimit;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::{blog_post, category, image};
use crate::state::AppState;

/// Multipart framing allowance on top of the configured image size.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/BlogPost", blog_post_routes())
        .nest("/Category", category_routes())
        .nest("/Image", image_routes(config))
}

fn blog_post_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            blog_post::list_blog_posts,
            blog_post::create_blog_post
        ))
        .routes(routes!(
            blog_post::get_blog_post,
            blog_post::update_blog_post,
            blog_post::delete_blog_post
        ))
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(category::list_categories, category::create_category))
        .routes(routes!(category::get_category_by_handle))
        .routes(routes!(
            category::get_category,
            category::update_category,
            category::delete_category
        ))
}

fn image_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(image::list_images, image::upload_image))
        .layer(image_body_limit(config.storage.max_image_size))
}

fn image_body_limit(max_image_size: u64) -> DefaultBodyLimit {
    let limit = usize::try_from(max_image_size).unwrap_or(usize::MAX);
    DefaultBodyLimit::max(limit.saturating_add(MULTIPART_OVERHEAD))
}
