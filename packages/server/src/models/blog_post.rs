use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::store::blog_post::{BlogPostDraft, BlogPostRecord};

use super::category::CategoryResponse;
use super::shared::{FieldValidator, dedup_ids, non_blank};

/// Request body for creating or replacing a blog post.
///
/// Required fields are optional at the serde level so that every missing
/// field is reported at once instead of failing on the first.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct BlogPostRequest {
    #[schema(example = "Hello, world")]
    pub title: Option<String>,
    #[schema(example = "A first post")]
    pub short_description: Option<String>,
    /// Markdown body.
    pub content: Option<String>,
    pub featured_image_url: Option<String>,
    #[schema(example = "hello-world")]
    pub url_handle: Option<String>,
    #[schema(example = "Jane Doe")]
    pub author: Option<String>,
    #[serde(default)]
    pub is_visible: bool,
    /// Defaults to the current time on create; left unchanged on update.
    pub publish_date: Option<DateTime<Utc>>,
    /// IDs of existing categories to attach.
    pub categories: Option<Vec<Uuid>>,
}

impl BlogPostRequest {
    /// Validate the request shape and split it into the post fields and the
    /// (deduplicated) category IDs, which are resolved separately.
    pub fn into_draft(self) -> Result<(BlogPostDraft, Vec<Uuid>), AppError> {
        let mut v = FieldValidator::new();
        let title = v.required("title", self.title);
        let short_description = v.required("short_description", self.short_description);
        let content = v.required("content", self.content);
        let url_handle = v.url_handle("url_handle", self.url_handle);
        let author = v.required("author", self.author);
        v.finish()?;

        let draft = BlogPostDraft {
            title,
            short_description,
            content,
            featured_image_url: non_blank(self.featured_image_url),
            url_handle,
            publish_date: self.publish_date,
            author,
            is_visible: self.is_visible,
        };
        Ok((draft, dedup_ids(self.categories.unwrap_or_default())))
    }
}

#[derive(Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct BlogPostResponse {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub featured_image_url: Option<String>,
    pub url_handle: String,
    /// Calendar date only, `YYYY-MM-DD`.
    #[schema(example = "2024-05-17")]
    pub publish_date: NaiveDate,
    pub author: String,
    pub is_visible: bool,
    pub categories: Vec<CategoryResponse>,
}

impl From<BlogPostRecord> for BlogPostResponse {
    fn from(record: BlogPostRecord) -> Self {
        let BlogPostRecord { post, categories } = record;
        Self {
            id: post.id,
            title: post.title,
            short_description: post.short_description,
            content: post.content,
            featured_image_url: post.featured_image_url,
            url_handle: post.url_handle,
            publish_date: post.publish_date.date_naive(),
            author: post.author,
            is_visible: post.is_visible,
            categories: categories.into_iter().map(CategoryResponse::from).collect(),
        }
    }
}
