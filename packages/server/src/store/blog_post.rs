use chrono::{DateTime, Utc};
use common::Clock;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{blog_post, blog_post_category, category};
use crate::error::AppError;

/// Mutable fields of a blog post, as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPostDraft {
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub featured_image_url: Option<String>,
    pub url_handle: String,
    /// `None` means "now" on create and "unchanged" on update.
    pub publish_date: Option<DateTime<Utc>>,
    pub author: String,
    pub is_visible: bool,
}

/// A post together with its categories.
#[derive(Debug, Clone)]
pub struct BlogPostRecord {
    pub post: blog_post::Model,
    pub categories: Vec<category::Model>,
}

impl BlogPostRecord {
    fn new(post: blog_post::Model, mut categories: Vec<category::Model>) -> Self {
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Self { post, categories }
    }
}

/// All posts with their categories, newest first.
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<BlogPostRecord>, AppError> {
    let rows = blog_post::Entity::find()
        .order_by_desc(blog_post::Column::PublishDate)
        .order_by_asc(blog_post::Column::Id)
        .find_with_related(category::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(post, categories)| BlogPostRecord::new(post, categories))
        .collect())
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<BlogPostRecord>, AppError> {
    let Some(post) = blog_post::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let categories = post.find_related(category::Entity).all(db).await?;
    Ok(Some(BlogPostRecord::new(post, categories)))
}

/// Insert a post and link it to `categories`, which must already exist.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    draft: BlogPostDraft,
    categories: Vec<category::Model>,
    clock: &dyn Clock,
) -> Result<BlogPostRecord, AppError> {
    let id = Uuid::new_v4();
    let new_post = blog_post::ActiveModel {
        id: Set(id),
        title: Set(draft.title),
        short_description: Set(draft.short_description),
        content: Set(draft.content),
        featured_image_url: Set(draft.featured_image_url),
        url_handle: Set(draft.url_handle),
        publish_date: Set(draft.publish_date.unwrap_or_else(|| clock.now())),
        author: Set(draft.author),
        is_visible: Set(draft.is_visible),
        ..Default::default()
    };

    let post = new_post.insert(db).await?;
    link_categories(db, id, &categories).await?;

    Ok(BlogPostRecord::new(post, categories))
}

/// Replace every mutable field and the category set of an existing post.
/// `None` when the post does not exist; nothing is written in that case.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    draft: BlogPostDraft,
    categories: Vec<category::Model>,
) -> Result<Option<BlogPostRecord>, AppError> {
    let Some(existing) = blog_post::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: blog_post::ActiveModel = existing.into();
    active.title = Set(draft.title);
    active.short_description = Set(draft.short_description);
    active.content = Set(draft.content);
    active.featured_image_url = Set(draft.featured_image_url);
    active.url_handle = Set(draft.url_handle);
    if let Some(publish_date) = draft.publish_date {
        active.publish_date = Set(publish_date);
    }
    active.author = Set(draft.author);
    active.is_visible = Set(draft.is_visible);

    let post = active.update(db).await?;

    blog_post_category::Entity::delete_many()
        .filter(blog_post_category::Column::BlogPostId.eq(id))
        .exec(db)
        .await?;
    link_categories(db, id, &categories).await?;

    Ok(Some(BlogPostRecord::new(post, categories)))
}

/// Remove a post and its category links. Returns the removed snapshot.
pub async fn delete<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<BlogPostRecord>, AppError> {
    let Some(record) = get_by_id(db, id).await? else {
        return Ok(None);
    };

    blog_post_category::Entity::delete_many()
        .filter(blog_post_category::Column::BlogPostId.eq(id))
        .exec(db)
        .await?;
    blog_post::Entity::delete_by_id(id).exec(db).await?;

    Ok(Some(record))
}

async fn link_categories<C: ConnectionTrait>(
    db: &C,
    blog_post_id: Uuid,
    categories: &[category::Model],
) -> Result<(), AppError> {
    if categories.is_empty() {
        return Ok(());
    }

    let links = categories.iter().map(|c| blog_post_category::ActiveModel {
        blog_post_id: Set(blog_post_id),
        category_id: Set(c.id),
    });
    blog_post_category::Entity::insert_many(links)
        .exec_without_returning(db)
        .await?;

    Ok(())
}
