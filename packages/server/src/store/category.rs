use std::collections::HashSet;

use sea_orm::*;
use uuid::Uuid;

use crate::entity::{blog_post_category, category};
use crate::error::AppError;

/// Mutable fields of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub url_handle: String,
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<category::Model>, AppError> {
    Ok(category::Entity::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?)
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<category::Model>, AppError> {
    Ok(category::Entity::find_by_id(id).one(db).await?)
}

pub async fn get_by_url_handle<C: ConnectionTrait>(
    db: &C,
    url_handle: &str,
) -> Result<Option<category::Model>, AppError> {
    Ok(category::Entity::find()
        .filter(category::Column::UrlHandle.eq(url_handle))
        .one(db)
        .await?)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    draft: CategoryDraft,
) -> Result<category::Model, AppError> {
    let new_category = category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(draft.name),
        url_handle: Set(draft.url_handle),
        ..Default::default()
    };

    Ok(new_category.insert(db).await?)
}

/// Overwrite name and handle. `None` when the category does not exist.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    draft: CategoryDraft,
) -> Result<Option<category::Model>, AppError> {
    let Some(existing) = get_by_id(db, id).await? else {
        return Ok(None);
    };

    let mut active: category::ActiveModel = existing.into();
    active.name = Set(draft.name);
    active.url_handle = Set(draft.url_handle);

    Ok(Some(active.update(db).await?))
}

/// Remove a category and detach it from every post. Returns the removed row.
pub async fn delete<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<category::Model>, AppError> {
    let Some(existing) = get_by_id(db, id).await? else {
        return Ok(None);
    };

    blog_post_category::Entity::delete_many()
        .filter(blog_post_category::Column::CategoryId.eq(id))
        .exec(db)
        .await?;
    category::Entity::delete_by_id(id).exec(db).await?;

    Ok(Some(existing))
}

/// Categories whose ID is in `ids`, ordered by name. Unknown IDs are skipped.
pub async fn get_many_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: &[Uuid],
) -> Result<Vec<category::Model>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(category::Entity::find()
        .filter(category::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?)
}

/// Whether every ID in `ids` names an existing category.
pub async fn validate_ids<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> Result<bool, AppError> {
    let distinct: HashSet<Uuid> = ids.iter().copied().collect();
    if distinct.is_empty() {
        return Ok(true);
    }

    let found = category::Entity::find()
        .filter(category::Column::Id.is_in(distinct.iter().copied()))
        .count(db)
        .await?;

    Ok(found == distinct.len() as u64)
}
