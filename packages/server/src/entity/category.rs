use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub url_handle: String,

    /// Inverse side of the post relation. Never exposed in responses.
    #[sea_orm(has_many, via = "blog_post_category")]
    pub blog_posts: HasMany<super::blog_post::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
