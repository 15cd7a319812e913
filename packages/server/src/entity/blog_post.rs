use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub short_description: String,
    #[sea_orm(column_type = "Text")]
    pub content: String, // in Markdown
    pub featured_image_url: Option<String>,
    pub url_handle: String,
    pub publish_date: DateTimeUtc,
    pub author: String,
    #[sea_orm(default_value = false)]
    pub is_visible: bool,

    #[sea_orm(has_many, via = "blog_post_category")]
    pub categories: HasMany<super::category::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
