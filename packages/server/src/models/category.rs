use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::category;
use crate::error::AppError;
use crate::store::category::CategoryDraft;

use super::shared::FieldValidator;

/// Request body for creating or replacing a category.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CategoryRequest {
    #[schema(example = "Tech")]
    pub name: Option<String>,
    #[schema(example = "tech")]
    pub url_handle: Option<String>,
}

impl CategoryRequest {
    pub fn into_draft(self) -> Result<CategoryDraft, AppError> {
        let mut v = FieldValidator::new();
        let name = v.required("name", self.name);
        let url_handle = v.url_handle("url_handle", self.url_handle);
        v.finish()?;

        Ok(CategoryDraft { name, url_handle })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    #[schema(example = "Tech")]
    pub name: String,
    #[schema(example = "tech")]
    pub url_handle: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            url_handle: m.url_handle,
        }
    }
}
