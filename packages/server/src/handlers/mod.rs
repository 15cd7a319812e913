pub mod blog_post;
pub mod category;
pub mod image;

use uuid::Uuid;

use crate::extractors::origin::normalize_base_path;
use crate::state::AppState;

/// `Location` value pointing at the get-by-id route of `resource`.
fn location(state: &AppState, resource: &str, id: Uuid) -> String {
    format!(
        "{}/api/{resource}/{id}",
        normalize_base_path(&state.config.server.base_path)
    )
}
