use std::sync::Arc;

use common::Clock;
use common::storage::FileStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub images: Arc<dyn FileStore>,
    pub clock: Arc<dyn Clock>,
}
