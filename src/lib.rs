pub mod config;
pub mod error;
pub mod model;
pub mod prompt;
pub mod web;

use std::sync::Arc;

use config::AppConfig;
use model::Backend;

// App state shared by every worker
pub struct AppState {
    pub config: AppConfig,
    pub backend: Arc<dyn Backend>,
}

impl AppState {
    pub fn new(config: AppConfig, backend: Arc<dyn Backend>) -> Self {
        Self { config, backend }
    }
}
