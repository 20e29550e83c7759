pub mod manager;
pub mod model;

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::runtime::GameRuntime;

pub use manager::JsonLibrary;
pub use model::GameRecord;

/// Lookup of games by app name.
#[async_trait]
pub trait GameLibrary: Send + Sync {
    /// `None` when no such game is known.
    async fn get(&self, app_name: &str) -> Option<Arc<dyn GameRuntime>>;
}
