use tracing::{debug, warn};

use super::model::Dependency;
use crate::core::runtime::GameRuntime;

/// Whether `dependency` is present in the game's prefix right now.
///
/// Reads the current settings, translates the dependency's guest path and
/// checks the host filesystem. Nothing is cached; anything that prevents the
/// check counts as not installed.
pub async fn is_dependency_installed(game: &dyn GameRuntime, dependency: &Dependency) -> bool {
    let settings = match game.settings().await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("[{}] Cannot read settings: {}", game.app_name(), e);
            return false;
        }
    };

    let host_path = match game.translate_path(&dependency.probe_path, &settings).await {
        Ok(path) => path,
        Err(e) => {
            warn!("[{}] Cannot translate {}: {}", game.app_name(), dependency.probe_path, e);
            return false;
        }
    };

    let installed = tokio::fs::try_exists(&host_path).await.unwrap_or(false);
    debug!(
        "[{}] {} at {:?}: {}",
        game.app_name(),
        dependency.id,
        host_path,
        if installed { "present" } else { "absent" }
    );
    installed
}
