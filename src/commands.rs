use tracing::info;

use crate::core::cache::CacheOutcome;
use crate::core::error::SetupResult;
use crate::core::library::GameRecord;
use crate::core::setup::DependencyStatus;
use crate::core::state::AppState;

/// Run the dependency setup for `app_name` and wait for it to finish.
pub async fn setup_dependency(state: &AppState, app_name: &str) -> SetupResult<()> {
    state.coordinator.maybe_setup_dependency(app_name).await
}

/// Start the dependency setup for `app_name` without waiting on it.
pub fn start_dependency_setup(state: &AppState, app_name: &str) {
    let _ = state.coordinator.clone().spawn(app_name.to_string());
}

pub async fn get_dependency_status(
    state: &AppState,
    app_name: &str,
) -> SetupResult<DependencyStatus> {
    state.coordinator.dependency_status(app_name).await
}

/// Refresh the cached installer if it is missing or stale.
pub async fn refresh_installer_cache(state: &AppState) -> SetupResult<CacheOutcome> {
    let installer = state.coordinator.installer();
    let outcome = installer.fetch_installer().await?;
    info!(
        "Installer cache {:?}: {:?}",
        state.cache.path_for(&installer.dependency().installer_file),
        outcome
    );
    Ok(outcome)
}

pub async fn list_games(state: &AppState) -> SetupResult<Vec<GameRecord>> {
    state.library.list().await
}
