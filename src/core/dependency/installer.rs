use std::ffi::OsString;
use std::sync::Arc;

use tracing::{info, warn};

use super::model::Dependency;
use super::probe::is_dependency_installed;
use crate::core::cache::{CacheOutcome, CacheStore};
use crate::core::error::{FetchError, SetupResult};
use crate::core::i18n::Locale;
use crate::core::notify::AlertSurface;
use crate::core::runtime::{ExecOutput, GameRuntime};

/// Installs a dependency into a game's prefix and confirms it by probing.
///
/// The installer's exit status is advisory only: silent installers exit 0
/// on failure often enough that the filesystem probe is the sole judge.
pub struct DependencyInstaller {
    dependency: Dependency,
    cache: Arc<CacheStore>,
    alerts: Arc<dyn AlertSurface>,
    locale: Locale,
}

impl DependencyInstaller {
    pub fn new(
        dependency: Dependency,
        cache: Arc<CacheStore>,
        alerts: Arc<dyn AlertSurface>,
        locale: Locale,
    ) -> Self {
        Self {
            dependency,
            cache,
            alerts,
            locale,
        }
    }

    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }

    /// Refresh the cached installer if it is missing or stale.
    pub async fn fetch_installer(&self) -> Result<CacheOutcome, FetchError> {
        self.cache
            .ensure_cached(&self.dependency.installer_file, &self.dependency.installer_url)
            .await
    }

    /// Run the cached installer silently inside the game's prefix.
    pub async fn run_installer(&self, game: &dyn GameRuntime) -> SetupResult<ExecOutput> {
        let installer = self.cache.path_for(&self.dependency.installer_file);
        let mut args: Vec<OsString> = Vec::with_capacity(1 + self.dependency.silent_args.len());
        args.push(installer.into_os_string());
        args.extend(self.dependency.silent_args.iter().map(OsString::from));

        info!("[{}] Running {} installer", game.app_name(), self.dependency.display_name);
        game.run_in_prefix(&args).await
    }

    /// Whether the dependency is present in the game's prefix.
    pub async fn probe(&self, game: &dyn GameRuntime) -> bool {
        is_dependency_installed(game, &self.dependency).await
    }

    /// Fetch, run, then probe. Returns `true` exactly when the final probe
    /// found the dependency; otherwise an error alert has been shown.
    pub async fn install(&self, game: &dyn GameRuntime) -> bool {
        if let Err(e) = self.fetch_installer().await {
            warn!(
                "[{}] Could not refresh {} installer, trying the cached copy: {}",
                game.app_name(),
                self.dependency.display_name,
                e
            );
        }

        if let Err(e) = self.run_installer(game).await {
            warn!(
                "[{}] Error installing {}: {}",
                game.app_name(),
                self.dependency.display_name,
                e
            );
        }

        if self.probe(game).await {
            info!("[{}] {} installed", game.app_name(), self.dependency.display_name);
            return true;
        }

        warn!(
            "[{}] {} still missing after installation",
            game.app_name(),
            self.dependency.display_name
        );
        self.alerts.show(self.dependency.failure_alert(self.locale));
        false
    }
}
