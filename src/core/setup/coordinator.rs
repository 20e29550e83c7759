// ─── Setup Coordinator ───
// Entry point run before a game launches: decides whether the prefix needs
// the dependency and, if so, installs it next to the font packages.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::dependency::DependencyInstaller;
use crate::core::error::{SetupError, SetupResult};
use crate::core::fonts::FontProvisioner;
use crate::core::library::GameLibrary;
use crate::core::notify::{GameStatus, StatusEvent, StatusSink};
use crate::core::runtime::GameRuntime;

/// Side-effect free view of a game's dependency state.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DependencyStatus {
    pub app_name: String,
    pub dependency: String,
    /// The game's main executable requires the dependency.
    pub applicable: bool,
    pub installed: bool,
}

pub struct SetupCoordinator {
    library: Arc<dyn GameLibrary>,
    installer: DependencyInstaller,
    fonts: Arc<dyn FontProvisioner>,
    status: Arc<dyn StatusSink>,
}

impl SetupCoordinator {
    pub fn new(
        library: Arc<dyn GameLibrary>,
        installer: DependencyInstaller,
        fonts: Arc<dyn FontProvisioner>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            library,
            installer,
            fonts,
            status,
        }
    }

    pub fn installer(&self) -> &DependencyInstaller {
        &self.installer
    }

    /// Install the dependency into `app_name`'s prefix when the game needs it
    /// and it is missing.
    ///
    /// Unknown games, games that do not need the dependency and prefixes that
    /// already have it are left alone: no download, no process, no event.
    /// Otherwise a status event is published and the installer and font
    /// provisioning run concurrently until both finish.
    ///
    /// Installer problems never surface here (they end in an alert). A font
    /// provisioning failure is returned as the error.
    pub async fn maybe_setup_dependency(&self, app_name: &str) -> SetupResult<()> {
        let Some(game) = self.library.get(app_name).await else {
            debug!("Setup skipped: {} is not in the library", app_name);
            return Ok(());
        };

        let Some(install) = game.install_info().await else {
            debug!("Setup skipped: {} is not installed", app_name);
            return Ok(());
        };

        let dependency = self.installer.dependency();
        if !dependency.is_required_by(&install) {
            return Ok(());
        }

        if self.installer.probe(game.as_ref()).await {
            debug!("[{}] {} already installed", app_name, dependency.display_name);
            return Ok(());
        }

        info!("[{}] Setting up {}", app_name, dependency.display_name);
        self.status.publish(StatusEvent {
            app_name: app_name.to_string(),
            runner: game.runner(),
            status: GameStatus::InstallingDependency,
        });

        let (installed, fonts) = tokio::join!(
            self.installer.install(game.as_ref()),
            self.provision_fonts(game.as_ref()),
        );

        debug!(
            "[{}] {} setup finished, installed={}",
            app_name, dependency.display_name, installed
        );
        fonts
    }

    async fn provision_fonts(&self, game: &dyn GameRuntime) -> SetupResult<()> {
        let settings = game.settings().await?;
        self.fonts
            .provision(
                &settings.compat_layer_version,
                &settings.prefix_path,
                &self.installer.dependency().font_packages,
            )
            .await
    }

    /// Run [`Self::maybe_setup_dependency`] in the background. Errors are
    /// logged, never returned.
    pub fn spawn(self: Arc<Self>, app_name: String) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.maybe_setup_dependency(&app_name).await {
                warn!("[{}] Dependency setup failed: {}", app_name, e);
            }
        })
    }

    /// Report whether `app_name` needs the dependency and whether it is present.
    pub async fn dependency_status(&self, app_name: &str) -> SetupResult<DependencyStatus> {
        let game = self
            .library
            .get(app_name)
            .await
            .ok_or_else(|| SetupError::GameNotFound(app_name.to_string()))?;

        let dependency = self.installer.dependency();
        let applicable = game
            .install_info()
            .await
            .is_some_and(|install| dependency.is_required_by(&install));

        Ok(DependencyStatus {
            app_name: app_name.to_string(),
            dependency: dependency.id.clone(),
            applicable,
            installed: self.installer.probe(game.as_ref()).await,
        })
    }
}
