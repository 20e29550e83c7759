use std::sync::Arc;

use crate::core::cache::{CacheStore, FreshnessPolicy};
use crate::core::config::SetupConfig;
use crate::core::dependency::{Dependency, DependencyInstaller};
use crate::core::downloader::Downloader;
use crate::core::error::SetupResult;
use crate::core::fonts::Winetricks;
use crate::core::http::build_http_client;
use crate::core::library::JsonLibrary;
use crate::core::notify::{AlertSurface, StatusSink};
use crate::core::setup::SetupCoordinator;

/// Everything the commands need, wired from one [`SetupConfig`].
pub struct AppState {
    pub cache: Arc<CacheStore>,
    pub library: Arc<JsonLibrary>,
    pub coordinator: Arc<SetupCoordinator>,
}

impl AppState {
    pub fn new(
        config: SetupConfig,
        status: Arc<dyn StatusSink>,
        alerts: Arc<dyn AlertSurface>,
    ) -> SetupResult<Self> {
        let http_client = build_http_client()?;

        let cache = Arc::new(CacheStore::new(
            config.cache_dir.clone(),
            Downloader::new(http_client),
            FreshnessPolicy::days(config.cache_max_age_days),
        ));
        let library = Arc::new(JsonLibrary::new(
            config.games_dir.clone(),
            config.wine_dir.clone(),
        ));

        let mut dependency = Dependency::ubisoft_connect();
        if let Some(url) = &config.installer_url {
            dependency = dependency.with_installer_url(url);
        }

        let installer = DependencyInstaller::new(dependency, cache.clone(), alerts, config.locale);
        let fonts = Arc::new(Winetricks::new(
            config.winetricks_path.clone(),
            config.wine_dir.clone(),
        ));
        let coordinator = Arc::new(SetupCoordinator::new(
            library.clone(),
            installer,
            fonts,
            status,
        ));

        Ok(Self {
            cache,
            library,
            coordinator,
        })
    }
}
