use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::cache::freshness::DEFAULT_MAX_AGE_DAYS;
use crate::core::error::{SetupError, SetupResult};
use crate::core::i18n::Locale;

const APP_DIR_NAME: &str = "launcher-deps";
const SETTINGS_FILE: &str = "setup_settings.json";

/// Settings of the dependency setup, persisted as `setup_settings.json`
/// inside the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SetupConfig {
    /// Where downloaded installers are cached.
    pub cache_dir: PathBuf,
    /// One `<app_name>.json` record per game.
    pub games_dir: PathBuf,
    /// Installed wine builds, one directory per version.
    pub wine_dir: PathBuf,
    pub winetricks_path: PathBuf,
    pub locale: Locale,
    pub cache_max_age_days: i64,
    /// Overrides the dependency's installer URL (mirrors, testing).
    pub installer_url: Option<String>,
}

impl SetupConfig {
    /// Defaults rooted at `data_dir`.
    pub fn defaults_for(data_dir: &Path) -> Self {
        Self {
            cache_dir: data_dir.join("cache"),
            games_dir: data_dir.join("games"),
            wine_dir: data_dir.join("tools").join("wine"),
            winetricks_path: PathBuf::from("winetricks"),
            locale: locale_from_env(),
            cache_max_age_days: DEFAULT_MAX_AGE_DAYS,
            installer_url: None,
        }
    }

    /// Load the settings stored in `data_dir`, falling back to defaults when
    /// the file is missing or unreadable.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Self::defaults_for(data_dir),
        };

        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring corrupt {:?}: {}", path, e);
                Self::defaults_for(data_dir)
            }
        }
    }

    pub fn save(&self, data_dir: &Path) -> SetupResult<()> {
        std::fs::create_dir_all(data_dir).map_err(|e| SetupError::Io {
            path: data_dir.to_path_buf(),
            source: e,
        })?;
        let path = data_dir.join(SETTINGS_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json).map_err(|e| SetupError::Io { path, source: e })
    }
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self::defaults_for(&default_data_dir())
    }
}

/// `<platform data dir>/launcher-deps`, or `./launcher-deps` when the
/// platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

fn locale_from_env() -> Locale {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults_under_data_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = SetupConfig::load(temp.path());
        assert_eq!(config.cache_dir, temp.path().join("cache"));
        assert_eq!(config.games_dir, temp.path().join("games"));
        assert_eq!(config.cache_max_age_days, 7);
        assert!(config.installer_url.is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut config = SetupConfig::defaults_for(temp.path());
        config.locale = Locale::De;
        config.cache_max_age_days = 3;
        config.save(temp.path()).unwrap();

        assert_eq!(SetupConfig::load(temp.path()), config);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::write(temp.path().join(SETTINGS_FILE), b"{ nope").unwrap();
        let config = SetupConfig::load(temp.path());
        assert_eq!(config.games_dir, temp.path().join("games"));
    }
}
