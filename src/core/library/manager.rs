use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::model::GameRecord;
use super::GameLibrary;
use crate::core::error::{SetupError, SetupResult};
use crate::core::runtime::{GameRuntime, WineGame};

/// Library backed by one JSON record per game under `games_dir`.
pub struct JsonLibrary {
    games_dir: PathBuf,
    wine_dir: PathBuf,
}

impl JsonLibrary {
    pub fn new(games_dir: PathBuf, wine_dir: PathBuf) -> Self {
        Self {
            games_dir,
            wine_dir,
        }
    }

    fn record_path(&self, app_name: &str) -> Option<PathBuf> {
        let valid = !app_name.is_empty()
            && !app_name.contains(['/', '\\'])
            && app_name != "."
            && app_name != "..";
        valid.then(|| self.games_dir.join(format!("{app_name}.json")))
    }

    /// Load a single record by app name.
    pub async fn load(&self, app_name: &str) -> SetupResult<GameRecord> {
        let path = self
            .record_path(app_name)
            .ok_or_else(|| SetupError::GameNotFound(app_name.to_string()))?;
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(SetupError::GameNotFound(app_name.to_string()));
        }
        read_record(&path).await
    }

    /// Save a record, creating the library directory if needed.
    pub async fn save(&self, record: &GameRecord) -> SetupResult<()> {
        let path = self
            .record_path(&record.app_name)
            .ok_or_else(|| SetupError::Other(format!("Invalid app name: {}", record.app_name)))?;

        tokio::fs::create_dir_all(&self.games_dir)
            .await
            .map_err(|e| SetupError::Io {
                path: self.games_dir.clone(),
                source: e,
            })?;

        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| SetupError::Io { path, source: e })
    }

    /// List every readable record. Corrupt files are skipped.
    pub async fn list(&self) -> SetupResult<Vec<GameRecord>> {
        let mut records = Vec::new();

        if !tokio::fs::try_exists(&self.games_dir).await.unwrap_or(false) {
            return Ok(records);
        }

        let mut entries = tokio::fs::read_dir(&self.games_dir)
            .await
            .map_err(|e| SetupError::Io {
                path: self.games_dir.clone(),
                source: e,
            })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| SetupError::Io {
            path: self.games_dir.clone(),
            source: e,
        })? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match read_record(&path).await {
                    Ok(record) => records.push(record),
                    Err(e) => warn!("Skipping game record {:?}: {}", path, e),
                }
            }
        }

        records.sort_by(|a, b| a.app_name.cmp(&b.app_name));
        Ok(records)
    }
}

#[async_trait]
impl GameLibrary for JsonLibrary {
    async fn get(&self, app_name: &str) -> Option<Arc<dyn GameRuntime>> {
        match self.load(app_name).await {
            Ok(record) => {
                let source = self.record_path(app_name);
                let game = WineGame::new(record, source, self.wine_dir.clone());
                Some(Arc::new(game) as Arc<dyn GameRuntime>)
            }
            Err(SetupError::GameNotFound(_)) => {
                debug!("No game record for {}", app_name);
                None
            }
            Err(e) => {
                warn!("Cannot load game {}: {}", app_name, e);
                None
            }
        }
    }
}

async fn read_record(path: &Path) -> SetupResult<GameRecord> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SetupError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(serde_json::from_str(&json)?)
}
