use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::model::{ExecOutput, GameSettings, InstallInfo, Runner};
use super::paths::translate_guest_path;
use super::GameRuntime;
use crate::core::error::{SetupError, SetupResult};
use crate::core::library::GameRecord;

/// Compatibility layer selected with this version uses the host's wine.
pub const SYSTEM_COMPAT_LAYER: &str = "system";

/// A resolved wine build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatLayer {
    pub version: String,
    pub wine: PathBuf,
    pub wineserver: PathBuf,
}

impl CompatLayer {
    /// Resolve `version` against `wine_dir`.
    ///
    /// Accepts `system` (wine from `PATH`), an absolute path to a wine
    /// binary, or the name of a build installed at `<wine_dir>/<version>/bin/wine`.
    pub async fn resolve(wine_dir: &Path, version: &str) -> SetupResult<Self> {
        if version == SYSTEM_COMPAT_LAYER {
            return Ok(Self {
                version: version.to_string(),
                wine: PathBuf::from("wine"),
                wineserver: PathBuf::from("wineserver"),
            });
        }

        let as_path = Path::new(version);
        let wine = if as_path.is_absolute() {
            as_path.to_path_buf()
        } else {
            wine_dir.join(version).join("bin").join("wine")
        };

        let is_file = tokio::fs::metadata(&wine)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(SetupError::CompatLayerNotFound(version.to_string()));
        }

        let wineserver = wine.with_file_name("wineserver");
        Ok(Self {
            version: version.to_string(),
            wine,
            wineserver,
        })
    }
}

/// A game from the library running through a wine-based layer.
pub struct WineGame {
    record: GameRecord,
    /// Record file re-read for current settings, when the game came from disk.
    source: Option<PathBuf>,
    wine_dir: PathBuf,
}

impl WineGame {
    pub fn new(record: GameRecord, source: Option<PathBuf>, wine_dir: PathBuf) -> Self {
        Self {
            record,
            source,
            wine_dir,
        }
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    async fn current_record(&self) -> SetupResult<GameRecord> {
        let Some(path) = &self.source else {
            return Ok(self.record.clone());
        };

        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SetupError::Io {
                path: path.clone(),
                source: e,
            })?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[async_trait]
impl GameRuntime for WineGame {
    fn app_name(&self) -> &str {
        &self.record.app_name
    }

    fn runner(&self) -> Runner {
        self.record.runner
    }

    async fn install_info(&self) -> Option<InstallInfo> {
        match self.current_record().await {
            Ok(record) => record.install,
            Err(e) => {
                warn!("Cannot reload record for {}: {}", self.record.app_name, e);
                self.record.install.clone()
            }
        }
    }

    async fn settings(&self) -> SetupResult<GameSettings> {
        Ok(self.current_record().await?.settings)
    }

    async fn run_in_prefix(&self, args: &[OsString]) -> SetupResult<ExecOutput> {
        let settings = self.settings().await?;
        let layer = CompatLayer::resolve(&self.wine_dir, &settings.compat_layer_version).await?;
        let program = layer.wine.to_string_lossy().to_string();

        debug!(
            "[{}] {} {:?} (WINEPREFIX={:?})",
            self.record.app_name, program, args, settings.prefix_path
        );

        let output = tokio::process::Command::new(&layer.wine)
            .args(args)
            .env("WINEPREFIX", &settings.prefix_path)
            .env("WINESERVER", &layer.wineserver)
            .env("WINEDEBUG", "-all")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| SetupError::Spawn {
                program: program.clone(),
                source: e,
            })?;

        let result = ExecOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            return Err(SetupError::Execution {
                program,
                code: result.code,
                stderr: result.stderr,
            });
        }

        Ok(result)
    }

    async fn translate_path(&self, guest: &str, settings: &GameSettings) -> SetupResult<PathBuf> {
        translate_guest_path(&settings.prefix_path, guest).await
    }
}
