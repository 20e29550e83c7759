use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, info};

use super::FontProvisioner;
use crate::core::error::{SetupError, SetupResult};
use crate::core::runtime::CompatLayer;

/// Runs `winetricks -q <packages>` against a prefix.
pub struct Winetricks {
    binary: PathBuf,
    wine_dir: PathBuf,
}

impl Winetricks {
    pub fn new(binary: PathBuf, wine_dir: PathBuf) -> Self {
        Self { binary, wine_dir }
    }
}

#[async_trait]
impl FontProvisioner for Winetricks {
    async fn provision(
        &self,
        compat_layer_version: &str,
        prefix: &Path,
        packages: &[String],
    ) -> SetupResult<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let layer = CompatLayer::resolve(&self.wine_dir, compat_layer_version).await?;
        let program = self.binary.to_string_lossy().to_string();

        info!("Running winetricks {} in {:?}", packages.join(" "), prefix);

        let output = tokio::process::Command::new(&self.binary)
            .arg("-q")
            .args(packages)
            .env("WINE", &layer.wine)
            .env("WINESERVER", &layer.wineserver)
            .env("WINEPREFIX", prefix)
            .env("WINEDEBUG", "-all")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| SetupError::Spawn {
                program: program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(SetupError::Execution {
                program,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        debug!("winetricks finished for {:?}", prefix);
        Ok(())
    }
}
