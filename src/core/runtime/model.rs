use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Store backend that owns a game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Runner {
    Legendary,
    Gog,
    Nile,
    Sideload,
}

impl std::fmt::Display for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Runner::Legendary => write!(f, "legendary"),
            Runner::Gog => write!(f, "gog"),
            Runner::Nile => write!(f, "nile"),
            Runner::Sideload => write!(f, "sideload"),
        }
    }
}

/// Install metadata of an installed game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallInfo {
    /// Main executable, relative to the install directory.
    pub executable: String,
    #[serde(default)]
    pub is_dlc: bool,
    #[serde(default)]
    pub install_path: Option<PathBuf>,
}

impl InstallInfo {
    /// File name of the main executable, whatever separator the store used.
    pub fn executable_name(&self) -> &str {
        self.executable
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.executable)
    }
}

/// Per-game compatibility settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    /// Compatibility layer version: a directory name under the wine tools
    /// directory, an absolute path to a wine binary, or `system`.
    pub compat_layer_version: String,
    pub prefix_path: PathBuf,
}

/// Captured result of a process run inside a prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}
