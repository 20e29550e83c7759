use serde::{Deserialize, Serialize};

use crate::core::runtime::{GameSettings, InstallInfo, Runner};

/// A game as persisted in the library (`games/<app_name>.json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    pub app_name: String,
    pub title: String,
    pub runner: Runner,
    /// Absent while the game is not installed.
    #[serde(default)]
    pub install: Option<InstallInfo>,
    pub settings: GameSettings,
}
