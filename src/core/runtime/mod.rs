// ─── Game Runtime ───
// What the setup core needs from a game: install metadata, compatibility
// settings, command execution inside the prefix and guest path translation.

pub mod model;
pub mod paths;
pub mod wine;

use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::error::SetupResult;

pub use model::{ExecOutput, GameSettings, InstallInfo, Runner};
pub use paths::translate_guest_path;
pub use wine::{CompatLayer, WineGame};

/// A game whose Windows binaries run inside a compatibility prefix.
#[async_trait]
pub trait GameRuntime: Send + Sync {
    fn app_name(&self) -> &str;

    fn runner(&self) -> Runner;

    /// Install metadata, `None` when the game is not installed.
    async fn install_info(&self) -> Option<InstallInfo>;

    /// Current compatibility settings. Read fresh on every call.
    async fn settings(&self) -> SetupResult<GameSettings>;

    /// Run `args` (program first) inside the game's prefix.
    /// A non-zero exit status is an error.
    async fn run_in_prefix(&self, args: &[OsString]) -> SetupResult<ExecOutput>;

    /// Map a Windows guest path to the host path it lives at under `settings`.
    async fn translate_path(&self, guest: &str, settings: &GameSettings) -> SetupResult<PathBuf>;
}
