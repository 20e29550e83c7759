pub mod winetricks;

use std::path::Path;

use async_trait::async_trait;

use crate::core::error::SetupResult;

pub use winetricks::Winetricks;

/// Installs font packages into a prefix.
#[async_trait]
pub trait FontProvisioner: Send + Sync {
    async fn provision(
        &self,
        compat_layer_version: &str,
        prefix: &Path,
        packages: &[String],
    ) -> SetupResult<()>;
}
