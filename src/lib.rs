pub mod commands;
pub mod core;
#[cfg(test)]
mod test_support;

use tracing_subscriber::EnvFilter;

pub use crate::core::error::{SetupError, SetupResult};
pub use crate::core::state::AppState;

/// Initialize structured logging. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,launcher_deps=debug")),
        )
        .try_init();
}
