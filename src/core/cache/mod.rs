// ─── Installer Cache ───
// Keyed on-disk cache for downloaded installers, refreshed by age.

pub mod freshness;
pub mod store;

pub use freshness::FreshnessPolicy;
pub use store::{ensure_cached, CacheOutcome, CacheStore};
