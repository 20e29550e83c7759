use std::path::Path;

use chrono::{DateTime, Duration, Utc};

/// Days a cached installer is reused before it is downloaded again.
/// Outdated installers have been reported to fail inside the prefix.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 7;

/// Age-based freshness rule for cached artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    max_age: Duration,
}

impl FreshnessPolicy {
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    /// Window of `days` days. Negative values are treated as zero; values
    /// past what a `Duration` can hold keep files fresh forever.
    pub fn days(days: i64) -> Self {
        Self::new(Duration::try_days(days.max(0)).unwrap_or(Duration::MAX))
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// `true` when `modified` lies strictly inside the window ending at `now`.
    /// A window reaching before the earliest representable date covers
    /// every `modified`.
    pub fn is_fresh(&self, modified: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match now.checked_sub_signed(self.max_age) {
            Some(cutoff) => modified > cutoff,
            None => true,
        }
    }

    /// Freshness of the file at `path`. A missing or unreadable file is never fresh.
    pub async fn is_path_fresh(&self, path: &Path, now: DateTime<Utc>) -> bool {
        match tokio::fs::metadata(path).await.and_then(|m| m.modified()) {
            Ok(modified) => self.is_fresh(DateTime::<Utc>::from(modified), now),
            Err(_) => false,
        }
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::days(DEFAULT_MAX_AGE_DAYS)
    }
}
