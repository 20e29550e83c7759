use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::freshness::FreshnessPolicy;
use crate::core::downloader::Downloader;
use crate::core::error::{FetchError, SetupError};

/// What [`ensure_cached`] did to satisfy the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The cached file was fresh; no request was made.
    Reused,
    /// A new copy was downloaded.
    Downloaded { bytes: u64 },
}

/// Make sure `cache_path` holds a fresh copy of `source_url`.
///
/// Fresh files are reused without touching the network. Anything else
/// (missing, stale, unreadable metadata) triggers exactly one download.
pub async fn ensure_cached(
    downloader: &Downloader,
    policy: &FreshnessPolicy,
    cache_path: &Path,
    source_url: &str,
) -> Result<CacheOutcome, FetchError> {
    if policy.is_path_fresh(cache_path, Utc::now()).await {
        debug!("Cache hit for {:?}", cache_path);
        return Ok(CacheOutcome::Reused);
    }

    info!("Refreshing cached {:?} from {}", cache_path, source_url);
    match downloader.download_file(source_url, cache_path).await {
        Ok(bytes) => Ok(CacheOutcome::Downloaded { bytes }),
        Err(SetupError::Io { path, source }) => Err(FetchError::Write { path, source }),
        Err(source) => Err(FetchError::Download {
            url: source_url.to_string(),
            source: Box::new(source),
        }),
    }
}

/// On-disk artifact cache shared by every game that needs the same file.
///
/// Entries are addressed by key (the artifact file name). Fetches for the
/// same key are serialized so concurrent setups in one process download once;
/// the second caller re-checks freshness and reuses the first download.
/// Writers outside this store (another process) each stream into their own
/// temp file, so the entry always holds one complete download.
pub struct CacheStore {
    root: PathBuf,
    downloader: Downloader,
    policy: FreshnessPolicy,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CacheStore {
    pub fn new(root: PathBuf, downloader: Downloader, policy: FreshnessPolicy) -> Self {
        Self {
            root,
            downloader,
            policy,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn policy(&self) -> FreshnessPolicy {
        self.policy
    }

    /// Host path of the entry stored under `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Whether the entry under `key` exists and is still fresh.
    pub async fn is_fresh(&self, key: &str) -> bool {
        self.policy.is_path_fresh(&self.path_for(key), Utc::now()).await
    }

    /// Fetch `source_url` into the entry under `key` unless it is fresh.
    pub async fn ensure_cached(
        &self,
        key: &str,
        source_url: &str,
    ) -> Result<CacheOutcome, FetchError> {
        let lock = self.key_lock(key).await;
        let _guard = lock.lock().await;

        ensure_cached(&self.downloader, &self.policy, &self.path_for(key), source_url).await
    }

    async fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
