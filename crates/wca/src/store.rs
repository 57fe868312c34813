//! Cached WCIF snapshots keyed by competition id.
//!
//! Reads are synchronous so a view can render whatever is cached while a
//! refresh is in flight. Refreshes go to the network when online and fall
//! back to the last good copy (memory first, then disk) when the fetch
//! fails or the caller is offline.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use groupboard_core::types::{CompetitionId, Timestamp};
use groupboard_core::Competition;

use crate::error::StoreError;
use crate::source::CompetitionSource;

/// Where a cached snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    Network,
    Disk,
}

#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub wcif: Arc<Competition>,
    pub fetched_at: Timestamp,
    pub origin: SnapshotOrigin,
}

/// On-disk layout of one cached snapshot.
#[derive(Serialize, Deserialize)]
struct CacheFile {
    fetched_at: Timestamp,
    wcif: Competition,
}

pub struct WcifStore {
    source: Arc<dyn CompetitionSource>,
    cache_dir: Option<PathBuf>,
    entries: RwLock<HashMap<CompetitionId, CachedSnapshot>>,
}

impl WcifStore {
    pub fn new(source: Arc<dyn CompetitionSource>, cache_dir: Option<PathBuf>) -> Self {
        Self {
            source,
            cache_dir,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The cached snapshot, if any. Never blocks on the network.
    pub fn snapshot(&self, competition_id: &str) -> Option<Arc<Competition>> {
        self.entry(competition_id).map(|cached| cached.wcif)
    }

    /// When the cached snapshot was fetched from the network.
    pub fn fetched_at(&self, competition_id: &str) -> Option<Timestamp> {
        self.entry(competition_id).map(|cached| cached.fetched_at)
    }

    pub fn entry(&self, competition_id: &str) -> Option<CachedSnapshot> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(competition_id)
            .cloned()
    }

    /// Refresh one competition.
    ///
    /// When `online`, fetches from the source and persists the result.
    /// Otherwise, or if the fetch fails, returns the in-memory copy or the
    /// disk copy. Errors only when no copy exists anywhere.
    pub async fn refresh(
        &self,
        competition_id: &str,
        online: bool,
    ) -> Result<CachedSnapshot, StoreError> {
        let reason = if online {
            match self.source.public_wcif(competition_id).await {
                Ok(wcif) => {
                    let cached = CachedSnapshot {
                        wcif: Arc::new(wcif),
                        fetched_at: Utc::now(),
                        origin: SnapshotOrigin::Network,
                    };
                    tracing::info!(competition_id, "Fetched WCIF snapshot");
                    self.persist(competition_id, &cached).await;
                    self.insert(competition_id, cached.clone());
                    return Ok(cached);
                }
                Err(e) => {
                    tracing::warn!(competition_id, error = %e, "WCIF fetch failed, trying cache");
                    e.to_string()
                }
            }
        } else {
            "offline".to_string()
        };

        if let Some(cached) = self.entry(competition_id) {
            tracing::debug!(competition_id, "Serving WCIF from memory");
            return Ok(cached);
        }

        match self.load_from_disk(competition_id).await? {
            Some(cached) => {
                tracing::info!(
                    competition_id,
                    fetched_at = %cached.fetched_at,
                    "Serving WCIF from disk cache",
                );
                self.insert(competition_id, cached.clone());
                Ok(cached)
            }
            None => Err(StoreError::Unavailable {
                competition_id: competition_id.to_string(),
                reason,
            }),
        }
    }

    // ---- private helpers ----

    fn insert(&self, competition_id: &str, cached: CachedSnapshot) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(competition_id.to_string(), cached);
    }

    /// Write a snapshot to disk. Failures are logged, not returned: a
    /// missing cache only matters later, when offline.
    async fn persist(&self, competition_id: &str, cached: &CachedSnapshot) {
        let Some(path) = self.cache_path(competition_id) else {
            return;
        };

        let file = CacheFile {
            fetched_at: cached.fetched_at,
            wcif: (*cached.wcif).clone(),
        };

        let result = async {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let json = serde_json::to_vec(&file)?;
            tokio::fs::write(&path, json).await?;
            Ok::<_, StoreError>(())
        }
        .await;

        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "Failed to write WCIF cache");
        }
    }

    async fn load_from_disk(
        &self,
        competition_id: &str,
    ) -> Result<Option<CachedSnapshot>, StoreError> {
        let Some(path) = self.cache_path(competition_id) else {
            return Ok(None);
        };

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file: CacheFile = serde_json::from_slice(&bytes)?;
        Ok(Some(CachedSnapshot {
            wcif: Arc::new(file.wcif),
            fetched_at: file.fetched_at,
            origin: SnapshotOrigin::Disk,
        }))
    }

    fn cache_path(&self, competition_id: &str) -> Option<PathBuf> {
        self.cache_dir
            .as_deref()
            .map(|dir| cache_file_path(dir, competition_id))
    }
}

/// `<dir>/wcif/<id>.json`, with anything but ASCII alphanumerics, `-` and
/// `_` in the id replaced so an id can never escape `dir`.
fn cache_file_path(dir: &Path, competition_id: &str) -> PathBuf {
    let safe: String = competition_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    dir.join("wcif").join(format!("{safe}.json"))
}
