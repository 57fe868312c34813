//! Incrementally loaded list of upcoming competitions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use groupboard_core::competition::{flatten_pages, CompetitionSummary};
use groupboard_core::types::Timestamp;

use crate::error::StoreError;
use crate::source::CompetitionSource;

const LISTING_FILE: &str = "upcoming_competitions.json";

/// Load state of the list as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing has loaded successfully yet.
    Pending,
    Success,
    /// The last fetch failed; pages loaded before are kept.
    Error(String),
}

/// What is kept on disk between runs: the flattened listing and when it
/// was fetched.
#[derive(Debug, Serialize, Deserialize)]
struct ListingCacheFile {
    updated_at: Timestamp,
    competitions: Vec<CompetitionSummary>,
}

/// Pages of competitions starting on or after a fixed date, fetched one
/// at a time.
pub struct UpcomingCompetitions {
    source: Arc<dyn CompetitionSource>,
    start: NaiveDate,
    cache_dir: Option<PathBuf>,
    pages: Vec<Vec<CompetitionSummary>>,
    exhausted: bool,
    status: LoadStatus,
    updated_at: Option<Timestamp>,
}

impl UpcomingCompetitions {
    pub fn new(source: Arc<dyn CompetitionSource>, start: NaiveDate) -> Self {
        Self {
            source,
            start,
            cache_dir: None,
            pages: Vec::new(),
            exhausted: false,
            status: LoadStatus::Pending,
            updated_at: None,
        }
    }

    /// Start from today's date (UTC).
    pub fn starting_today(source: Arc<dyn CompetitionSource>) -> Self {
        Self::new(source, Utc::now().date_naive())
    }

    /// Persist the listing under `cache_dir` after every successful fetch
    /// so [`restore_cached`](Self::restore_cached) can serve it offline.
    pub fn with_cache_dir(mut self, cache_dir: Option<PathBuf>) -> Self {
        self.cache_dir = cache_dir;
        self
    }

    /// True until a fetched page comes back empty.
    pub fn has_next_page(&self) -> bool {
        !self.exhausted
    }

    /// Fetch the next page. Returns the number of competitions it held;
    /// `0` once the list is exhausted. Failures are recorded in
    /// [`status`](Self::status) and leave loaded pages untouched.
    pub async fn fetch_next_page(&mut self) -> usize {
        if self.exhausted {
            return 0;
        }

        let page = self.pages.len() as u32 + 1;
        match self.source.upcoming_page(self.start, page).await {
            Ok(competitions) => {
                let count = competitions.len();
                tracing::debug!(page, count, "Loaded upcoming competitions page");
                if competitions.is_empty() {
                    self.exhausted = true;
                } else {
                    self.pages.push(competitions);
                }
                self.status = LoadStatus::Success;
                let updated_at = Utc::now();
                self.updated_at = Some(updated_at);
                self.persist(updated_at).await;
                count
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "Failed to load upcoming competitions");
                self.status = LoadStatus::Error(e.to_string());
                0
            }
        }
    }

    /// All loaded competitions, duplicates across pages removed.
    pub fn competitions(&self) -> Vec<CompetitionSummary> {
        flatten_pages(&self.pages)
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Time of the last successful fetch.
    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages.len()
    }

    /// Load the listing persisted by an earlier run in place of fetching.
    ///
    /// Competitions that ended before the start date are dropped. Returns
    /// `false` when there is no cache to restore.
    pub async fn restore_cached(&mut self) -> Result<bool, StoreError> {
        let Some(path) = self.cache_path() else {
            return Ok(false);
        };

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        let file: ListingCacheFile = serde_json::from_slice(&bytes)?;

        let start = self.start;
        let competitions: Vec<_> = file
            .competitions
            .into_iter()
            .filter(|competition| competition.end_date >= start)
            .collect();
        tracing::info!(
            count = competitions.len(),
            updated_at = %file.updated_at,
            "Serving upcoming competitions from disk cache",
        );

        self.pages = if competitions.is_empty() {
            Vec::new()
        } else {
            vec![competitions]
        };
        self.status = LoadStatus::Success;
        self.updated_at = Some(file.updated_at);
        Ok(true)
    }

    fn cache_path(&self) -> Option<PathBuf> {
        self.cache_dir.as_deref().map(listing_file_path)
    }

    /// Write the listing to disk. Failures are logged, not returned.
    async fn persist(&self, updated_at: Timestamp) {
        let Some(path) = self.cache_path() else {
            return;
        };

        let file = ListingCacheFile {
            updated_at,
            competitions: self.competitions(),
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
            tracing::warn!(path = %path.display(), error = %e, "Failed to write listing cache");
        }
    }
}

fn listing_file_path(dir: &Path) -> PathBuf {
    dir.join(LISTING_FILE)
}
