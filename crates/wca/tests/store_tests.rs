//! Integration tests for the WCIF snapshot store and the upcoming
//! competitions paginator, driven by an in-memory competition source.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::NaiveDate;

use groupboard_core::competition::CompetitionSummary;
use groupboard_core::types::CompetitionId;
use groupboard_core::Competition;
use groupboard_wca::{
    CompetitionSource, LoadStatus, SnapshotOrigin, StoreError, UpcomingCompetitions, WcaApiError,
    WcifStore,
};

// ---------------------------------------------------------------------------
// Fake source
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeSource {
    failing: AtomicBool,
    wcif_calls: AtomicUsize,
    /// Pages served by `upcoming_page`, 1-based; missing pages are empty.
    pages: Vec<Vec<CompetitionSummary>>,
}

impl FakeSource {
    fn with_pages(pages: Vec<Vec<CompetitionSummary>>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn fail(&self) -> Result<(), WcaApiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(WcaApiError::Api {
                status: 503,
                body: "maintenance".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CompetitionSource for FakeSource {
    async fn public_wcif(&self, competition_id: &str) -> Result<Competition, WcaApiError> {
        self.wcif_calls.fetch_add(1, Ordering::SeqCst);
        self.fail()?;
        Ok(wcif(competition_id))
    }

    async fn competition_summary(
        &self,
        competition_id: &str,
    ) -> Result<CompetitionSummary, WcaApiError> {
        self.fail()?;
        Ok(summary(competition_id))
    }

    async fn upcoming_page(
        &self,
        _start: NaiveDate,
        page: u32,
    ) -> Result<Vec<CompetitionSummary>, WcaApiError> {
        self.fail()?;
        Ok(self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }

    async fn live_competition_ids(&self) -> Result<Vec<CompetitionId>, WcaApiError> {
        self.fail()?;
        Ok(Vec::new())
    }
}

fn wcif(id: &str) -> Competition {
    Competition::from_json(&format!(r#"{{ "id": "{id}", "name": "{id} name" }}"#))
        .expect("fixture should parse")
}

fn summary(id: &str) -> CompetitionSummary {
    CompetitionSummary {
        id: id.to_string(),
        name: id.to_string(),
        short_name: None,
        city: String::new(),
        country_iso2: String::new(),
        start_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
    }
}

// ---------------------------------------------------------------------------
// WcifStore
// ---------------------------------------------------------------------------

#[tokio::test]
async fn snapshot_is_empty_until_refreshed() {
    let source = Arc::new(FakeSource::default());
    let store = WcifStore::new(source.clone(), None);

    assert!(store.snapshot("A2030").is_none());

    let cached = store.refresh("A2030", true).await.expect("online refresh");
    assert_eq!(cached.origin, SnapshotOrigin::Network);
    assert_eq!(store.snapshot("A2030").map(|w| w.id.clone()).as_deref(), Some("A2030"));
    assert!(store.fetched_at("A2030").is_some());
}

#[tokio::test]
async fn offline_refresh_uses_memory_without_fetching() {
    let source = Arc::new(FakeSource::default());
    let store = WcifStore::new(source.clone(), None);

    store.refresh("A2030", true).await.unwrap();
    store.refresh("A2030", false).await.unwrap();
    assert_eq!(source.wcif_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_fetch_without_cache_is_unavailable() {
    let source = Arc::new(FakeSource::default());
    source.set_failing(true);
    let store = WcifStore::new(source, None);

    let err = store.refresh("A2030", true).await.unwrap_err();
    assert_matches!(
        err,
        StoreError::Unavailable { ref competition_id, .. } if competition_id == "A2030"
    );
}

#[tokio::test]
async fn disk_cache_survives_a_new_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = Arc::new(FakeSource::default());

    let first = WcifStore::new(source.clone(), Some(dir.path().to_path_buf()));
    let fetched = first.refresh("A2030", true).await.unwrap();

    source.set_failing(true);
    let second = WcifStore::new(source.clone(), Some(dir.path().to_path_buf()));
    let cached = second.refresh("A2030", true).await.expect("disk fallback");

    assert_eq!(cached.origin, SnapshotOrigin::Disk);
    assert_eq!(cached.wcif.name, "A2030 name");
    assert_eq!(cached.fetched_at, fetched.fetched_at);
    assert!(second.snapshot("A2030").is_some());
}

#[tokio::test]
async fn offline_without_any_copy_is_unavailable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = WcifStore::new(
        Arc::new(FakeSource::default()),
        Some(dir.path().to_path_buf()),
    );

    let err = store.refresh("Nope2030", false).await.unwrap_err();
    assert_matches!(err, StoreError::Unavailable { ref reason, .. } if reason == "offline");
}

#[tokio::test]
async fn corrupt_cache_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("wcif")).unwrap();
    std::fs::write(dir.path().join("wcif/Bad2030.json"), b"not json").unwrap();

    let store = WcifStore::new(
        Arc::new(FakeSource::default()),
        Some(dir.path().to_path_buf()),
    );
    let err = store.refresh("Bad2030", false).await.unwrap_err();
    assert_matches!(err, StoreError::Corrupt(_));
}

// ---------------------------------------------------------------------------
// UpcomingCompetitions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn paginator_stops_after_an_empty_page() {
    let source = Arc::new(FakeSource::with_pages(vec![
        vec![summary("A"), summary("B")],
        vec![summary("B"), summary("C")],
    ]));
    let mut upcoming =
        UpcomingCompetitions::new(source, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());

    assert_eq!(upcoming.status(), &LoadStatus::Pending);
    assert!(upcoming.has_next_page());

    assert_eq!(upcoming.fetch_next_page().await, 2);
    assert_eq!(upcoming.fetch_next_page().await, 2);
    assert!(upcoming.has_next_page());
    assert_eq!(upcoming.fetch_next_page().await, 0);
    assert!(!upcoming.has_next_page());
    assert_eq!(upcoming.fetch_next_page().await, 0);

    let ids: Vec<_> = upcoming.competitions().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, ["A", "B", "C"]);
    assert_eq!(upcoming.pages_loaded(), 2);
    assert_eq!(upcoming.status(), &LoadStatus::Success);
    assert!(upcoming.updated_at().is_some());
}

#[tokio::test]
async fn paginator_keeps_pages_after_an_error() {
    let source = Arc::new(FakeSource::with_pages(vec![vec![summary("A")], vec![summary("B")]]));
    let mut upcoming =
        UpcomingCompetitions::new(source.clone(), NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());

    upcoming.fetch_next_page().await;
    source.set_failing(true);
    assert_eq!(upcoming.fetch_next_page().await, 0);

    assert_matches!(upcoming.status(), LoadStatus::Error(msg) if msg.contains("503"));
    assert!(upcoming.has_next_page());
    assert_eq!(upcoming.competitions().len(), 1);

    source.set_failing(false);
    assert_eq!(upcoming.fetch_next_page().await, 1);
    assert_eq!(upcoming.competitions().len(), 2);
}

#[tokio::test]
async fn cached_listing_is_served_offline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let start = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let source = Arc::new(FakeSource::with_pages(vec![
        vec![summary("A"), summary("B")],
        vec![summary("C")],
    ]));

    let mut online = UpcomingCompetitions::new(source.clone(), start)
        .with_cache_dir(Some(dir.path().to_path_buf()));
    online.fetch_next_page().await;
    online.fetch_next_page().await;

    source.set_failing(true);
    let mut offline = UpcomingCompetitions::new(source.clone(), start)
        .with_cache_dir(Some(dir.path().to_path_buf()));
    assert!(offline.restore_cached().await.expect("cache readable"));

    let ids: Vec<_> = offline.competitions().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, ["A", "B", "C"]);
    assert_eq!(offline.status(), &LoadStatus::Success);
    assert_eq!(offline.updated_at(), online.updated_at());
}

#[tokio::test]
async fn cached_listing_drops_finished_competitions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = Arc::new(FakeSource::with_pages(vec![vec![summary("A")]]));

    let jan = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let jun = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();

    let mut online = UpcomingCompetitions::new(source.clone(), jan)
        .with_cache_dir(Some(dir.path().to_path_buf()));
    online.fetch_next_page().await;

    // `summary` ends on 2030-01-01.
    let mut later =
        UpcomingCompetitions::new(source, jun).with_cache_dir(Some(dir.path().to_path_buf()));
    assert!(later.restore_cached().await.unwrap());
    assert!(later.competitions().is_empty());
}

#[tokio::test]
async fn missing_listing_cache_restores_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let start = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();

    let mut with_dir = UpcomingCompetitions::new(Arc::new(FakeSource::default()), start)
        .with_cache_dir(Some(dir.path().to_path_buf()));
    assert!(!with_dir.restore_cached().await.unwrap());
    assert_eq!(with_dir.status(), &LoadStatus::Pending);

    let mut without_dir = UpcomingCompetitions::new(Arc::new(FakeSource::default()), start);
    assert!(!without_dir.restore_cached().await.unwrap());
}
