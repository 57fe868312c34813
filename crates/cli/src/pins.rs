//! Bookmarked ("pinned") competitions, persisted as a JSON file.

use std::path::{Path, PathBuf};

use groupboard_core::competition::CompetitionSummary;

const PINS_FILE: &str = "pinned_competitions.json";

#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not a valid pin file: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Pinned competitions stored under the user data directory.
pub struct PinStore {
    path: PathBuf,
}

impl PinStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PINS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pinned competitions in the order they were pinned. A missing file
    /// means nothing is pinned.
    pub fn list(&self) -> Result<Vec<CompetitionSummary>, PinError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PinError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| PinError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Pin a competition. Returns `false` when it was already pinned.
    pub fn pin(&self, competition: CompetitionSummary) -> Result<bool, PinError> {
        let mut pins = self.list()?;
        if pins.iter().any(|pinned| pinned.id == competition.id) {
            return Ok(false);
        }
        pins.push(competition);
        self.save(&pins)?;
        Ok(true)
    }

    /// Unpin a competition. Returns `false` when it was not pinned.
    pub fn unpin(&self, competition_id: &str) -> Result<bool, PinError> {
        let mut pins = self.list()?;
        let before = pins.len();
        pins.retain(|pinned| pinned.id != competition_id);
        if pins.len() == before {
            return Ok(false);
        }
        self.save(&pins)?;
        Ok(true)
    }

    pub fn is_pinned(&self, competition_id: &str) -> Result<bool, PinError> {
        Ok(self.list()?.iter().any(|pinned| pinned.id == competition_id))
    }

    /// Write via a sibling temp file and rename so a crash never leaves a
    /// half-written pin file.
    fn save(&self, pins: &[CompetitionSummary]) -> Result<(), PinError> {
        let io_err = |source| PinError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_vec_pretty(pins).map_err(|source| PinError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;

        tracing::debug!(
            path = %self.path.display(),
            count = pins.len(),
            "Saved pinned competitions"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary(id: &str) -> CompetitionSummary {
        CompetitionSummary {
            id: id.to_string(),
            name: format!("{id} Open"),
            short_name: None,
            city: "Oslo".to_string(),
            country_iso2: "NO".to_string(),
            start_date: NaiveDate::from_ymd_opt(2030, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2030, 3, 3).unwrap(),
        }
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PinStore::new(dir.path());
        assert!(store.list().unwrap().is_empty());
        assert!(!store.unpin("A").unwrap());
    }

    #[test]
    fn pin_persists_and_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let store = PinStore::new(&dir.path().join("nested"));

        assert!(store.pin(summary("A")).unwrap());
        assert!(store.pin(summary("B")).unwrap());
        assert!(!store.pin(summary("A")).unwrap());

        let reopened = PinStore::new(&dir.path().join("nested"));
        let ids: Vec<_> = reopened.list().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["A", "B"]);
        assert!(reopened.is_pinned("B").unwrap());
    }

    #[test]
    fn unpin_removes_only_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let store = PinStore::new(dir.path());
        store.pin(summary("A")).unwrap();
        store.pin(summary("B")).unwrap();

        assert!(store.unpin("A").unwrap());
        let ids: Vec<_> = store.list().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["B"]);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = PinStore::new(dir.path());
        std::fs::write(store.path(), "[{").unwrap();
        assert!(matches!(store.list(), Err(PinError::Corrupt { .. })));
    }
}
