//! WCA API client library.
//!
//! Provides the HTTP wrapper around the WCA endpoints, the
//! [`CompetitionSource`](source::CompetitionSource) seam, a WCIF snapshot
//! store with an offline disk cache, and the upcoming-competitions
//! paginator.

pub mod api;
pub mod config;
pub mod error;
pub mod pages;
pub mod source;
pub mod store;

pub use api::WcaApi;
pub use config::ClientConfig;
pub use error::{ConfigError, StoreError, WcaApiError};
pub use pages::{LoadStatus, UpcomingCompetitions};
pub use source::CompetitionSource;
pub use store::{CachedSnapshot, SnapshotOrigin, WcifStore};
