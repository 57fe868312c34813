//! The seam between the store/paginator and the network.

use async_trait::async_trait;
use chrono::NaiveDate;

use groupboard_core::competition::CompetitionSummary;
use groupboard_core::types::CompetitionId;
use groupboard_core::Competition;

use crate::error::WcaApiError;

/// Anything able to provide competition data.
///
/// [`WcaApi`](crate::api::WcaApi) is the production implementation; tests
/// substitute in-memory fakes.
#[async_trait]
pub trait CompetitionSource: Send + Sync {
    /// Fetch the public WCIF of one competition.
    async fn public_wcif(&self, competition_id: &str) -> Result<Competition, WcaApiError>;

    /// Fetch the listing entry of one competition.
    async fn competition_summary(
        &self,
        competition_id: &str,
    ) -> Result<CompetitionSummary, WcaApiError>;

    /// Fetch one page (1-based) of competitions starting on or after `start`.
    async fn upcoming_page(
        &self,
        start: NaiveDate,
        page: u32,
    ) -> Result<Vec<CompetitionSummary>, WcaApiError>;

    /// Ids of competitions currently publishing live results.
    async fn live_competition_ids(&self) -> Result<Vec<CompetitionId>, WcaApiError>;
}
