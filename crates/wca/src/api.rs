//! REST API client for the WCA website endpoints.
//!
//! Wraps the public WCIF, competition listing and live-results endpoints
//! using [`reqwest`].

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use groupboard_core::competition::CompetitionSummary;
use groupboard_core::types::CompetitionId;
use groupboard_core::Competition;

use crate::config::ClientConfig;
use crate::error::WcaApiError;
use crate::source::CompetitionSource;

/// HTTP client for the WCA API.
pub struct WcaApi {
    client: reqwest::Client,
    api_url: String,
    live_competitions_url: Option<String>,
}

/// Response of the live-results endpoint.
#[derive(Debug, Deserialize)]
struct LiveCompetitionsResponse {
    #[serde(default)]
    competitions: Vec<LiveCompetition>,
}

#[derive(Debug, Deserialize)]
struct LiveCompetition {
    id: CompetitionId,
}

impl WcaApi {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, WcaApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("groupboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(
            client,
            config.api_url.clone(),
            config.live_competitions_url.clone(),
        ))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: String,
        live_competitions_url: Option<String>,
    ) -> Self {
        Self {
            client,
            api_url,
            live_competitions_url,
        }
    }

    /// Retrieve the public WCIF of a competition.
    ///
    /// Sends `GET /competitions/{id}/wcif/public`.
    pub async fn get_public_wcif(&self, competition_id: &str) -> Result<Competition, WcaApiError> {
        tracing::debug!(competition_id, "Fetching public WCIF");
        let response = self
            .client
            .get(format!(
                "{}/competitions/{}/wcif/public",
                self.api_url, competition_id
            ))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Retrieve the listing entry of a single competition.
    ///
    /// Sends `GET /competitions/{id}`.
    pub async fn get_competition(
        &self,
        competition_id: &str,
    ) -> Result<CompetitionSummary, WcaApiError> {
        let response = self
            .client
            .get(format!("{}/competitions/{}", self.api_url, competition_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Retrieve one page of competitions starting on or after `start`,
    /// sorted by start date.
    ///
    /// Sends `GET /competitions?start=..&sort=start_date&page=..`.
    pub async fn get_upcoming_page(
        &self,
        start: NaiveDate,
        page: u32,
    ) -> Result<Vec<CompetitionSummary>, WcaApiError> {
        tracing::debug!(%start, page, "Fetching upcoming competitions page");
        let response = self
            .client
            .get(format!("{}/competitions", self.api_url))
            .query(&[
                ("start", start.format("%Y-%m-%d").to_string()),
                ("sort", "start_date".to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Retrieve ids of competitions with live results.
    ///
    /// Returns an empty list when no live endpoint is configured.
    pub async fn get_live_competition_ids(&self) -> Result<Vec<CompetitionId>, WcaApiError> {
        let Some(url) = &self.live_competitions_url else {
            return Ok(Vec::new());
        };

        let response = self.client.get(url).send().await?;
        let body: LiveCompetitionsResponse = Self::parse_response(response).await?;
        Ok(body.competitions.into_iter().map(|c| c.id).collect())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`WcaApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, WcaApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(WcaApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WcaApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CompetitionSource for WcaApi {
    async fn public_wcif(&self, competition_id: &str) -> Result<Competition, WcaApiError> {
        self.get_public_wcif(competition_id).await
    }

    async fn competition_summary(
        &self,
        competition_id: &str,
    ) -> Result<CompetitionSummary, WcaApiError> {
        self.get_competition(competition_id).await
    }

    async fn upcoming_page(
        &self,
        start: NaiveDate,
        page: u32,
    ) -> Result<Vec<CompetitionSummary>, WcaApiError> {
        self.get_upcoming_page(start, page).await
    }

    async fn live_competition_ids(&self) -> Result<Vec<CompetitionId>, WcaApiError> {
        self.get_live_competition_ids().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_response_tolerates_missing_list() {
        let body: LiveCompetitionsResponse = serde_json::from_str("{}").unwrap();
        assert!(body.competitions.is_empty());

        let body: LiveCompetitionsResponse =
            serde_json::from_str(r#"{ "competitions": [ { "id": "A", "name": "x" } ] }"#).unwrap();
        assert_eq!(body.competitions[0].id, "A");
    }

    #[tokio::test]
    async fn live_ids_without_endpoint_are_empty() {
        let api = WcaApi::with_client(reqwest::Client::new(), "http://unused".into(), None);
        assert!(api.get_live_competition_ids().await.unwrap().is_empty());
    }
}
