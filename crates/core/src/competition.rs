//! Competition listing entries (upcoming, bookmarked, live).

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::CompetitionId;

/// One entry of the WCA `/competitions` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionSummary {
    pub id: CompetitionId,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country_iso2: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CompetitionSummary {
    /// `Jan 6, 2024` or `Jan 6 - Jan 7, 2024`.
    pub fn date_label(&self) -> String {
        if self.start_date == self.end_date {
            self.start_date.format("%b %-d, %Y").to_string()
        } else {
            format!(
                "{} - {}",
                self.start_date.format("%b %-d"),
                self.end_date.format("%b %-d, %Y")
            )
        }
    }

    pub fn location_label(&self) -> String {
        match (self.city.is_empty(), self.country_iso2.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.country_iso2),
            (false, true) => self.city.clone(),
            (true, false) => self.country_iso2.clone(),
            (true, true) => String::new(),
        }
    }
}

/// A listing entry annotated with whether live results are being published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedCompetition {
    pub summary: CompetitionSummary,
    pub live: bool,
}

/// Concatenate fetched pages, keeping the first occurrence of each id.
///
/// Pages are requested by start date, so a competition can shift across a
/// page boundary between two fetches and appear twice.
pub fn flatten_pages(pages: &[Vec<CompetitionSummary>]) -> Vec<CompetitionSummary> {
    let mut seen = HashSet::new();
    pages
        .iter()
        .flatten()
        .filter(|competition| seen.insert(competition.id.clone()))
        .cloned()
        .collect()
}

/// Mark the competitions whose id is in `live_ids`.
pub fn mark_live(
    competitions: Vec<CompetitionSummary>,
    live_ids: &[CompetitionId],
) -> Vec<ListedCompetition> {
    let live: HashSet<&str> = live_ids.iter().map(String::as_str).collect();
    competitions
        .into_iter()
        .map(|summary| ListedCompetition {
            live: live.contains(summary.id.as_str()),
            summary,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, start: &str, end: &str) -> CompetitionSummary {
        CompetitionSummary {
            id: id.to_string(),
            name: format!("{id} name"),
            short_name: None,
            city: "Seattle, Washington".to_string(),
            country_iso2: "US".to_string(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
        }
    }

    #[test]
    fn flatten_drops_boundary_duplicates() {
        let pages = vec![
            vec![
                summary("A", "2024-01-06", "2024-01-06"),
                summary("B", "2024-01-07", "2024-01-07"),
            ],
            vec![
                summary("B", "2024-01-07", "2024-01-07"),
                summary("C", "2024-01-08", "2024-01-08"),
            ],
        ];
        let ids: Vec<_> = flatten_pages(&pages).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["A", "B", "C"]);
    }

    #[test]
    fn live_marking() {
        let listed = mark_live(
            vec![
                summary("A", "2024-01-06", "2024-01-06"),
                summary("B", "2024-01-07", "2024-01-07"),
            ],
            &["B".to_string()],
        );
        assert!(!listed[0].live);
        assert!(listed[1].live);
    }

    #[test]
    fn date_labels() {
        assert_eq!(summary("A", "2024-01-06", "2024-01-06").date_label(), "Jan 6, 2024");
        assert_eq!(
            summary("A", "2024-01-06", "2024-01-07").date_label(),
            "Jan 6 - Jan 7, 2024"
        );
    }

    #[test]
    fn parses_wca_listing_json() {
        let json = r#"{
            "id": "SeattleSummerOpen2024",
            "name": "Seattle Summer Open 2024",
            "short_name": "Seattle Summer 2024",
            "city": "Seattle, Washington",
            "country_iso2": "US",
            "start_date": "2024-07-13",
            "end_date": "2024-07-14",
            "website": "https://example.org"
        }"#;
        let parsed: CompetitionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.location_label(), "Seattle, Washington, US");
        assert_eq!(parsed.short_name.as_deref(), Some("Seattle Summer 2024"));
    }
}
