//! Typed WCIF snapshot.
//!
//! The WCA Competition Interchange Format is loosely shaped: most arrays
//! may be missing or `null` and several objects are optional. Everything is
//! normalised here, at deserialization time, so the rest of the crate works
//! with plain `Vec`s and explicit `Option`s.

use serde::{Deserialize, Deserializer, Serialize};

use crate::assignment::AssignmentCode;
use crate::error::CoreError;
use crate::types::{ActivityId, CompetitionId, RegistrantId, RoomId, Timestamp};

/// Treat a missing or `null` value as `T::default()`.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Competition
// ---------------------------------------------------------------------------

/// A full competition snapshot as returned by `/wcif/public`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub persons: Vec<Person>,
    #[serde(default, deserialize_with = "null_default")]
    pub events: Vec<Event>,
    #[serde(default, deserialize_with = "null_default")]
    pub schedule: Schedule,
}

impl Competition {
    /// Parse a WCIF document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every room of every venue, in schedule order.
    pub fn rooms(&self) -> Vec<&Room> {
        self.schedule
            .venues
            .iter()
            .flat_map(|venue| venue.rooms.iter())
            .collect()
    }

    /// Every top-level (round) activity of every room.
    pub fn round_activities(&self) -> Vec<&Activity> {
        self.rooms()
            .into_iter()
            .flat_map(|room| room.activities.iter())
            .collect()
    }

    /// Look up a round by id (`333-r1`) across all events.
    pub fn find_round(&self, round_id: &str) -> Option<&Round> {
        self.events
            .iter()
            .flat_map(|event| event.rounds.iter())
            .find(|round| round.id == round_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub number_of_days: Option<u32>,
    #[serde(default, deserialize_with = "null_default")]
    pub venues: Vec<Venue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: i64,
    pub name: String,
    /// IANA timezone name, e.g. `America/Los_Angeles`.
    #[serde(default, deserialize_with = "null_default")]
    pub timezone: String,
    #[serde(default, deserialize_with = "null_default")]
    pub rooms: Vec<Room>,
}

// ---------------------------------------------------------------------------
// Rooms and activities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// Display color as `#rrggbb`.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub activities: Vec<Activity>,
}

impl Room {
    /// Whether any top-level activity of this room owns a child activity
    /// with the given id.
    pub fn contains_child_activity(&self, activity_id: ActivityId) -> bool {
        self.activities
            .iter()
            .any(|activity| activity.child_activities.iter().any(|ca| ca.id == activity_id))
    }

    /// Whether this room schedules a child activity with the given code.
    pub fn schedules_code(&self, activity_code: &str) -> bool {
        self.activities.iter().any(|activity| {
            activity
                .child_activities
                .iter()
                .any(|ca| ca.activity_code == activity_code)
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub activity_code: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    #[serde(default, deserialize_with = "null_default")]
    pub child_activities: Vec<Activity>,
}

// ---------------------------------------------------------------------------
// Persons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// `None` for persons who never registered (e.g. staff-only entries).
    #[serde(default)]
    pub registrant_id: Option<RegistrantId>,
    pub name: String,
    #[serde(default)]
    pub wca_id: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub registration: Option<Registration>,
    #[serde(default, deserialize_with = "null_default")]
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub status: String,
    #[serde(default, deserialize_with = "null_default")]
    pub event_ids: Vec<String>,
    #[serde(default)]
    pub is_competing: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub activity_id: ActivityId,
    pub assignment_code: AssignmentCode,
    #[serde(default)]
    pub station_number: Option<u32>,
}

// ---------------------------------------------------------------------------
// Events and rounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub rounds: Vec<Round>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Round id, e.g. `333-r1`.
    pub id: String,
    /// Result format: `a`, `m`, `1`, `2`, `3`.
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub time_limit: Option<TimeLimit>,
    #[serde(default)]
    pub cutoff: Option<Cutoff>,
    #[serde(default)]
    pub advancement_condition: Option<AdvancementCondition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLimit {
    pub centiseconds: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub cumulative_round_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cutoff {
    pub number_of_attempts: u32,
    pub attempt_result: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdvancementCondition {
    Ranking { level: i64 },
    Percent { level: i64 },
    AttemptResult { level: i64 },
}
