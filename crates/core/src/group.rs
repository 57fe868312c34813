//! View model of a single group page.
//!
//! Combines the roster projection with the header (name, times, round
//! rules) and links to the neighbouring groups. A snapshot that has not
//! been loaded yet is accepted and yields an empty page.

use crate::activity_code::ActivityCode;
use crate::navigation::{next_activity_code, prev_activity_code};
use crate::roster::{
    grid_groups, list_groups, project_persons, resolve_child_activities, AssignmentGroup,
    GridGroup, RosterEntry,
};
use crate::round_rules::describe_round;
use crate::types::Timestamp;
use crate::wcif::{Activity, Competition, Round, Room};

/// One header line per room scheduling the group.
#[derive(Debug, Clone)]
pub struct RoomSlot<'a> {
    pub room: &'a Room,
    pub start: Timestamp,
    pub end: Timestamp,
}

#[derive(Debug, Clone)]
pub struct GroupHeader<'a> {
    pub title: String,
    pub slots: Vec<RoomSlot<'a>>,
    pub rules: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GroupView<'a> {
    pub wcif: Option<&'a Competition>,
    pub activity_code: String,
    pub round: Option<&'a Round>,
    pub rooms: Vec<&'a Room>,
    pub multiroom: bool,
    pub child_activities: Vec<&'a Activity>,
    pub persons: Vec<RosterEntry<'a>>,
    pub header: GroupHeader<'a>,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl<'a> GroupView<'a> {
    /// Build the page for `<round_id>-g<group_number>`.
    pub fn for_route(wcif: Option<&'a Competition>, round_id: &str, group_number: u32) -> Self {
        Self::build(wcif, &format!("{round_id}-g{group_number}"))
    }

    /// Build the page for an arbitrary activity code.
    pub fn build(wcif: Option<&'a Competition>, activity_code: &str) -> Self {
        let parsed = ActivityCode::parse(activity_code).ok();

        let rooms = wcif.map(Competition::rooms).unwrap_or_default();
        let round_activities = wcif.map(Competition::round_activities).unwrap_or_default();
        let child_activities = resolve_child_activities(&round_activities, activity_code);
        let persons = wcif
            .map(|wcif| project_persons(&child_activities, &wcif.persons, &rooms))
            .unwrap_or_default();

        let round = match (wcif, parsed.as_ref().and_then(ActivityCode::round_id)) {
            (Some(wcif), Some(round_id)) => wcif.find_round(&round_id),
            _ => None,
        };

        let title = parsed
            .as_ref()
            .map(ActivityCode::name)
            .unwrap_or_else(|| activity_code.to_string());

        let slots = time_span(&child_activities)
            .map(|(start, end)| {
                rooms
                    .iter()
                    .copied()
                    .filter(|room| room.schedules_code(activity_code))
                    .map(|room| RoomSlot { room, start, end })
                    .collect()
            })
            .unwrap_or_default();

        let header = GroupHeader {
            title,
            slots,
            rules: round.map(describe_round).unwrap_or_default(),
        };

        let (previous, next) = match wcif {
            Some(wcif) => (
                prev_activity_code(wcif, activity_code),
                next_activity_code(wcif, activity_code),
            ),
            None => (None, None),
        };

        Self {
            wcif,
            activity_code: activity_code.to_string(),
            round,
            multiroom: rooms.len() > 1,
            rooms,
            child_activities,
            persons,
            header,
            previous,
            next,
        }
    }

    /// Assignment groups for the compact list layout.
    pub fn list(&self) -> Vec<AssignmentGroup<'a>> {
        list_groups(&self.persons)
    }

    /// Assignment groups for the per-room grid layout.
    pub fn grid(&self) -> Vec<GridGroup<'a>> {
        grid_groups(&self.persons, &self.rooms)
    }

    pub fn competition_id(&self) -> Option<&'a str> {
        self.wcif.map(|wcif| wcif.id.as_str())
    }
}

/// Earliest start and latest end across `activities`.
fn time_span(activities: &[&Activity]) -> Option<(Timestamp, Timestamp)> {
    let start = activities.iter().map(|a| a.start_time).min()?;
    let end = activities.iter().map(|a| a.end_time).max()?;
    Some((start, end))
}
