//! Roster projection: who is assigned to a group, in which room, and in
//! what order they are listed.
//!
//! Everything here is a pure function over a borrowed [`Competition`]
//! snapshot. Missing data never errors; it produces empty output.
//!
//! [`Competition`]: crate::wcif::Competition

use std::cmp::Ordering;

use crate::assignment::{AssignmentCode, GROUP_ASSIGNMENT_CODE_RANK};
use crate::types::ActivityId;
use crate::wcif::{Activity, Assignment, Person, Room};

/// One person's assignment to the target group, joined to its activity and room.
#[derive(Debug, Clone, Copy)]
pub struct RosterEntry<'a> {
    pub person: &'a Person,
    pub assignment: &'a Assignment,
    pub activity: &'a Activity,
    /// `None` only when no room owns `activity`, which a well-formed
    /// snapshot never produces.
    pub room: Option<&'a Room>,
}

impl RosterEntry<'_> {
    pub fn room_name(&self) -> &str {
        self.room.map(|room| room.name.as_str()).unwrap_or("")
    }
}

/// Persons sharing one assignment code, in display order.
#[derive(Debug, Clone)]
pub struct AssignmentGroup<'a> {
    pub code: AssignmentCode,
    pub entries: Vec<RosterEntry<'a>>,
}

impl AssignmentGroup<'_> {
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Persons of one assignment group seated in one room.
#[derive(Debug, Clone)]
pub struct RoomColumn<'a> {
    pub room: &'a Room,
    pub entries: Vec<RosterEntry<'a>>,
}

/// An assignment group split into one column per room.
#[derive(Debug, Clone)]
pub struct GridGroup<'a> {
    pub code: AssignmentCode,
    pub count: usize,
    pub columns: Vec<RoomColumn<'a>>,
}

/// Every child activity, across all round activities, carrying `activity_code`.
///
/// An empty result is a normal outcome: the group may not be scheduled yet.
pub fn resolve_child_activities<'a>(
    round_activities: &[&'a Activity],
    activity_code: &str,
) -> Vec<&'a Activity> {
    round_activities
        .iter()
        .flat_map(|activity| activity.child_activities.iter())
        .filter(|child| child.activity_code == activity_code)
        .collect()
}

/// Join each person to the first of their assignments that targets one of
/// `child_activities`, then to the first room owning that activity.
///
/// Persons without such an assignment are left out. Output keeps the order
/// of `persons`.
pub fn project_persons<'a>(
    child_activities: &[&'a Activity],
    persons: &'a [Person],
    rooms: &[&'a Room],
) -> Vec<RosterEntry<'a>> {
    if child_activities.is_empty() {
        return Vec::new();
    }

    let find_activity = |id: ActivityId| child_activities.iter().copied().find(|ca| ca.id == id);

    persons
        .iter()
        .filter_map(|person| {
            let mut matching = person
                .assignments
                .iter()
                .filter_map(|assignment| {
                    find_activity(assignment.activity_id).map(|activity| (assignment, activity))
                });

            let (assignment, activity) = matching.next()?;

            if matching.next().is_some() {
                tracing::debug!(
                    registrant_id = ?person.registrant_id,
                    activity_code = %activity.activity_code,
                    "Person holds several assignments for one group, using the first",
                );
            }

            let room = rooms
                .iter()
                .copied()
                .find(|room| room.contains_child_activity(activity.id));

            Some(RosterEntry {
                person,
                assignment,
                activity,
                room,
            })
        })
        .collect()
}

/// Partition `projected` by assignment code in [`GROUP_ASSIGNMENT_CODE_RANK`]
/// order. Only codes present in the input produce a group; unranked codes
/// are dropped. Entries keep their input order.
pub fn group_by_assignment_code<'a>(projected: &[RosterEntry<'a>]) -> Vec<AssignmentGroup<'a>> {
    GROUP_ASSIGNMENT_CODE_RANK
        .iter()
        .filter_map(|code| {
            let entries: Vec<_> = projected
                .iter()
                .filter(|entry| &entry.assignment.assignment_code == code)
                .copied()
                .collect();

            (!entries.is_empty()).then(|| AssignmentGroup {
                code: code.clone(),
                entries,
            })
        })
        .collect()
}

/// Groups for the compact list: each sorted by room name, then person name.
pub fn list_groups<'a>(projected: &[RosterEntry<'a>]) -> Vec<AssignmentGroup<'a>> {
    let mut groups = group_by_assignment_code(projected);
    for group in &mut groups {
        group.entries.sort_by(|a, b| {
            compare_names(a.room_name(), b.room_name())
                .then_with(|| compare_names(&a.person.name, &b.person.name))
        });
    }
    groups
}

/// Groups for the per-room grid: one column per room in `rooms` order, each
/// sorted by person name. Rooms without anyone still get an empty column.
pub fn grid_groups<'a>(projected: &[RosterEntry<'a>], rooms: &[&'a Room]) -> Vec<GridGroup<'a>> {
    group_by_assignment_code(projected)
        .into_iter()
        .map(|group| {
            let columns = rooms
                .iter()
                .copied()
                .map(|room| {
                    let mut entries: Vec<_> = group
                        .entries
                        .iter()
                        .filter(|entry| entry.room.is_some_and(|r| r.id == room.id))
                        .copied()
                        .collect();
                    entries.sort_by(|a, b| compare_names(&a.person.name, &b.person.name));
                    RoomColumn { room, entries }
                })
                .collect();

            GridGroup {
                count: group.count(),
                code: group.code,
                columns,
            }
        })
        .collect()
}

/// Case-insensitive name order, falling back to the exact string so the
/// order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wcif::Competition;

    fn wcif() -> Competition {
        Competition::from_json(
            r##"{
            "id": "Test2024",
            "name": "Test 2024",
            "schedule": { "venues": [ { "id": 1, "name": "V", "timezone": "UTC", "rooms": [
                { "id": 1, "name": "Blue", "color": "#0000ff", "activities": [
                    { "id": 10, "name": "R1", "activityCode": "333-r1",
                      "startTime": "2024-01-06T09:00:00Z", "endTime": "2024-01-06T10:00:00Z",
                      "childActivities": [
                        { "id": 11, "name": "G1", "activityCode": "333-r1-g1",
                          "startTime": "2024-01-06T09:00:00Z", "endTime": "2024-01-06T09:30:00Z" },
                        { "id": 12, "name": "G2", "activityCode": "333-r1-g2",
                          "startTime": "2024-01-06T09:30:00Z", "endTime": "2024-01-06T10:00:00Z" }
                      ] }
                ] }
            ] } ] },
            "persons": [
                { "registrantId": 1, "name": "bob", "assignments": [
                    { "activityId": 12, "assignmentCode": "competitor" },
                    { "activityId": 11, "assignmentCode": "staff-judge" },
                    { "activityId": 11, "assignmentCode": "staff-runner" }
                ] },
                { "registrantId": 2, "name": "Alice", "assignments": [
                    { "activityId": 11, "assignmentCode": "staff-judge" }
                ] },
                { "registrantId": 3, "name": "Carol", "assignments": [
                    { "activityId": 11, "assignmentCode": "staff-photographer" }
                ] }
            ]
        }"##,
        )
        .expect("fixture should parse")
    }

    #[test]
    fn resolves_only_matching_children() {
        let wcif = wcif();
        let children = resolve_child_activities(&wcif.round_activities(), "333-r1-g1");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, 11);
        assert!(resolve_child_activities(&wcif.round_activities(), "333-r1-g9").is_empty());
    }

    #[test]
    fn first_matching_assignment_wins() {
        let wcif = wcif();
        let children = resolve_child_activities(&wcif.round_activities(), "333-r1-g1");
        let projected = project_persons(&children, &wcif.persons, &wcif.rooms());

        let bob = projected
            .iter()
            .find(|entry| entry.person.name == "bob")
            .expect("bob is in group 1");
        assert_eq!(bob.assignment.assignment_code, AssignmentCode::Judge);
        assert_eq!(bob.room.map(|r| r.id), Some(1));
    }

    #[test]
    fn unranked_codes_are_not_grouped() {
        let wcif = wcif();
        let children = resolve_child_activities(&wcif.round_activities(), "333-r1-g1");
        let projected = project_persons(&children, &wcif.persons, &wcif.rooms());
        assert_eq!(projected.len(), 3);

        let groups = group_by_assignment_code(&projected);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].code, AssignmentCode::Judge);
        assert_eq!(groups[0].count(), 2);
    }

    #[test]
    fn list_sort_is_case_insensitive() {
        let wcif = wcif();
        let children = resolve_child_activities(&wcif.round_activities(), "333-r1-g1");
        let projected = project_persons(&children, &wcif.persons, &wcif.rooms());
        let groups = list_groups(&projected);

        let names: Vec<_> = groups[0].entries.iter().map(|e| e.person.name.as_str()).collect();
        assert_eq!(names, ["Alice", "bob"]);
    }

    #[test]
    fn compare_names_is_total() {
        assert_eq!(compare_names("amy", "Amy"), Ordering::Greater);
        assert_eq!(compare_names("Amy", "amy"), Ordering::Less);
        assert_eq!(compare_names("Amy", "Amy"), Ordering::Equal);
        assert_eq!(compare_names("", "Amy"), Ordering::Less);
    }
}
