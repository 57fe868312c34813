//! Predicates over WCIF persons.

use crate::wcif::{Person, Room};

/// Whether `person` has any assignment to a group scheduled in `room`.
pub fn has_assignment_in_room(room: &Room, person: &Person) -> bool {
    person
        .assignments
        .iter()
        .any(|assignment| room.contains_child_activity(assignment.activity_id))
}

pub fn accepted_registration(person: &Person) -> bool {
    person
        .registration
        .as_ref()
        .is_some_and(|registration| registration.status == "accepted")
}

/// Returns a predicate matching persons registered for `event_id`.
pub fn is_registered_for_event(event_id: &str) -> impl Fn(&Person) -> bool + '_ {
    move |person| {
        person
            .registration
            .as_ref()
            .is_some_and(|registration| registration.event_ids.iter().any(|id| id == event_id))
    }
}

pub fn is_delegate(person: &Person) -> bool {
    has_role_containing(person, "delegate")
}

pub fn is_organizer(person: &Person) -> bool {
    has_role_containing(person, "organizer")
}

/// Delegates, organizers, and anyone holding a `staff-*` role.
pub fn is_staff(person: &Person) -> bool {
    is_delegate(person) || is_organizer(person) || has_role_containing(person, "staff-")
}

fn has_role_containing(person: &Person, needle: &str) -> bool {
    person.roles.iter().any(|role| role.contains(needle))
}
