//! Moving between adjacent groups of a competition.
//!
//! Groups are ordered chronologically by the earliest start of any child
//! activity carrying the code; codes starting at the same instant are
//! ordered by their string.

use std::collections::HashMap;

use crate::activity_code::ActivityCode;
use crate::types::Timestamp;
use crate::wcif::Competition;

/// Every distinct group activity code in the schedule, in navigation order.
pub fn group_activity_codes(wcif: &Competition) -> Vec<String> {
    let mut earliest: HashMap<&str, Timestamp> = HashMap::new();

    for child in wcif
        .round_activities()
        .into_iter()
        .flat_map(|activity| activity.child_activities.iter())
    {
        let is_group = ActivityCode::parse(&child.activity_code)
            .map(|code| code.group().is_some())
            .unwrap_or(false);
        if !is_group {
            continue;
        }

        earliest
            .entry(child.activity_code.as_str())
            .and_modify(|start| *start = (*start).min(child.start_time))
            .or_insert(child.start_time);
    }

    let mut codes: Vec<_> = earliest.into_iter().collect();
    codes.sort_by(|(a_code, a_start), (b_code, b_start)| {
        a_start.cmp(b_start).then_with(|| a_code.cmp(b_code))
    });
    codes.into_iter().map(|(code, _)| code.to_string()).collect()
}

/// The group after `activity_code`, or `None` at the end or for unknown codes.
pub fn next_activity_code(wcif: &Competition, activity_code: &str) -> Option<String> {
    let codes = group_activity_codes(wcif);
    let idx = codes.iter().position(|code| code == activity_code)?;
    codes.get(idx + 1).cloned()
}

/// The group before `activity_code`, or `None` at the start or for unknown codes.
pub fn prev_activity_code(wcif: &Competition, activity_code: &str) -> Option<String> {
    let codes = group_activity_codes(wcif);
    let idx = codes.iter().position(|code| code == activity_code)?;
    idx.checked_sub(1).and_then(|prev| codes.get(prev)).cloned()
}

/// Route of a group page: `/competitions/<id>/events/<round>/<group>`.
/// Attempt groups keep their suffix in the last segment (`1-a2`).
///
/// `None` when `activity_code` does not name a group.
pub fn group_path(competition_id: &str, activity_code: &str) -> Option<String> {
    let (round_id, group) = ActivityCode::parse(activity_code).ok()?.route_parts()?;
    Some(format!("/competitions/{competition_id}/events/{round_id}/{group}"))
}
