//! Human-readable cutoff, time limit and advancement lines for a round.

use crate::activity_code::ActivityCode;
use crate::time::format_centiseconds;
use crate::wcif::{AdvancementCondition, Cutoff, Round, TimeLimit};

/// Lines describing the rules of `round`, in display order. Rounds without
/// any rules produce no lines.
pub fn describe_round(round: &Round) -> Vec<String> {
    let event_id = ActivityCode::parse(&round.id)
        .ok()
        .and_then(|code| code.event_id().map(str::to_string))
        .unwrap_or_default();

    let mut lines = Vec::new();
    if let Some(time_limit) = &round.time_limit {
        lines.push(describe_time_limit(time_limit));
    }
    if let Some(cutoff) = &round.cutoff {
        lines.push(describe_cutoff(&event_id, cutoff));
    }
    if let Some(condition) = &round.advancement_condition {
        lines.push(describe_advancement(&event_id, condition));
    }
    lines
}

pub fn describe_time_limit(time_limit: &TimeLimit) -> String {
    let base = format!("Time Limit: {}", format_centiseconds(time_limit.centiseconds));
    match time_limit.cumulative_round_ids.len() {
        0 => base,
        1 => format!("{base} (cumulative)"),
        n => format!("{base} (cumulative across {n} rounds)"),
    }
}

pub fn describe_cutoff(event_id: &str, cutoff: &Cutoff) -> String {
    let attempts = match cutoff.number_of_attempts {
        1 => "1 attempt".to_string(),
        n => format!("{n} attempts"),
    };
    format!(
        "Cutoff: {attempts} to get < {}",
        format_attempt_result(event_id, cutoff.attempt_result)
    )
}

pub fn describe_advancement(event_id: &str, condition: &AdvancementCondition) -> String {
    match condition {
        AdvancementCondition::Ranking { level } => format!("Top {level} advance to next round"),
        AdvancementCondition::Percent { level } => format!("Top {level}% advance to next round"),
        AdvancementCondition::AttemptResult { level } => format!(
            "Result < {} advances to next round",
            format_attempt_result(event_id, *level)
        ),
    }
}

/// Format a WCIF attempt result for `event_id`.
///
/// Fewest Moves results are move counts and Multi-Blind results use the
/// `0DDTTTTTMM` encoding where points are `99 - DD`; everything else is
/// centiseconds.
pub fn format_attempt_result(event_id: &str, value: i64) -> String {
    match event_id {
        "333fm" => format!("{value} moves"),
        "333mbf" => {
            let points = 99 - (value / 10_000_000) % 100;
            format!("{points} points")
        }
        _ => format_centiseconds(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(id: &str) -> Round {
        Round {
            id: id.to_string(),
            format: "a".to_string(),
            time_limit: None,
            cutoff: None,
            advancement_condition: None,
        }
    }

    #[test]
    fn bare_round_has_no_lines() {
        assert!(describe_round(&round("333-r3")).is_empty());
    }

    #[test]
    fn full_round_lists_limit_cutoff_and_advancement() {
        let r = Round {
            time_limit: Some(TimeLimit {
                centiseconds: 60000,
                cumulative_round_ids: vec![],
            }),
            cutoff: Some(Cutoff {
                number_of_attempts: 2,
                attempt_result: 6000,
            }),
            advancement_condition: Some(AdvancementCondition::Ranking { level: 12 }),
            ..round("444-r1")
        };
        assert_eq!(
            describe_round(&r),
            [
                "Time Limit: 10:00.00",
                "Cutoff: 2 attempts to get < 1:00.00",
                "Top 12 advance to next round",
            ]
        );
    }

    #[test]
    fn cumulative_time_limits() {
        let one = TimeLimit {
            centiseconds: 360000,
            cumulative_round_ids: vec!["333bf-r1".into()],
        };
        assert_eq!(describe_time_limit(&one), "Time Limit: 1:00:00.00 (cumulative)");

        let many = TimeLimit {
            centiseconds: 360000,
            cumulative_round_ids: vec!["444bf-r1".into(), "555bf-r1".into()],
        };
        assert_eq!(
            describe_time_limit(&many),
            "Time Limit: 1:00:00.00 (cumulative across 2 rounds)"
        );
    }

    #[test]
    fn event_specific_results() {
        let cutoff = Cutoff {
            number_of_attempts: 1,
            attempt_result: 40,
        };
        assert_eq!(describe_cutoff("333fm", &cutoff), "Cutoff: 1 attempt to get < 40 moves");
        assert_eq!(format_attempt_result("333mbf", 970_360_001), "2 points");
        assert_eq!(
            describe_advancement("333", &AdvancementCondition::AttemptResult { level: 3000 }),
            "Result < 30.00 advances to next round"
        );
        assert_eq!(
            describe_advancement("333", &AdvancementCondition::Percent { level: 75 }),
            "Top 75% advance to next round"
        );
    }
}
