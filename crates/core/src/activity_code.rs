//! Activity code parsing and display names.
//!
//! Activity codes key WCIF activities: `333-r1` is a round, `333-r1-g3` is
//! group 3 of that round, `333fm-r1-a2` is an attempt, and `other-lunch`
//! is a non-event activity.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static EVENT_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9]+)(?:-r(\d+))?(?:-g(\d+))?(?:-a(\d+))?$").expect("valid regex")
});

const OTHER_PREFIX: &str = "other-";

/// A parsed activity code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActivityCode {
    /// An official event activity, optionally narrowed to round, group and attempt.
    Event {
        event_id: String,
        round: Option<u32>,
        group: Option<u32>,
        attempt: Option<u32>,
    },
    /// A non-event activity such as `other-lunch`; holds the part after `other-`.
    Other(String),
}

impl ActivityCode {
    /// Parse an activity code string.
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        if let Some(kind) = code.strip_prefix(OTHER_PREFIX) {
            if kind.is_empty() {
                return Err(CoreError::InvalidActivityCode(code.to_string()));
            }
            return Ok(Self::Other(kind.to_string()));
        }

        let caps = EVENT_CODE_RE
            .captures(code)
            .ok_or_else(|| CoreError::InvalidActivityCode(code.to_string()))?;

        let number = |idx: usize| -> Result<Option<u32>, CoreError> {
            caps.get(idx)
                .map(|m| {
                    m.as_str()
                        .parse::<u32>()
                        .map_err(|_| CoreError::InvalidActivityCode(code.to_string()))
                })
                .transpose()
        };

        Ok(Self::Event {
            event_id: caps[1].to_string(),
            round: number(2)?,
            group: number(3)?,
            attempt: number(4)?,
        })
    }

    /// Build the group code `<round_id>-g<group_number>` from route parts.
    ///
    /// `group_number` is the route's group segment: `3`, or `1-a2` for
    /// groups that carry an attempt.
    pub fn for_group(round_id: &str, group_number: &str) -> Result<Self, CoreError> {
        let round = Self::parse(round_id)?;
        if round.round_id().is_none() || round.group().is_some() {
            return Err(CoreError::InvalidActivityCode(round_id.to_string()));
        }

        match Self::parse(&format!("{round_id}-g{group_number}")) {
            Ok(code) if code.group().is_some() => Ok(code),
            _ => Err(CoreError::InvalidGroupNumber(group_number.to_string())),
        }
    }

    pub fn event_id(&self) -> Option<&str> {
        match self {
            Self::Event { event_id, .. } => Some(event_id),
            Self::Other(_) => None,
        }
    }

    pub fn group(&self) -> Option<u32> {
        match self {
            Self::Event { group, .. } => *group,
            Self::Other(_) => None,
        }
    }

    /// The round id (`333-r1`) this code belongs to, if it names a round.
    pub fn round_id(&self) -> Option<String> {
        match self {
            Self::Event {
                event_id,
                round: Some(round),
                ..
            } => Some(format!("{event_id}-r{round}")),
            _ => None,
        }
    }

    /// Split a group code into `(round_id, group_segment)` for routing.
    /// The segment keeps any attempt suffix (`1-a2`) so that
    /// [`for_group`](Self::for_group) rebuilds the same code.
    pub fn route_parts(&self) -> Option<(String, String)> {
        let round_id = self.round_id()?;
        let group = self.group()?;
        let segment = match self {
            Self::Event {
                attempt: Some(attempt),
                ..
            } => format!("{group}-a{attempt}"),
            _ => group.to_string(),
        };
        Some((round_id, segment))
    }

    /// Human-readable name, e.g. `3x3x3 Cube, Round 1, Group 3`.
    pub fn name(&self) -> String {
        match self {
            Self::Event {
                event_id,
                round,
                group,
                attempt,
            } => {
                let mut parts = vec![event_name(event_id).to_string()];
                if let Some(round) = round {
                    parts.push(format!("Round {round}"));
                }
                if let Some(group) = group {
                    parts.push(format!("Group {group}"));
                }
                if let Some(attempt) = attempt {
                    parts.push(format!("Attempt {attempt}"));
                }
                parts.join(", ")
            }
            Self::Other(kind) => kind
                .split('-')
                .filter(|word| !word.is_empty())
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl FromStr for ActivityCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ActivityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event {
                event_id,
                round,
                group,
                attempt,
            } => {
                write!(f, "{event_id}")?;
                if let Some(round) = round {
                    write!(f, "-r{round}")?;
                }
                if let Some(group) = group {
                    write!(f, "-g{group}")?;
                }
                if let Some(attempt) = attempt {
                    write!(f, "-a{attempt}")?;
                }
                Ok(())
            }
            Self::Other(kind) => write!(f, "{OTHER_PREFIX}{kind}"),
        }
    }
}

/// Official name of a WCA event id. Unknown ids are returned unchanged.
pub fn event_name(event_id: &str) -> &str {
    match event_id {
        "333" => "3x3x3 Cube",
        "222" => "2x2x2 Cube",
        "444" => "4x4x4 Cube",
        "555" => "5x5x5 Cube",
        "666" => "6x6x6 Cube",
        "777" => "7x7x7 Cube",
        "333bf" => "3x3x3 Blindfolded",
        "333fm" => "3x3x3 Fewest Moves",
        "333oh" => "3x3x3 One-Handed",
        "clock" => "Clock",
        "minx" => "Megaminx",
        "pyram" => "Pyraminx",
        "skewb" => "Skewb",
        "sq1" => "Square-1",
        "444bf" => "4x4x4 Blindfolded",
        "555bf" => "5x5x5 Blindfolded",
        "333mbf" => "3x3x3 Multi-Blind",
        other => other,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
