//! Assignment codes and their display rank.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The role a person holds at an activity.
///
/// Codes not known to the dashboard are kept verbatim in [`Other`](Self::Other)
/// so a snapshot round-trips without loss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssignmentCode {
    Competitor,
    Delegate,
    Announcer,
    StageLead,
    DataEntry,
    Scrambler,
    Runner,
    Judge,
    OtherStaff,
    Other(String),
}

/// Order in which assignment groups are listed on a group page.
///
/// Codes missing from this list are never shown.
pub const GROUP_ASSIGNMENT_CODE_RANK: [AssignmentCode; 9] = [
    AssignmentCode::Delegate,
    AssignmentCode::Announcer,
    AssignmentCode::StageLead,
    AssignmentCode::DataEntry,
    AssignmentCode::Scrambler,
    AssignmentCode::Runner,
    AssignmentCode::Judge,
    AssignmentCode::OtherStaff,
    AssignmentCode::Competitor,
];

impl AssignmentCode {
    /// The WCIF string for this code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Competitor => "competitor",
            Self::Delegate => "staff-delegate",
            Self::Announcer => "staff-announcer",
            Self::StageLead => "staff-stagelead",
            Self::DataEntry => "staff-dataentry",
            Self::Scrambler => "staff-scrambler",
            Self::Runner => "staff-runner",
            Self::Judge => "staff-judge",
            Self::OtherStaff => "staff-other",
            Self::Other(code) => code,
        }
    }

    /// Plural heading used above a group of persons.
    pub fn label(&self) -> &str {
        match self {
            Self::Competitor => "Competitors",
            Self::Delegate => "Delegates",
            Self::Announcer => "Announcers",
            Self::StageLead => "Stage Leads",
            Self::DataEntry => "Data Entry",
            Self::Scrambler => "Scramblers",
            Self::Runner => "Runners",
            Self::Judge => "Judges",
            Self::OtherStaff => "Other Staff",
            Self::Other(code) => code,
        }
    }

    /// Position in [`GROUP_ASSIGNMENT_CODE_RANK`], `None` for unranked codes.
    pub fn rank(&self) -> Option<usize> {
        GROUP_ASSIGNMENT_CODE_RANK.iter().position(|code| code == self)
    }
}

impl From<String> for AssignmentCode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "competitor" => Self::Competitor,
            "staff-delegate" => Self::Delegate,
            "staff-announcer" => Self::Announcer,
            "staff-stagelead" => Self::StageLead,
            "staff-dataentry" => Self::DataEntry,
            "staff-scrambler" => Self::Scrambler,
            "staff-runner" => Self::Runner,
            "staff-judge" => Self::Judge,
            "staff-other" => Self::OtherStaff,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for AssignmentCode {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<AssignmentCode> for String {
    fn from(code: AssignmentCode) -> Self {
        match code {
            AssignmentCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AssignmentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
