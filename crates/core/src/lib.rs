//! Domain logic for groupboard.
//!
//! Zero I/O: everything here works on an already-fetched WCIF snapshot or
//! competition listing, so the API client and the CLI can share it.

pub mod activity_code;
pub mod assignment;
pub mod competition;
pub mod error;
pub mod group;
pub mod navigation;
pub mod person;
pub mod roster;
pub mod round_rules;
pub mod time;
pub mod types;
pub mod wcif;

pub use activity_code::ActivityCode;
pub use assignment::{AssignmentCode, GROUP_ASSIGNMENT_CODE_RANK};
pub use error::CoreError;
pub use group::GroupView;
pub use wcif::Competition;
