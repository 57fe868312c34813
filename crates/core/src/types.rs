/// WCA competition ids are slugs such as `SeattleSummerOpen2024`.
pub type CompetitionId = String;

/// WCIF activity ids are unique integers within one competition.
pub type ActivityId = i64;

/// Registrant ids are unique integers within one competition.
pub type RegistrantId = i64;

/// WCIF room ids are unique integers within one competition.
pub type RoomId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
