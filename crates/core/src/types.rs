/// Entity identifiers are opaque strings (seed records use short numeric ids,
/// generated records use [`crate::ids::generate_id`]).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (job posting date, application date) carry no time zone.
pub type Date = chrono::NaiveDate;
