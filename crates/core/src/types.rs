/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Trips are planned in whole calendar days with no time zone attached.
pub type CalendarDate = chrono::NaiveDate;

/// Wire format for calendar dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
