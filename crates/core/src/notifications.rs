//! Notification type names, platform event names and content limits.
//!
//! These must match the values stored in `notifications.notification_type`
//! and `events.event_type`, and are shared by the event services and the
//! API handlers.

use crate::error::CoreError;
use crate::types::DbId;

/// A member's trip has new suggested periods.
pub const TYPE_TRIP_UPDATE: &str = "trip_update";

/// A member submitted availability (sent to the trip creator).
pub const TYPE_AVAILABILITY_UPDATED: &str = "availability_updated";

/// Published after a member's availability set is replaced.
pub const EVENT_AVAILABILITY_SUBMITTED: &str = "availability.submitted";

/// Published after a generation run commits a new period set.
pub const EVENT_PERIODS_GENERATED: &str = "periods.generated";

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_MESSAGE_LEN: usize = 10_000;
pub const MAX_ACTION_URL_LEN: usize = 2_048;

/// Check notification content against the column limits, counted in
/// characters as `VARCHAR(n)` counts them.
pub fn validate_notification_content(
    title: &str,
    message: Option<&str>,
    action_url: Option<&str>,
) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("notification title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "notification title exceeds maximum length of {MAX_TITLE_LEN} characters"
        )));
    }
    if message.is_some_and(|m| m.chars().count() > MAX_MESSAGE_LEN) {
        return Err(CoreError::Validation(format!(
            "notification message exceeds maximum length of {MAX_MESSAGE_LEN} characters"
        )));
    }
    if action_url.is_some_and(|u| u.chars().count() > MAX_ACTION_URL_LEN) {
        return Err(CoreError::Validation(format!(
            "action_url exceeds maximum length of {MAX_ACTION_URL_LEN} characters"
        )));
    }
    Ok(())
}

/// Link to a trip page in the web client.
pub fn trip_url(frontend_base: &str, trip_id: DbId) -> String {
    format!("{}/trips/{trip_id}", frontend_base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_content() {
        assert!(validate_notification_content("Hello", Some("body"), None).is_ok());
    }

    #[test]
    fn rejects_blank_title() {
        assert!(validate_notification_content("  ", None, None).is_err());
    }

    #[test]
    fn rejects_oversized_fields() {
        let long_title = "t".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_notification_content(&long_title, None, None).is_err());

        let long_message = "m".repeat(MAX_MESSAGE_LEN + 1);
        assert!(validate_notification_content("ok", Some(&long_message), None).is_err());

        let long_url = "u".repeat(MAX_ACTION_URL_LEN + 1);
        assert!(validate_notification_content("ok", None, Some(&long_url)).is_err());
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let thai_title = "ท".repeat(MAX_TITLE_LEN);
        assert!(thai_title.len() > MAX_TITLE_LEN);
        assert!(validate_notification_content(&thai_title, None, None).is_ok());

        let too_long = "ท".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_notification_content(&too_long, None, None).is_err());
    }

    #[test]
    fn trip_url_trims_trailing_slash() {
        assert_eq!(trip_url("http://localhost:8081/", 7), "http://localhost:8081/trips/7");
    }
}
