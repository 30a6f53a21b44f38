//! Event type definitions for cal-core

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Error, Result};

/// Maximum length of an event name, in characters
pub const MAX_NAME_LEN: usize = 80;

/// Date format used on the wire and in the database
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A persisted calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Store-assigned identifier
    pub id: i64,
    /// Event name
    #[serde(rename = "event")]
    pub name: String,
    /// Calendar date of the event
    pub date: NaiveDate,
}

/// A validated event that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub(crate) name: String,
    pub(crate) date: NaiveDate,
}

impl NewEvent {
    /// Create a new event, checking the name rules
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, date })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Check that an event name is non-empty and at most [`MAX_NAME_LEN`] characters
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidEvent("event name is empty".to_string()));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(Error::InvalidEvent(format!(
            "event name is {} characters, maximum is {}",
            len, MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded fields and leading blanks; the wire format does not
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_wire_names() {
        let event = Event {
            id: 7,
            name: "Meeting".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["event"], "Meeting");
        assert_eq!(json["date"], "2024-03-05");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_new_event_name_rules() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(NewEvent::new("Standup", date).is_ok());
        assert!(NewEvent::new("x".repeat(MAX_NAME_LEN), date).is_ok());
        assert!(matches!(NewEvent::new("", date), Err(Error::InvalidEvent(_))));
        assert!(matches!(NewEvent::new("   ", date), Err(Error::InvalidEvent(_))));
        assert!(matches!(
            NewEvent::new("x".repeat(MAX_NAME_LEN + 1), date),
            Err(Error::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 80 multi-byte characters is still within the limit
        assert!(validate_name(&"é".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("2024-3-5"), None);
        assert_eq!(parse_date("05/03/2024"), None);
        assert_eq!(parse_date("2024-03-05T10:00:00"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_format_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "2024-03-05");
    }
}
