//! services/tracker/src/web/forms.rs
//!
//! Field parsing shared by the form handlers. Every failure is a message meant
//! to be shown next to the form, never an error page.

use chrono::{NaiveDate, NaiveTime};

pub const INVALID_HOURS: &str = "Please enter a valid number for study hours.";

/// Upper bound on hours in a single day.
pub const MAX_HOURS: u32 = 24;

/// Returns the trimmed value, or a "required" message when it is blank.
pub fn required<'a>(value: Option<&'a str>, label: &str) -> Result<&'a str, String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(format!("{} is required.", label)),
    }
}

/// Blank optional fields are treated as absent.
pub fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Hours must be a whole number between one and `MAX_HOURS`.
pub fn hours(value: Option<&str>) -> Result<u32, String> {
    optional(value)
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|h| (1..=MAX_HOURS).contains(h))
        .ok_or_else(|| INVALID_HOURS.to_string())
}

pub fn date(value: &str, label: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("{} must be a date like 2025-01-31.", label))
}

pub fn time(value: &str, label: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| format!("{} must be a time like 14:30.", label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_fields_are_rejected() {
        assert_eq!(required(Some("  Math "), "Subject"), Ok("Math"));
        assert_eq!(required(Some("   "), "Subject").unwrap_err(), "Subject is required.");
        assert!(required(None, "Subject").is_err());
    }

    #[test]
    fn hours_must_be_a_positive_integer() {
        assert_eq!(hours(Some(" 3 ")), Ok(3));
        assert_eq!(hours(Some("24")), Ok(MAX_HOURS));
        for bad in ["", "0", "-2", "2.5", "three", "25", "3000000000", "99999999999"] {
            assert_eq!(hours(Some(bad)).unwrap_err(), INVALID_HOURS, "{bad:?}");
        }
        assert!(hours(None).is_err());
    }

    #[test]
    fn dates_and_times_use_iso_formats() {
        assert_eq!(
            date("2025-01-01", "Start date"),
            Ok(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert!(date("01/02/2025", "Start date").is_err());
        assert_eq!(time("14:00", "Time"), Ok(NaiveTime::from_hms_opt(14, 0, 0).unwrap()));
        assert!(time("25:00", "Time").is_err());
    }
}
