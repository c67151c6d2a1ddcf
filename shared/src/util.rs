//! Date derivation and display formatting
//!
//! The backend hands out dates either as plain `YYYY-MM-DD` strings or as
//! RFC 3339 timestamps. Plain dates are treated as calendar dates; timestamps
//! are converted to local time before their date or clock is read.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer};

/// Wire format for dates sent to the backend
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder rendered for missing or unparseable values
pub const EMPTY_PLACEHOLDER: &str = "-";

/// Today's local date as `YYYY-MM-DD`
pub fn today() -> String {
    Local::now().date_naive().format(WIRE_DATE_FORMAT).to_string()
}

/// Parse a backend date or timestamp into a calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, WIRE_DATE_FORMAT) {
        return Some(date);
    }
    parse_datetime(value).map(|dt| dt.date())
}

/// Parse a backend timestamp into a local wall-clock time.
///
/// Timestamps without an offset are taken as already local.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, WIRE_DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Normalize a date to the wire format, passing unparseable input through.
pub fn to_wire_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format(WIRE_DATE_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Derive the expiry date as `issue_date + duration` days.
///
/// Returns `None` when either input is missing or not usable, in which case
/// the record has no expiry date.
pub fn compute_expiry(issue_date: &str, duration: &str) -> Option<String> {
    let issue = parse_date(issue_date)?;
    let days: u64 = duration.trim().parse().ok()?;
    issue
        .checked_add_days(Days::new(days))
        .map(|d| d.format(WIRE_DATE_FORMAT).to_string())
}

/// `DD-MM-YYYY`
pub fn format_date_dmy(value: Option<&str>) -> String {
    value
        .and_then(parse_date)
        .map(|d| d.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|| EMPTY_PLACEHOLDER.to_string())
}

/// `DD-MM-YYYY hh:mm AM/PM`, with midnight and noon shown as 12
pub fn format_datetime_dmy(value: Option<&str>) -> String {
    let Some(dt) = value.and_then(parse_datetime) else {
        return EMPTY_PLACEHOLDER.to_string();
    };
    let (is_pm, hour12) = dt.hour12();
    format!(
        "{:02}-{:02}-{} {:02}:{:02} {}",
        dt.day(),
        dt.month(),
        dt.year(),
        hour12,
        dt.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// Long form with ordinal day, e.g. `19th October 2026`
pub fn format_date_long(value: Option<&str>) -> String {
    let Some(date) = value.and_then(parse_date) else {
        return EMPTY_PLACEHOLDER.to_string();
    };
    let day = date.day();
    format!(
        "{}{} {} {}",
        day,
        ordinal_suffix(day),
        date.format("%B"),
        date.year()
    )
}

/// Serde helper: accepts strings, numbers, booleans, arrays (comma-joined)
/// and null, always yielding text.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(json_to_text(&value))
}

/// Render a loose JSON value as form text
pub fn json_to_text(value: &serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.iter().map(json_to_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_expiry_adds_days() {
        assert_eq!(
            compute_expiry("2024-01-01", "30").as_deref(),
            Some("2024-01-31")
        );
        assert_eq!(
            compute_expiry("2024-02-28", "1").as_deref(),
            Some("2024-02-29")
        );
        assert_eq!(
            compute_expiry("2023-12-31", "365").as_deref(),
            Some("2024-12-30")
        );
        assert_eq!(
            compute_expiry("2024-05-10", "0").as_deref(),
            Some("2024-05-10")
        );
    }

    #[test]
    fn test_compute_expiry_rejects_unusable_input() {
        assert!(compute_expiry("", "30").is_none());
        assert!(compute_expiry("2024-01-01", "").is_none());
        assert!(compute_expiry("2024-01-01", "abc").is_none());
        assert!(compute_expiry("2024-01-01", "-3").is_none());
        assert!(compute_expiry("not a date", "3").is_none());
    }

    #[test]
    fn test_compute_expiry_accepts_timestamps() {
        assert_eq!(
            compute_expiry("2024-01-01T10:30:00", "10").as_deref(),
            Some("2024-01-11")
        );
    }

    #[test]
    fn test_compute_expiry_matches_day_arithmetic() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        for offset in [0u64, 1, 27, 59, 400, 1461] {
            let issue = start.format(WIRE_DATE_FORMAT).to_string();
            let expected = (start + chrono::Duration::days(offset as i64))
                .format(WIRE_DATE_FORMAT)
                .to_string();
            assert_eq!(compute_expiry(&issue, &offset.to_string()), Some(expected));
        }
    }

    #[test]
    fn test_format_date_dmy() {
        assert_eq!(format_date_dmy(Some("2024-03-05")), "05-03-2024");
        assert_eq!(format_date_dmy(Some("")), "-");
        assert_eq!(format_date_dmy(Some("garbage")), "-");
        assert_eq!(format_date_dmy(None), "-");
    }

    #[test]
    fn test_format_datetime_dmy() {
        assert_eq!(
            format_datetime_dmy(Some("2024-03-05 00:07:00")),
            "05-03-2024 12:07 AM"
        );
        assert_eq!(
            format_datetime_dmy(Some("2024-03-05T12:30:00")),
            "05-03-2024 12:30 PM"
        );
        assert_eq!(
            format_datetime_dmy(Some("2024-12-31 23:59:59")),
            "31-12-2024 11:59 PM"
        );
        assert_eq!(format_datetime_dmy(None), "-");
    }

    #[test]
    fn test_format_datetime_dmy_converts_offsets_to_local() {
        let raw = "2024-06-01T08:15:00Z";
        let local = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local);
        let expected = local.format("%d-%m-%Y %I:%M %p").to_string();
        assert_eq!(format_datetime_dmy(Some(raw)), expected);
    }

    #[test]
    fn test_format_date_long_ordinals() {
        assert_eq!(format_date_long(Some("2026-10-01")), "1st October 2026");
        assert_eq!(format_date_long(Some("2026-10-02")), "2nd October 2026");
        assert_eq!(format_date_long(Some("2026-10-03")), "3rd October 2026");
        assert_eq!(format_date_long(Some("2026-10-11")), "11th October 2026");
        assert_eq!(format_date_long(Some("2026-10-12")), "12th October 2026");
        assert_eq!(format_date_long(Some("2026-10-13")), "13th October 2026");
        assert_eq!(format_date_long(Some("2026-10-19")), "19th October 2026");
        assert_eq!(format_date_long(Some("2026-10-21")), "21st October 2026");
        assert_eq!(format_date_long(Some("2026-10-22")), "22nd October 2026");
        assert_eq!(format_date_long(None), "-");
    }

    #[test]
    fn test_json_to_text() {
        use serde_json::json;
        assert_eq!(json_to_text(&json!(null)), "");
        assert_eq!(json_to_text(&json!(12)), "12");
        assert_eq!(json_to_text(&json!("x")), "x");
        assert_eq!(json_to_text(&json!(["a", 1])), "a,1");
    }

    #[test]
    fn test_to_wire_date() {
        assert_eq!(to_wire_date("2024-01-09T00:00:00"), "2024-01-09");
        assert_eq!(to_wire_date("2024-01-09"), "2024-01-09");
        assert_eq!(to_wire_date("whenever"), "whenever");
    }
}
