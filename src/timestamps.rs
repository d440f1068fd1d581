use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";
pub const PLACEHOLDER: &str = "—";

/// Parses an operator timestamp or a filter bound. Zone-less values are read as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn timestamp_millis(input: &str) -> Option<i64> {
    parse_timestamp(input).map(|ts| ts.timestamp_millis())
}

/// `dd.MM.yyyy HH:mm`, or the placeholder for unparseable input.
pub fn format_display(input: &str) -> String {
    match parse_timestamp(input) {
        Some(ts) => ts.format(DISPLAY_FORMAT).to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let a = timestamp_millis("2023-01-01T02:00:00+02:00").unwrap();
        let b = timestamp_millis("2023-01-01T00:00:00Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parses_date_picker_and_plain_dates() {
        assert_eq!(
            timestamp_millis("2023-01-01T00:00"),
            timestamp_millis("2023-01-01T00:00:00.000Z")
        );
        assert_eq!(
            timestamp_millis("2023-01-01"),
            timestamp_millis("2023-01-01T00:00:00Z")
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("2023-13-45").is_none());
    }

    #[test]
    fn formats_for_display() {
        assert_eq!(format_display("2024-03-05T09:07:00Z"), "05.03.2024 09:07");
        assert_eq!(format_display("soon"), "—");
    }
}
