use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display format for date columns, e.g. `05-Mar-2024`.
pub const DISPLAY_FORMAT: &str = "%d-%b-%Y";

/// ISO-8601 calendar date, e.g. `2024-03-05`.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO-8601 date or date-time, keeping only the calendar date.
///
/// Accepted forms:
/// * `2024-03-05`
/// * `2024-03-05T10:30:00` (naive)
/// * `2024-03-05T10:30:00+05:30` / `…Z` (RFC 3339, date in its own offset)
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, ISO_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Strict `YYYY-MM-DD` check used when inferring cell types.
pub fn is_iso_date(raw: &str) -> bool {
    raw.len() == 10 && NaiveDate::parse_from_str(raw, ISO_FORMAT).is_ok()
}

/// Parse a `05-Mar-2024` display date back into a calendar date.
pub fn parse_display_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DISPLAY_FORMAT).ok()
}

/// `2024-03-05` → `05-Mar-2024`. Anything unparseable is returned unchanged.
pub fn format_date(raw: &str) -> String {
    match parse_iso_date(raw) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_plain_dates() {
        assert_eq!(format_date("2024-03-05"), "05-Mar-2024");
        assert_eq!(format_date("2023-12-31"), "31-Dec-2023");
    }

    #[test]
    fn formats_date_times_by_calendar_date() {
        assert_eq!(format_date("2024-03-05T23:10:00"), "05-Mar-2024");
        assert_eq!(format_date("2024-03-05T23:10:00+05:30"), "05-Mar-2024");
        assert_eq!(format_date("2024-03-05T01:00:00Z"), "05-Mar-2024");
    }

    #[test]
    fn malformed_dates_pass_through() {
        assert_eq!(format_date("not-a-date"), "not-a-date");
        assert_eq!(format_date("2024-02-30"), "2024-02-30");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn display_dates_parse_back() {
        let date = parse_display_date("05-Mar-2024").unwrap();
        assert_eq!(date.format(ISO_FORMAT).to_string(), "2024-03-05");
        let round = parse_display_date(&format_date("2023-12-31T08:00:00Z"));
        assert_eq!(round, parse_iso_date("2023-12-31"));
        assert_eq!(parse_display_date("2024-03-05"), None);
    }

    #[test]
    fn iso_date_detection_is_strict() {
        assert!(is_iso_date("2024-03-05"));
        assert!(!is_iso_date("2024-3-5"));
        assert!(!is_iso_date("05-Mar-2024"));
        assert!(!is_iso_date("2024-03-05T10:00:00"));
    }
}
