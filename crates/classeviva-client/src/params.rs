//! Category-specific request parameters

use chrono::NaiveDate;

/// Compact date form used by the upstream in URL segments.
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Parse a `YYYYMMDD` date. Returns `None` for anything else.
pub fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, COMPACT_DATE_FORMAT).ok()
}

pub fn format_compact_date(date: NaiveDate) -> String {
    date.format(COMPACT_DATE_FORMAT).to_string()
}

/// Date window for the agenda endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgendaRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AgendaRange {
    /// Fill in omitted bounds: no start means today, no end means start.
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        let start = start.unwrap_or(today);
        Self {
            start,
            end: end.unwrap_or(start),
        }
    }

    pub fn start_compact(&self) -> String {
        format_compact_date(self.start)
    }

    pub fn end_compact(&self) -> String {
        format_compact_date(self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestParams {
    #[default]
    None,
    Agenda(AgendaRange),
    Day(NaiveDate),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_compact_date() {
        assert_eq!(parse_compact_date("20240101"), Some(date(2024, 1, 1)));
        assert_eq!(parse_compact_date("2024-01-01"), None);
        assert_eq!(parse_compact_date("20241301"), None);
        assert_eq!(parse_compact_date("2024011"), None);
        assert_eq!(parse_compact_date("../../x"), None);
    }

    #[test]
    fn test_agenda_range_defaults() {
        let today = date(2026, 10, 14);

        let range = AgendaRange::resolve(None, None, today);
        assert_eq!(range.start_compact(), "20261014");
        assert_eq!(range.end_compact(), "20261014");

        let range = AgendaRange::resolve(Some(date(2024, 1, 1)), None, today);
        assert_eq!(range.start_compact(), "20240101");
        assert_eq!(range.end_compact(), "20240101");

        let range = AgendaRange::resolve(Some(date(2024, 1, 1)), Some(date(2024, 2, 15)), today);
        assert_eq!(range.start_compact(), "20240101");
        assert_eq!(range.end_compact(), "20240215");
    }
}
