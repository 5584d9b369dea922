//! Date normalization anchored to a fixed UTC+9 offset.
//!
//! Vendor sources report timestamps in wildly different shapes: RFC 2822
//! `pubDate` strings, RFC 3339 Atom timestamps with seven-digit fractions,
//! plain `YYYY-MM-DD` dates, `"Month D, YYYY"` prose on release-note pages,
//! and sometimes nothing at all. Everything funnels through [`normalize`],
//! which yields one canonical `YYYY-MM-DD` sort key and one localized display
//! string, both in JST. Parsing failures fall through the candidate chain to
//! a "now" default; nothing here panics on vendor input.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Fractional seconds stripped before ISO-8601 parsing (Oracle feeds emit
/// seven digits, which is more than a whole-second contract needs).
static RE_FRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\d+").unwrap());

/// `"Month D, YYYY"` anywhere inside a larger text block.
static RE_PROSE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}",
    )
    .unwrap()
});

/// The fixed display offset: UTC+9.
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

/// Current time in the fixed UTC+9 offset.
pub fn now_jst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&jst())
}

/// A normalized announcement date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDate {
    /// Localized long form, e.g. `2026年2月20日` (no zero padding).
    pub display: String,
    /// Canonical `YYYY-MM-DD`, the sort and identity key.
    pub iso: String,
}

impl NormalizedDate {
    fn from_date(date: NaiveDate) -> Self {
        NormalizedDate {
            display: format!("{}年{}月{}日", date.year(), date.month(), date.day()),
            iso: date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Normalize a timestamp from the candidate representations, in priority order.
///
/// 1. A structured UTC timestamp (already parsed from the feed), converted
///    to UTC+9.
/// 2. A raw text date: full ISO-8601 (truncated to whole seconds first),
///    bare `YYYY-MM-DD`, `"Month D, YYYY"` prose, or bare `YYYY-MM`
///    (interpreted as the first of the month).
/// 3. `now` in UTC+9 when nothing is present or parseable.
pub fn normalize(
    parsed: Option<DateTime<Utc>>,
    raw: Option<&str>,
    now: DateTime<FixedOffset>,
) -> NormalizedDate {
    let date = parsed
        .map(|ts| ts.with_timezone(&jst()).date_naive())
        .or_else(|| raw.and_then(parse_text_date))
        .unwrap_or_else(|| now.date_naive());
    NormalizedDate::from_date(date)
}

/// Parse one of the supported textual date shapes into a JST calendar date.
///
/// Returns `None` instead of failing so callers can fall through to the next
/// candidate.
pub fn parse_text_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    // Full ISO-8601 with offset, whole seconds only.
    let whole = RE_FRACTION.replace(text, "");
    if let Ok(dt) = DateTime::parse_from_rfc3339(&whole) {
        return Some(dt.with_timezone(&jst()).date_naive());
    }
    // ISO-8601 without offset: interpret as UTC, then shift.
    if let Ok(naive) = NaiveDateTime::parse_from_str(&whole, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc().with_timezone(&jst()).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    // "Month D, YYYY" prose, possibly embedded in surrounding text.
    if let Some(m) = RE_PROSE_DATE.find(text) {
        if let Ok(date) = NaiveDate::parse_from_str(m.as_str(), "%B %d, %Y") {
            return Some(date);
        }
    }
    // Bare year-month: first of the month.
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d") {
        return Some(date);
    }
    None
}

/// Timestamp stamped on a finished snapshot, e.g. `2026年02月20日 14:05 JST`.
pub fn run_stamp(now: DateTime<FixedOffset>) -> String {
    now.format("%Y年%m月%d日 %H:%M JST").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<FixedOffset> {
        jst().with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_normalize_structured_timestamp_shifts_to_jst() {
        // 2026-02-20 23:30 UTC is already 2026-02-21 in JST
        let ts = Utc.with_ymd_and_hms(2026, 2, 20, 23, 30, 0).unwrap();
        let nd = normalize(Some(ts), None, fixed_now());
        assert_eq!(nd.iso, "2026-02-21");
        assert_eq!(nd.display, "2026年2月21日");
    }

    #[test]
    fn test_normalize_iso_string_with_fraction_and_offset() {
        let nd = normalize(None, Some("2026-02-20T10:15:30.1234567Z"), fixed_now());
        assert_eq!(nd.iso, "2026-02-20");
        assert_eq!(nd.display, "2026年2月20日");
    }

    #[test]
    fn test_normalize_iso_string_without_offset() {
        let nd = normalize(None, Some("2026-02-20T20:15:30"), fixed_now());
        // 20:15 UTC rolls over to the next JST day
        assert_eq!(nd.iso, "2026-02-21");
    }

    #[test]
    fn test_normalize_prose_date() {
        let nd = normalize(None, Some("February 20, 2026"), fixed_now());
        assert_eq!(nd.iso, "2026-02-20");
        assert_eq!(nd.display, "2026年2月20日");
    }

    #[test]
    fn test_parse_prose_date_embedded_in_text() {
        let date = parse_text_date("Release notes for February 3, 2026 - Compute");
        assert_eq!(date, Some(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap()));
    }

    #[test]
    fn test_parse_bare_year_month() {
        let date = parse_text_date("2026-02");
        assert_eq!(date, Some(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    }

    #[test]
    fn test_parse_bare_date() {
        let date = parse_text_date("2026-02-20");
        assert_eq!(date, Some(NaiveDate::from_ymd_opt(2026, 2, 20).unwrap()));
    }

    #[test]
    fn test_normalize_falls_back_to_now() {
        let nd = normalize(None, Some("not a date at all"), fixed_now());
        assert_eq!(nd.iso, "2026-03-01");
        assert_eq!(nd.display, "2026年3月1日");

        let nd = normalize(None, None, fixed_now());
        assert_eq!(nd.iso, "2026-03-01");
    }

    #[test]
    fn test_display_agrees_with_iso() {
        for raw in ["2026-02-20T10:15:30Z", "February 20, 2026", "2026-02-20"] {
            let nd = normalize(None, Some(raw), fixed_now());
            assert!(nd.iso.starts_with("2026-02-2"));
            let re = regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
            assert!(re.is_match(&nd.iso));
            assert!(nd.display.starts_with("2026年2月2"));
        }
    }

    #[test]
    fn test_run_stamp_format() {
        assert_eq!(run_stamp(fixed_now()), "2026年03月01日 12:00 JST");
    }
}
