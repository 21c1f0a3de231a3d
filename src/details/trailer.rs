//! Latest-trailer selection over an item's media entries.

use crate::catalog::models::RawMediaEntry;
use chrono::{DateTime, NaiveDate, Utc};

const TRAILER_KIND: &str = "trailer";
const TRAILER_SITE: &str = "youtube";
const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Parses a media publish timestamp.
///
/// Accepts RFC 3339 (`2020-01-01T17:00:00.000Z`) and bare `YYYY-MM-DD`
/// dates, the latter taken as midnight UTC.
#[must_use]
pub fn parse_published_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, DATE_ONLY_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn is_trailer(entry: &RawMediaEntry) -> bool {
    entry.kind.eq_ignore_ascii_case(TRAILER_KIND) && entry.site.eq_ignore_ascii_case(TRAILER_SITE)
}

/// Picks the most recently published YouTube trailer.
///
/// Entries of another type or site, and entries whose timestamp does not
/// parse, are ignored. When several trailers share the latest timestamp the
/// last one in `entries` wins.
///
/// # Example
///
/// ```
/// use cinelist::catalog::RawMediaEntry;
/// use cinelist::details::select_latest_trailer;
///
/// let entry = |kind: &str, published_at: &str, key: &str| RawMediaEntry {
///     published_at: published_at.into(),
///     site: "YouTube".into(),
///     kind: kind.into(),
///     key: key.into(),
/// };
/// let entries = [entry("Trailer", "2020-01-01", "a"), entry("Teaser", "2022-01-01", "b")];
/// let latest = select_latest_trailer(&entries).map(|(entry, _)| entry.key.as_str());
/// assert_eq!(latest, Some("a"));
/// ```
#[must_use]
pub fn select_latest_trailer(entries: &[RawMediaEntry]) -> Option<(&RawMediaEntry, DateTime<Utc>)> {
    entries
        .iter()
        .filter(|entry| is_trailer(entry))
        .filter_map(|entry| parse_published_at(&entry.published_at).map(|at| (entry, at)))
        .fold(None, |latest, (entry, at)| match latest {
            Some((_, best)) if at < best => latest,
            _ => Some((entry, at)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: &str, site: &str, published_at: &str, key: &str) -> RawMediaEntry {
        RawMediaEntry {
            published_at: published_at.to_string(),
            site: site.to_string(),
            kind: kind.to_string(),
            key: key.to_string(),
        }
    }

    fn key(entries: &[RawMediaEntry]) -> Option<&str> {
        select_latest_trailer(entries).map(|(entry, _)| entry.key.as_str())
    }

    #[test]
    fn teasers_are_not_trailers() {
        let entries = [
            entry("Trailer", "YouTube", "2020-01-01", "trailer"),
            entry("Teaser", "YouTube", "2022-01-01", "teaser"),
        ];
        assert_eq!(key(&entries), Some("trailer"));
    }

    #[test]
    fn newest_trailer_wins() {
        let entries = [
            entry("Trailer", "YouTube", "2019-05-01T10:00:00.000Z", "old"),
            entry("trailer", "youtube", "2021-03-04T17:00:00.000Z", "new"),
            entry("Trailer", "YouTube", "2020-01-01", "mid"),
        ];
        assert_eq!(key(&entries), Some("new"));
    }

    #[test]
    fn other_sites_and_bad_dates_are_skipped() {
        let entries = [
            entry("Trailer", "Vimeo", "2024-01-01", "vimeo"),
            entry("Trailer", "YouTube", "someday", "broken"),
            entry("Trailer", "YouTube", "2018-01-01", "ok"),
        ];
        assert_eq!(key(&entries), Some("ok"));
        assert_eq!(key(&entries[..2]), None);
        assert_eq!(key(&[]), None);
    }

    #[test]
    fn equal_timestamps_pick_the_last_entry() {
        let entries = [
            entry("Trailer", "YouTube", "2020-01-01T00:00:00Z", "first"),
            entry("Trailer", "YouTube", "2020-01-01", "second"),
        ];
        assert_eq!(key(&entries), Some("second"));
    }

    #[test]
    fn parses_both_timestamp_forms() {
        let full = parse_published_at("2020-01-01T17:00:00.000Z").unwrap();
        let date = parse_published_at("2020-01-01").unwrap();
        assert_eq!(full.timestamp() - date.timestamp(), 17 * 3600);
        assert!(parse_published_at("").is_none());
    }
}
