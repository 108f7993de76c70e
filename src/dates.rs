use crate::models::EnergyEntry;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses an entry date: `DD.MM.YYYY` (display format) or ISO `YYYY-MM-DD`.
///
/// Returns `None` for anything that is not a real calendar date.
pub fn parse_entry_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() == 3 {
        let day = parts[0].parse::<u32>().ok()?;
        let month = parts[1].parse::<u32>().ok()?;
        let year = parts[2].parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Some(stamp.date_naive());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|stamp| stamp.date())
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Oldest first. Stable, so same-day entries keep their input order; entries
/// whose date does not parse come before everything else.
pub fn sort_chronologically(entries: &[EnergyEntry]) -> Vec<&EnergyEntry> {
    let mut sorted: Vec<&EnergyEntry> = entries.iter().collect();
    sorted.sort_by_cached_key(|entry| parse_entry_date(&entry.date));
    sorted
}

pub(crate) fn chronological_scores(entries: &[EnergyEntry]) -> Vec<u8> {
    sort_chronologically(entries)
        .into_iter()
        .map(|entry| entry.score)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_dotted_display_format() {
        assert_eq!(parse_entry_date("05.01.2026"), Some(ymd(2026, 1, 5)));
        assert_eq!(parse_entry_date("5.1.2026"), Some(ymd(2026, 1, 5)));
    }

    #[test]
    fn parses_iso_and_timestamps() {
        assert_eq!(parse_entry_date("2026-01-05"), Some(ymd(2026, 1, 5)));
        assert_eq!(
            parse_entry_date("2026-01-05T23:10:00+03:00"),
            Some(ymd(2026, 1, 5))
        );
        assert_eq!(
            parse_entry_date("2026-01-05T08:00:00"),
            Some(ymd(2026, 1, 5))
        );
    }

    #[test]
    fn malformed_dates_are_none() {
        assert_eq!(parse_entry_date(""), None);
        assert_eq!(parse_entry_date("yesterday"), None);
        assert_eq!(parse_entry_date("31.02.2024"), None);
        assert_eq!(parse_entry_date("aa.bb.cccc"), None);
        assert_eq!(parse_entry_date("2026-13-01"), None);
    }

    #[test]
    fn display_format_round_trips() {
        let date = ymd(2025, 11, 3);
        assert_eq!(format_display_date(date), "03.11.2025");
        assert_eq!(parse_entry_date(&format_display_date(date)), Some(date));
    }

    #[test]
    fn sorting_mixes_both_formats() {
        let entries = vec![
            EnergyEntry::new("2026-01-03", 3),
            EnergyEntry::new("01.01.2026", 1),
            EnergyEntry::new("2026-01-02", 2),
        ];
        assert_eq!(chronological_scores(&entries), vec![1, 2, 3]);
    }
}
