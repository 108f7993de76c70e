use crate::dates::{parse_entry_date, sort_chronologically};
use crate::errors::AppError;
use crate::models::EnergyEntry;
use chrono::{Datelike, Days, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Named reporting periods, each ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[serde(rename = "3days")]
    ThreeDays,
    Week,
    Month,
    Year,
}

impl Period {
    /// Inclusive `(start, end)` bounds. The window is `(today - span, today]`,
    /// so a week is today plus the six days before it.
    pub fn range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let before = match self {
            Self::ThreeDays => days_before(today, 3),
            Self::Week => days_before(today, 7),
            Self::Month => today
                .checked_sub_months(Months::new(1))
                .unwrap_or(NaiveDate::MIN),
            Self::Year => today
                .checked_sub_months(Months::new(12))
                .unwrap_or(NaiveDate::MIN),
        };
        (before + Duration::days(1), today)
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3days" | "three-days" => Ok(Self::ThreeDays),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(AppError::bad_request(format!(
                "unknown period '{s}', expected 3days, week, month or year"
            ))),
        }
    }
}

/// `today` minus `days`, saturating at the earliest representable date.
fn days_before(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

pub fn filter_by_range(entries: &[EnergyEntry], start: NaiveDate, end: NaiveDate) -> Vec<EnergyEntry> {
    entries
        .iter()
        .filter(|entry| {
            parse_entry_date(&entry.date).is_some_and(|date| start <= date && date <= end)
        })
        .cloned()
        .collect()
}

pub fn filter_by_last_n_days(entries: &[EnergyEntry], days: u32, today: NaiveDate) -> Vec<EnergyEntry> {
    let cutoff = days_before(today, days);
    entries
        .iter()
        .filter(|entry| parse_entry_date(&entry.date).is_some_and(|date| date >= cutoff))
        .cloned()
        .collect()
}

pub fn filter_by_period(entries: &[EnergyEntry], period: Period, today: NaiveDate) -> Vec<EnergyEntry> {
    let (start, end) = period.range(today);
    filter_by_range(entries, start, end)
}

pub fn filter_by_month(entries: &[EnergyEntry], year: i32, month: u32) -> Vec<EnergyEntry> {
    entries
        .iter()
        .filter(|entry| {
            parse_entry_date(&entry.date)
                .is_some_and(|date| date.year() == year && date.month() == month)
        })
        .cloned()
        .collect()
}

/// Entries dated within the last `days` days (`(today - days, today]`),
/// oldest first.
pub fn window(entries: &[EnergyEntry], days: u32, today: NaiveDate) -> Vec<&EnergyEntry> {
    let start = days_before(today, days);
    sort_chronologically(entries)
        .into_iter()
        .filter(|entry| {
            parse_entry_date(&entry.date).is_some_and(|date| start < date && date <= today)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn history(today: NaiveDate, days: i64) -> Vec<EnergyEntry> {
        (0..days)
            .map(|offset| {
                let date = today - Duration::days(offset);
                EnergyEntry::new(date.format("%d.%m.%Y").to_string(), (offset % 5 + 1) as u8)
            })
            .collect()
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let entries = vec![
            EnergyEntry::new("01.03.2026", 1),
            EnergyEntry::new("2026-03-05", 2),
            EnergyEntry::new("10.03.2026", 3),
            EnergyEntry::new("11.03.2026", 4),
            EnergyEntry::new("garbage", 5),
        ];
        let filtered = filter_by_range(&entries, ymd(2026, 3, 1), ymd(2026, 3, 10));
        let scores: Vec<u8> = filtered.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![1, 2, 3]);
    }

    #[test]
    fn range_preserves_input_order() {
        let entries = vec![
            EnergyEntry::new("05.03.2026", 5),
            EnergyEntry::new("01.03.2026", 1),
            EnergyEntry::new("03.03.2026", 3),
        ];
        let filtered = filter_by_range(&entries, ymd(2026, 3, 1), ymd(2026, 3, 31));
        let scores: Vec<u8> = filtered.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![5, 1, 3]);
    }

    #[test]
    fn last_n_days_includes_the_cutoff_day() {
        let today = ymd(2026, 3, 20);
        let entries = history(today, 20);
        assert_eq!(filter_by_last_n_days(&entries, 7, today).len(), 8);
        assert_eq!(filter_by_last_n_days(&entries, 0, today).len(), 1);
    }

    #[test]
    fn period_ranges_end_today() {
        let today = ymd(2026, 3, 31);
        assert_eq!(Period::Week.range(today), (ymd(2026, 3, 25), today));
        assert_eq!(Period::ThreeDays.range(today), (ymd(2026, 3, 29), today));
        assert_eq!(Period::Month.range(today), (ymd(2026, 3, 1), today));
        assert_eq!(Period::Year.range(today), (ymd(2025, 4, 1), today));
    }

    #[test]
    fn week_period_holds_seven_days() {
        let today = ymd(2026, 3, 20);
        let entries = history(today, 30);
        assert_eq!(filter_by_period(&entries, Period::Week, today).len(), 7);
    }

    #[test]
    fn month_filter_matches_calendar_month() {
        let entries = vec![
            EnergyEntry::new("31.01.2026", 1),
            EnergyEntry::new("01.02.2026", 2),
            EnergyEntry::new("2026-02-28", 3),
            EnergyEntry::new("01.02.2025", 4),
        ];
        let scores: Vec<u8> = filter_by_month(&entries, 2026, 2)
            .iter()
            .map(|e| e.score)
            .collect();
        assert_eq!(scores, vec![2, 3]);
    }

    #[test]
    fn window_sorts_and_excludes_future() {
        let today = ymd(2026, 3, 20);
        let entries = vec![
            EnergyEntry::new("2026-03-21", 5),
            EnergyEntry::new("2026-03-19", 2),
            EnergyEntry::new("2026-02-18", 1),
            EnergyEntry::new("2026-02-19", 4),
            EnergyEntry::new("2026-03-20", 3),
        ];
        let scores: Vec<u8> = window(&entries, 30, today).iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![4, 2, 3]);
    }

    #[test]
    fn period_names_parse() {
        assert_eq!("week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("3days".parse::<Period>().unwrap(), Period::ThreeDays);
        let err = "decade".parse::<Period>().unwrap_err();
        assert!(err.message.contains("unknown period"));
    }

    #[test]
    fn huge_day_counts_saturate() {
        let today = ymd(2026, 6, 30);
        let entries = vec![
            EnergyEntry::new("2026-06-29", 4),
            EnergyEntry::new("01.01.1900", 2),
        ];
        assert_eq!(filter_by_last_n_days(&entries, u32::MAX, today).len(), 2);
        let scores: Vec<u8> = window(&entries, u32::MAX, today).iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![2, 4]);
    }
}
