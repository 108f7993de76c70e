//! Personal energy indexes: how often peaks come, how long dips last and how
//! quickly energy returns to the usual level.
//!
//! "Peak" and "dip" are relative to the user's own history: thresholds are
//! nearest-rank quantiles of every score ever logged (no interpolation),
//! while the indexes themselves are measured over the trailing 30 days.

use crate::filter::window;
use crate::models::{Cyclicity, EnergyEntry, EnergyIndexes};
use crate::stats::{round1, variance};
use chrono::{Local, NaiveDate};
use tracing::debug;

const WINDOW_DAYS: u32 = 30;
const MIN_ENTRIES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub low: u8,
    pub high: u8,
    pub median: u8,
}

impl Thresholds {
    /// `None` for an empty history.
    pub fn from_scores(scores: &[u8]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let mut sorted = scores.to_vec();
        sorted.sort_unstable();
        let at = |q: f64| sorted[((q * sorted.len() as f64).floor() as usize).min(sorted.len() - 1)];
        Some(Self {
            low: at(0.25),
            high: at(0.75),
            median: sorted[sorted.len() / 2],
        })
    }
}

pub fn analyze_indexes(entries: &[EnergyEntry]) -> Option<EnergyIndexes> {
    analyze_indexes_at(Local::now().date_naive(), entries)
}

pub fn analyze_indexes_at(today: NaiveDate, entries: &[EnergyEntry]) -> Option<EnergyIndexes> {
    if entries.len() < MIN_ENTRIES {
        return None;
    }
    let recent: Vec<u8> = window(entries, WINDOW_DAYS, today)
        .into_iter()
        .map(|entry| entry.score)
        .collect();
    if recent.len() < MIN_ENTRIES {
        debug!(recent = recent.len(), "not enough recent entries for indexes");
        return None;
    }

    let all: Vec<u8> = entries.iter().map(|entry| entry.score).collect();
    let thresholds = Thresholds::from_scores(&all)?;

    let (peaks, distances) = peak_distances(&recent, thresholds.high);
    let avg_distance = average(&distances);
    let spread = if distances.len() >= 2 {
        let values: Vec<f64> = distances.iter().map(|&d| d as f64).collect();
        Some(variance(&values).sqrt())
    } else {
        None
    };
    let cyclicity = match spread {
        None => Cyclicity::Insufficient,
        Some(sd) if sd < avg_distance * 0.3 => Cyclicity::Stable,
        Some(sd) if sd < avg_distance * 0.6 => Cyclicity::Moderate,
        Some(_) => Cyclicity::Unstable,
    };

    let streaks = low_streaks(&recent, thresholds.low);
    let recoveries = recovery_times(&recent, thresholds.low, thresholds.median);

    Some(EnergyIndexes {
        peak_frequency: round1(avg_distance),
        low_streak_length: round1(average(&streaks)),
        recovery_speed: round1(average(&recoveries)),
        cyclicity,
        cyclicity_value: round1(spread.unwrap_or(0.0)),
        peaks_count: peaks,
        low_streaks_count: streaks.len(),
        low_threshold: thresholds.low,
        high_threshold: thresholds.high,
        median: thresholds.median,
    })
}

fn average(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

/// Number of peaks and the index gaps between consecutive ones.
fn peak_distances(scores: &[u8], high: u8) -> (usize, Vec<usize>) {
    let peaks: Vec<usize> = scores
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s >= high)
        .map(|(i, _)| i)
        .collect();
    let distances = peaks.windows(2).map(|pair| pair[1] - pair[0]).collect();
    (peaks.len(), distances)
}

/// Lengths of maximal runs at or below `low`.
fn low_streaks(scores: &[u8], low: u8) -> Vec<usize> {
    let mut streaks = Vec::new();
    let mut run = 0;
    for &score in scores {
        if score <= low {
            run += 1;
        } else if run > 0 {
            streaks.push(run);
            run = 0;
        }
    }
    if run > 0 {
        streaks.push(run);
    }
    streaks
}

/// Days from the start of each dip until the score is back at the median.
/// A dip still open at the end of the window is not counted.
fn recovery_times(scores: &[u8], low: u8, median: u8) -> Vec<usize> {
    let mut times = Vec::new();
    let mut dip_start: Option<usize> = None;
    for (i, &score) in scores.iter().enumerate() {
        match dip_start {
            None if score <= low => dip_start = Some(i),
            Some(start) if score >= median => {
                times.push(i - start);
                dip_start = None;
            }
            _ => {}
        }
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
    }

    fn daily(scores: &[u8]) -> Vec<EnergyEntry> {
        let first = today() - Duration::days(scores.len() as i64 - 1);
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let date = first + Duration::days(i as i64);
                EnergyEntry::new(date.format("%d.%m.%Y").to_string(), s)
            })
            .collect()
    }

    #[test]
    fn thresholds_use_nearest_rank() {
        let t = Thresholds::from_scores(&[5, 1, 4, 2, 3, 3, 4, 2, 5, 1]).unwrap();
        // sorted: 1 1 2 2 3 3 4 4 5 5
        assert_eq!(t.low, 2);
        assert_eq!(t.high, 4);
        assert_eq!(t.median, 3);
        assert!(Thresholds::from_scores(&[]).is_none());
    }

    #[test]
    fn too_few_recent_entries() {
        assert!(analyze_indexes_at(today(), &daily(&[3; 9])).is_none());

        let mut old = daily(&[3; 20]);
        for entry in old.iter_mut().take(12) {
            entry.date = "01.01.2025".to_string();
        }
        assert!(analyze_indexes_at(today(), &old).is_none());
    }

    #[test]
    fn regular_peaks_are_stable() {
        let scores = [5, 2, 3, 5, 2, 3, 5, 2, 3, 5, 2, 3];
        let indexes = analyze_indexes_at(today(), &daily(&scores)).unwrap();
        assert_eq!(indexes.low_threshold, 2);
        assert_eq!(indexes.high_threshold, 5);
        assert_eq!(indexes.median, 3);
        assert_eq!(indexes.peaks_count, 4);
        assert_eq!(indexes.peak_frequency, 3.0);
        assert_eq!(indexes.cyclicity, Cyclicity::Stable);
        assert_eq!(indexes.cyclicity_value, 0.0);
        assert_eq!(indexes.low_streaks_count, 4);
        assert_eq!(indexes.low_streak_length, 1.0);
        assert_eq!(indexes.recovery_speed, 1.0);
    }

    #[test]
    fn irregular_peaks_are_unstable() {
        let scores = [5, 5, 3, 3, 3, 3, 3, 3, 3, 5, 5, 3];
        let indexes = analyze_indexes_at(today(), &daily(&scores)).unwrap();
        // distances 1, 8, 1: mean 3.33, sd 3.30
        assert_eq!(indexes.peak_frequency, 3.3);
        assert_eq!(indexes.cyclicity, Cyclicity::Unstable);
        assert_eq!(indexes.cyclicity_value, 3.3);
    }

    #[test]
    fn uneven_peaks_are_moderate() {
        let scores = [5, 3, 5, 3, 3, 3, 5, 3, 5, 3, 3, 3, 5, 3];
        let indexes = analyze_indexes_at(today(), &daily(&scores)).unwrap();
        // distances 2, 4, 2, 4: mean 3, sd 1
        assert_eq!(indexes.high_threshold, 5);
        assert_eq!(indexes.peaks_count, 5);
        assert_eq!(indexes.peak_frequency, 3.0);
        assert_eq!(indexes.cyclicity, Cyclicity::Moderate);
        assert_eq!(indexes.cyclicity_value, 1.0);
    }

    #[test]
    fn single_gap_is_insufficient() {
        let scores = [5, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 5];
        let mut entries = daily(&scores);
        // Older history outside the window still shapes the thresholds.
        entries.extend((1..=10).map(|day| EnergyEntry::new(format!("{day:02}.01.2025"), 5)));
        let indexes = analyze_indexes_at(today(), &entries).unwrap();
        assert_eq!(indexes.high_threshold, 5);
        assert_eq!(indexes.peaks_count, 2);
        assert_eq!(indexes.peak_frequency, 11.0);
        assert_eq!(indexes.cyclicity, Cyclicity::Insufficient);
    }

    #[test]
    fn dips_and_recovery() {
        let scores = [4, 1, 1, 1, 2, 4, 4, 1, 4, 4, 4, 4];
        let indexes = analyze_indexes_at(today(), &daily(&scores)).unwrap();
        // sorted: 1 1 1 1 2 4 4 4 4 4 4 4 -> low 1, high 4, median 4
        assert_eq!(indexes.low_threshold, 1);
        assert_eq!(indexes.median, 4);
        assert_eq!(indexes.low_streaks_count, 2);
        assert_eq!(indexes.low_streak_length, 2.0);
        // dip at 1 recovers at 5 (4 days), dip at 7 recovers at 8 (1 day)
        assert_eq!(indexes.recovery_speed, 2.5);
    }

    #[test]
    fn open_dip_has_no_recovery() {
        assert_eq!(recovery_times(&[3, 1, 1, 2], 1, 3), Vec::<usize>::new());
        assert_eq!(low_streaks(&[3, 1, 1], 1), vec![2]);
    }
}
