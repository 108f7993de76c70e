use crate::dates::{chronological_scores, sort_chronologically};
use crate::filter::{filter_by_period, filter_by_range, Period};
use crate::models::{
    DerivedStats, EnergyEntry, Insight, InsightKind, PeriodComparison, PeriodStats, Trend,
};
use chrono::{Duration, Local, NaiveDate};

/// Scores at or above this count as a good day.
pub const GOOD_SCORE: u8 = 4;
/// Scores below this count as a low-energy day.
pub const LOW_SCORE: u8 = 3;

const TREND_DEADBAND: f64 = 0.2;

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn mean(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64
}

/// Population variance; 0 for an empty slice.
pub(crate) fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64
}

pub fn aggregate(entries: &[EnergyEntry]) -> DerivedStats {
    let scores: Vec<u8> = entries.iter().map(|e| e.score).collect();
    aggregate_scores(&scores)
}

fn aggregate_scores(scores: &[u8]) -> DerivedStats {
    DerivedStats {
        good: scores.iter().filter(|&&s| s >= GOOD_SCORE).count(),
        neutral: scores.iter().filter(|&&s| s == 3).count(),
        bad: scores.iter().filter(|&&s| s <= 2).count(),
        average: round1(mean(scores)),
        total: scores.len(),
    }
}

pub fn classify_trend(entries: &[EnergyEntry]) -> Trend {
    trend_of_scores(&chronological_scores(entries))
}

pub(crate) fn trend_of_scores(scores: &[u8]) -> Trend {
    if scores.len() < 2 {
        return Trend::Stable;
    }

    let (first, second) = scores.split_at(scores.len() / 2);
    let diff = mean(second) - mean(first);
    if diff > TREND_DEADBAND {
        Trend::Up
    } else if diff < -TREND_DEADBAND {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Number of most recent entries in a row that satisfy `predicate`.
pub fn current_streak<F>(entries: &[EnergyEntry], predicate: F) -> usize
where
    F: Fn(&EnergyEntry) -> bool,
{
    sort_chronologically(entries)
        .into_iter()
        .rev()
        .take_while(|entry| predicate(entry))
        .count()
}

pub fn good_streak(entries: &[EnergyEntry]) -> usize {
    current_streak(entries, |entry| entry.score >= GOOD_SCORE)
}

pub fn low_streak(entries: &[EnergyEntry]) -> usize {
    current_streak(entries, |entry| entry.score < LOW_SCORE)
}

pub fn period_stats(entries: &[EnergyEntry], period: Period) -> PeriodStats {
    period_stats_at(Local::now().date_naive(), entries, period)
}

pub fn period_stats_at(today: NaiveDate, entries: &[EnergyEntry], period: Period) -> PeriodStats {
    let filtered = filter_by_period(entries, period, today);
    if filtered.is_empty() {
        return PeriodStats {
            stats: DerivedStats::default(),
            trend: Trend::Stable,
            streak: 0,
        };
    }

    PeriodStats {
        stats: aggregate(&filtered),
        trend: classify_trend(&filtered),
        streak: good_streak(entries),
    }
}

pub fn insights(stats: &PeriodStats) -> Vec<Insight> {
    let mut out = Vec::new();
    let mut push = |kind, message: String| out.push(Insight { kind, message });

    if stats.streak >= 3 {
        push(
            InsightKind::GoodStreak,
            format!("Great run: {} good days in a row", stats.streak),
        );
    }

    if stats.stats.average >= 4.5 {
        push(InsightKind::ExcellentAverage, "Outstanding energy level".to_string());
    } else if stats.stats.total > 0 && stats.stats.average <= 2.5 {
        push(InsightKind::SelfCare, "Time to take care of yourself".to_string());
    }

    match stats.trend {
        Trend::Up => push(InsightKind::TrendUp, "Energy is rising".to_string()),
        Trend::Down => push(InsightKind::TrendDown, "Keep an eye on the downward trend".to_string()),
        Trend::Stable => {}
    }

    if stats.stats.bad > stats.stats.good {
        push(InsightKind::MoreBadThanGood, "More low days than good ones: go easy on yourself".to_string());
    }

    out
}

/// Compares `[start, end]` with the window of the same length right before it.
pub fn compare_periods(entries: &[EnergyEntry], start: NaiveDate, end: NaiveDate) -> PeriodComparison {
    let span = (end - start) + Duration::days(1);

    let current_scores: Vec<u8> = filter_by_range(entries, start, end)
        .iter()
        .map(|e| e.score)
        .collect();
    // Nothing precedes a range that starts at the earliest date.
    let previous_scores: Vec<u8> = match start.pred_opt() {
        Some(previous_end) => {
            let previous_start = start.checked_sub_signed(span).unwrap_or(NaiveDate::MIN);
            filter_by_range(entries, previous_start, previous_end)
                .iter()
                .map(|e| e.score)
                .collect()
        }
        None => Vec::new(),
    };

    let current = aggregate_scores(&current_scores);
    let previous = aggregate_scores(&previous_scores);

    let current_avg = mean(&current_scores);
    let previous_avg = mean(&previous_scores);
    let average_diff = current_avg - previous_avg;
    let average_percent = if previous_avg > 0.0 {
        average_diff / previous_avg * 100.0
    } else {
        0.0
    };

    PeriodComparison {
        average_diff: round1(average_diff),
        average_percent: round1(average_percent),
        good_days_diff: current.good as i64 - previous.good as i64,
        neutral_days_diff: current.neutral as i64 - previous.neutral as i64,
        bad_days_diff: current.bad as i64 - previous.bad as i64,
        current,
        previous,
    }
}
