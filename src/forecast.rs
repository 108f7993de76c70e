use crate::dates::chronological_scores;
use crate::models::{Confidence, EnergyEntry, Trend, WeekForecast};
use crate::stats::{mean, variance, GOOD_SCORE};

const WEEK: usize = 7;

/// Probability of a good week ahead, from how the last two weeks went.
pub fn predict_next_week(entries: &[EnergyEntry]) -> WeekForecast {
    let scores = chronological_scores(entries);
    if scores.len() < WEEK {
        return WeekForecast {
            probability: 50,
            confidence: Confidence::Low,
            trend: Trend::Stable,
            message: "Not enough data for a forecast yet".to_string(),
        };
    }

    let last14 = &scores[scores.len().saturating_sub(2 * WEEK)..];
    let last_week = &last14[last14.len() - WEEK..];
    let prev_week = if last14.len() == 2 * WEEK {
        &last14[..WEEK]
    } else {
        last_week
    };

    let good = |week: &[u8]| week.iter().filter(|&&s| s >= GOOD_SCORE).count();
    let last_good = good(last_week);
    let prev_good = good(prev_week);
    let trend = match last_good.cmp(&prev_good) {
        std::cmp::Ordering::Greater => Trend::Up,
        std::cmp::Ordering::Less => Trend::Down,
        std::cmp::Ordering::Equal => Trend::Stable,
    };

    let last_avg = mean(last_week);
    let mut probability = last_good as f64 / last_week.len() as f64 * 100.0;
    if last_avg >= 4.5 {
        probability = probability.max(85.0);
    } else if last_avg >= 4.0 {
        probability = probability.max(75.0);
    } else if last_avg >= 3.5 {
        probability = probability.max(65.0);
    }
    match trend {
        Trend::Up => probability += 10.0,
        Trend::Down => probability -= 15.0,
        Trend::Stable => {}
    }
    let probability = probability.clamp(10.0, 95.0);

    let last28: Vec<f64> = scores[scores.len().saturating_sub(4 * WEEK)..]
        .iter()
        .map(|&s| f64::from(s))
        .collect();
    let spread = variance(&last28);
    let confidence = if spread < 0.5 {
        Confidence::High
    } else if spread < 1.2 {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    let percent = probability.round() as u8;
    let message = if probability >= 75.0 && trend == Trend::Up {
        format!("Great outlook: the trend is rising, {percent}% chance of a good week")
    } else if probability >= 70.0 {
        format!("Strong odds: {percent}% chance of a good week")
    } else if probability >= 50.0 {
        format!("Decent odds: about {percent}% chance of a good week")
    } else if trend == Trend::Down {
        format!("Energy is dropping: {percent}% chance of a good week. Plan some recovery")
    } else {
        "The outlook is unsettled: focusing on rest will improve your chances".to_string()
    };

    WeekForecast {
        probability: percent,
        confidence,
        trend,
        message,
    }
}
