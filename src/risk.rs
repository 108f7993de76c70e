//! Burnout risk from the most recent week of entries.
//!
//! Rules are checked from most to least severe and the first match wins:
//! a long trailing run of low days or a very low weekly average is critical,
//! frequent low days are high, any sign of decline is medium, the rest is low.

use crate::dates::chronological_scores;
use crate::models::{BurnoutRisk, EnergyEntry, RiskLevel};
use crate::stats::{mean, LOW_SCORE};
use tracing::debug;

const WINDOW: usize = 7;
const MIN_ENTRIES: usize = 3;

pub fn analyze_burnout_risk(entries: &[EnergyEntry]) -> BurnoutRisk {
    let scores = chronological_scores(entries);
    if scores.len() < MIN_ENTRIES {
        return risk(
            RiskLevel::Low,
            0,
            "Not enough data for analysis yet".to_string(),
            "text-muted-foreground",
            "Info",
        );
    }

    let last7 = &scores[scores.len().saturating_sub(WINDOW)..];
    let consecutive_low = last7.iter().rev().take_while(|&&s| s < LOW_SCORE).count();
    let low_count = last7.iter().filter(|&&s| s < LOW_SCORE).count();
    let avg7 = mean(last7);
    debug!(consecutive_low, low_count, avg7, "burnout inputs");

    if consecutive_low >= 5 || avg7 < 2.5 {
        return risk(
            RiskLevel::Critical,
            consecutive_low,
            format!(
                "Critical level: {consecutive_low} low-energy days in a row. You need rest urgently."
            ),
            "text-destructive",
            "AlertTriangle",
        );
    }

    if consecutive_low >= 3 || low_count >= 4 {
        return risk(
            RiskLevel::High,
            consecutive_low,
            format!("High burnout risk: {low_count} low-energy days this week. Plan some rest."),
            "text-orange-600",
            "AlertCircle",
        );
    }

    if consecutive_low >= 2 || low_count >= 2 || avg7 < 3.5 {
        return risk(
            RiskLevel::Medium,
            consecutive_low,
            "Medium risk: energy is slipping, a good moment to look after yourself.".to_string(),
            "text-yellow-600",
            "Info",
        );
    }

    let message = if avg7 >= 4.0 {
        "Excellent: energy is high and burnout risk is minimal."
    } else {
        "All good: energy is stable and burnout risk is low."
    };
    risk(RiskLevel::Low, 0, message.to_string(), "text-energy-excellent", "CheckCircle2")
}

fn risk(level: RiskLevel, days_low: usize, message: String, color: &str, icon: &str) -> BurnoutRisk {
    BurnoutRisk {
        level,
        days_low,
        message,
        color: color.to_string(),
        icon: icon.to_string(),
    }
}
