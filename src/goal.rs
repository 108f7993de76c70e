use crate::filter::filter_by_month;
use crate::models::{EnergyEntry, MonthlySummary};
use crate::stats::{aggregate, round1};

pub const DEFAULT_MONTHLY_GOAL: f64 = 4.0;

/// Calendar-month average measured against the user's monthly goal score.
pub fn monthly_summary(entries: &[EnergyEntry], year: i32, month: u32, goal_score: f64) -> MonthlySummary {
    let stats = aggregate(&filter_by_month(entries, year, month));
    let energy_percent = if stats.total > 0 {
        round1(stats.average / 5.0 * 100.0)
    } else {
        0.0
    };

    MonthlySummary {
        year,
        month,
        average: stats.average,
        total: stats.total,
        energy_percent,
        goal_score,
        goal_reached: stats.total > 0 && stats.average >= goal_score,
    }
}
