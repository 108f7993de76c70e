use crate::config::Config;
use crate::filter::Period;
use crate::forecast::predict_next_week;
use crate::goal::monthly_summary;
use crate::indexes::analyze_indexes_at;
use crate::models::{EnergyEntry, Report};
use crate::rest_day::recommend_rest_day;
use crate::risk::analyze_burnout_risk;
use crate::stats::{insights, period_stats_at};
use crate::tags::analyze_tags_at;
use chrono::{Datelike, Local, NaiveDate};

pub fn build_report(entries: &[EnergyEntry], config: &Config) -> Report {
    build_report_at(Local::now().date_naive(), entries, config)
}

/// Every analysis for one day, computed from scratch.
pub fn build_report_at(today: NaiveDate, entries: &[EnergyEntry], config: &Config) -> Report {
    let week = period_stats_at(today, entries, Period::Week);
    let month = period_stats_at(today, entries, Period::Month);
    let year = period_stats_at(today, entries, Period::Year);

    Report {
        today: today.to_string(),
        total_entries: entries.len(),
        insights: insights(&week),
        burnout_risk: analyze_burnout_risk(entries),
        forecast: predict_next_week(entries),
        rest_day: recommend_rest_day(entries),
        indexes: analyze_indexes_at(today, entries),
        tags: analyze_tags_at(today, entries),
        current_month: monthly_summary(entries, today.year(), today.month(), config.monthly_goal),
        week,
        month,
        year,
    }
}
