use crate::config::Config;
use crate::dates::parse_entry_date;
use crate::errors::AppError;
use crate::filter::{filter_by_range, Period};
use crate::forecast::predict_next_week;
use crate::goal::monthly_summary;
use crate::indexes::analyze_indexes_at;
use crate::models::{DerivedStats, EnergyEntry, Trend};
use crate::report::build_report_at;
use crate::rest_day::recommend_rest_day;
use crate::risk::analyze_burnout_risk;
use crate::stats::{aggregate, classify_trend, compare_periods, insights, period_stats_at};
use crate::tags::analyze_tags_at;
use chrono::{Datelike, NaiveDate};
use clap::Subcommand;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Every analysis in one document
    Report,
    /// Good/neutral/bad counts and average for a period or date range
    Stats {
        /// 3days, week, month or year
        #[arg(long, default_value = "week", conflicts_with_all = ["from", "to"])]
        period: String,
        /// Range start (DD.MM.YYYY or YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Range end, inclusive
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
    /// Trend direction for a period
    Trend {
        #[arg(long, default_value = "month")]
        period: String,
    },
    /// Burnout risk from the last seven entries
    Burnout,
    /// Chance of a good week ahead
    Forecast,
    /// Weekday that most needs a planned rest
    RestDay,
    /// Peak, dip and recovery indexes over the last 30 days
    Indexes,
    /// Tags that lift or drain energy over the last 14 days
    Tags,
    /// Calendar month average against the monthly goal
    Month {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Compare a date range with the equally long range before it
    Compare {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Short observations about the last week
    Insights,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Stats { .. } => "stats",
            Self::Trend { .. } => "trend",
            Self::Burnout => "burnout",
            Self::Forecast => "forecast",
            Self::RestDay => "rest-day",
            Self::Indexes => "indexes",
            Self::Tags => "tags",
            Self::Month { .. } => "month",
            Self::Compare { .. } => "compare",
            Self::Insights => "insights",
        }
    }
}

#[derive(Debug, Serialize)]
struct TrendResponse {
    period: Period,
    trend: Trend,
}

#[derive(Debug, Serialize)]
struct RangeStatsResponse {
    from: String,
    to: String,
    #[serde(flatten)]
    stats: DerivedStats,
    trend: Trend,
}

/// Runs one command against an already-loaded history.
pub fn run(
    command: &Command,
    entries: &[EnergyEntry],
    today: NaiveDate,
    config: &Config,
) -> Result<Value, AppError> {
    info!(command = command.name(), entries = entries.len(), %today, "running analysis");

    let value = match command {
        Command::Report => to_value(build_report_at(today, entries, config))?,
        Command::Stats { period, from, to } => match (from, to) {
            (Some(from), Some(to)) => {
                let (start, end) = date_range(from, to)?;
                let selected = filter_by_range(entries, start, end);
                to_value(RangeStatsResponse {
                    from: start.to_string(),
                    to: end.to_string(),
                    stats: aggregate(&selected),
                    trend: classify_trend(&selected),
                })?
            }
            _ => to_value(period_stats_at(today, entries, parse_period(period)?))?,
        },
        Command::Trend { period } => {
            let period = parse_period(period)?;
            let stats = period_stats_at(today, entries, period);
            to_value(TrendResponse {
                period,
                trend: stats.trend,
            })?
        }
        Command::Burnout => to_value(analyze_burnout_risk(entries))?,
        Command::Forecast => to_value(predict_next_week(entries))?,
        Command::RestDay => to_value(recommend_rest_day(entries))?,
        Command::Indexes => to_value(analyze_indexes_at(today, entries))?,
        Command::Tags => to_value(analyze_tags_at(today, entries))?,
        Command::Month { year, month } => {
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            if !(1..=12).contains(&month) {
                return Err(AppError::bad_request(format!("month must be 1-12, got {month}")));
            }
            to_value(monthly_summary(entries, year, month, config.monthly_goal))?
        }
        Command::Compare { from, to } => {
            let (start, end) = date_range(from, to)?;
            to_value(compare_periods(entries, start, end))?
        }
        Command::Insights => to_value(insights(&period_stats_at(today, entries, Period::Week)))?,
    };

    Ok(value)
}

fn to_value<T: Serialize>(value: T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(value)?)
}

pub fn parse_date_arg(text: &str) -> Result<NaiveDate, AppError> {
    parse_entry_date(text).ok_or_else(|| {
        AppError::bad_request(format!("invalid date '{text}', expected DD.MM.YYYY or YYYY-MM-DD"))
    })
}

fn date_range(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = parse_date_arg(from)?;
    let end = parse_date_arg(to)?;
    if end < start {
        return Err(AppError::bad_request(format!("range end {end} is before start {start}")));
    }
    Ok((start, end))
}

fn parse_period(text: &str) -> Result<Period, AppError> {
    text.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
    }

    fn history() -> Vec<EnergyEntry> {
        (0..20)
            .map(|offset| {
                let date = today() - Duration::days(offset);
                EnergyEntry::new(date.format("%d.%m.%Y").to_string(), if offset < 10 { 4 } else { 2 })
            })
            .collect()
    }

    fn run_ok(command: Command) -> Value {
        run(&command, &history(), today(), &Config::default()).unwrap()
    }

    #[test]
    fn stats_for_named_period() {
        let value = run_ok(Command::Stats {
            period: "week".to_string(),
            from: None,
            to: None,
        });
        assert_eq!(value["total"], 7);
        assert_eq!(value["good"], 7);
        assert_eq!(value["streak"], 10);
    }

    #[test]
    fn stats_for_explicit_range() {
        let value = run_ok(Command::Stats {
            period: "week".to_string(),
            from: Some("2026-02-09".to_string()),
            to: Some("28.02.2026".to_string()),
        });
        assert_eq!(value["total"], 20);
        assert_eq!(value["trend"], "up");
        assert_eq!(value["from"], "2026-02-09");
    }

    #[test]
    fn rejects_bad_arguments() {
        let entries = history();
        let config = Config::default();

        let err = run(&Command::Trend { period: "decade".to_string() }, &entries, today(), &config)
            .unwrap_err();
        assert_eq!(err.kind, crate::errors::ErrorKind::InvalidInput);

        let err = run(
            &Command::Compare { from: "2026-02-20".to_string(), to: "2026-02-10".to_string() },
            &entries,
            today(),
            &config,
        )
        .unwrap_err();
        assert!(err.message.contains("before start"));

        let err = run(&Command::Month { year: None, month: Some(13) }, &entries, today(), &config)
            .unwrap_err();
        assert!(err.message.contains("1-12"));
    }

    #[test]
    fn optional_results_serialize_as_null() {
        let value = run(&Command::RestDay, &[], today(), &Config::default()).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn month_defaults_to_current() {
        let value = run_ok(Command::Month { year: None, month: None });
        assert_eq!(value["year"], 2026);
        assert_eq!(value["month"], 2);
        assert_eq!(value["total"], 20);
        assert_eq!(value["goalScore"], 4.0);
    }

    #[test]
    fn compare_and_trend() {
        let value = run_ok(Command::Compare {
            from: "19.02.2026".to_string(),
            to: "28.02.2026".to_string(),
        });
        assert_eq!(value["averageDiff"], 2.0);
        assert_eq!(value["goodDaysDiff"], 10);

        let value = run_ok(Command::Trend { period: "month".to_string() });
        assert_eq!(value["trend"], "up");
        assert_eq!(value["period"], "month");
    }
}
