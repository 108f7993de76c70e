//! Analytics for a daily energy log: period statistics, trends, burnout risk,
//! week-ahead forecasts, rest-day suggestions and personal cyclicity indexes.
//!
//! Every analysis is a pure function of the entry list and, where it looks at
//! recent days, an explicit `today`.

pub mod commands;
pub mod config;
pub mod dates;
pub mod errors;
pub mod filter;
pub mod forecast;
pub mod goal;
pub mod indexes;
pub mod models;
pub mod report;
pub mod rest_day;
pub mod risk;
pub mod stats;
pub mod storage;
pub mod tags;

pub use config::Config;
pub use dates::parse_entry_date;
pub use filter::{filter_by_last_n_days, filter_by_range, Period};
pub use forecast::predict_next_week;
pub use indexes::analyze_indexes_at;
pub use models::EnergyEntry;
pub use report::{build_report, build_report_at};
pub use rest_day::recommend_rest_day;
pub use risk::analyze_burnout_risk;
pub use stats::{aggregate, classify_trend, current_streak};
pub use storage::load_entries;
