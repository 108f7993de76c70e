//! Runtime configuration.
//!
//! Resolved in order: built-in defaults, then an optional TOML file named by
//! `ENERGY_CONFIG`, then individual environment variables. Command-line flags
//! are applied last by the binary.

use crate::errors::AppError;
use crate::goal::DEFAULT_MONTHLY_GOAL;
use serde::Deserialize;
use std::{env, fs, path::PathBuf};

pub const CONFIG_PATH_VAR: &str = "ENERGY_CONFIG";
pub const DATA_PATH_VAR: &str = "ENERGY_DATA_PATH";
pub const GOAL_VAR: &str = "ENERGY_MONTHLY_GOAL";
pub const LOG_VAR: &str = "ENERGY_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Entries export to analyse.
    pub data_path: PathBuf,
    /// Monthly average the user aims for, 1-5.
    pub monthly_goal: f64,
    /// Default tracing directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/entries.json"),
            monthly_goal: DEFAULT_MONTHLY_GOAL,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    data_path: Option<PathBuf>,
    monthly_goal: Option<f64>,
    log_level: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// Same as [`Config::load`] with a custom variable lookup.
    pub fn load_with<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = var(CONFIG_PATH_VAR) {
            let text = fs::read_to_string(&path).map_err(|err| {
                AppError::bad_request(format!("failed to read config file {path}: {err}"))
            })?;
            let file: FileConfig = toml::from_str(&text).map_err(|err| {
                AppError::bad_request(format!("failed to parse config file {path}: {err}"))
            })?;
            if let Some(data_path) = file.data_path {
                config.data_path = data_path;
            }
            if let Some(goal) = file.monthly_goal {
                config.set_monthly_goal(goal)?;
            }
            if let Some(level) = file.log_level {
                config.log_level = level;
            }
        }

        if let Some(path) = var(DATA_PATH_VAR) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(goal) = var(GOAL_VAR) {
            let goal = goal
                .trim()
                .parse::<f64>()
                .map_err(|_| AppError::bad_request(format!("{GOAL_VAR} must be a number, got '{goal}'")))?;
            config.set_monthly_goal(goal)?;
        }
        if let Some(level) = var(LOG_VAR) {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn set_monthly_goal(&mut self, goal: f64) -> Result<(), AppError> {
        if !(1.0..=5.0).contains(&goal) {
            return Err(AppError::bad_request(format!(
                "monthly goal must be between 1 and 5, got {goal}"
            )));
        }
        self.monthly_goal = goal;
        Ok(())
    }
}
