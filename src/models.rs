use serde::{Deserialize, Serialize};

/// One daily log record as the entries service returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEntry {
    pub date: String,
    pub score: u8,
    #[serde(default)]
    pub thoughts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EnergyEntry {
    pub fn new(date: impl Into<String>, score: u8) -> Self {
        Self {
            date: date.into(),
            score,
            thoughts: String::new(),
            category: None,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Entries export as written by the entries service: `{"entries": [...]}`,
/// or just the bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EntriesFile {
    Wrapped { entries: Vec<EnergyEntry> },
    Bare(Vec<EnergyEntry>),
}

impl EntriesFile {
    pub fn into_entries(self) -> Vec<EnergyEntry> {
        match self {
            Self::Wrapped { entries } | Self::Bare(entries) => entries,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cyclicity {
    Stable,
    Moderate,
    Unstable,
    Insufficient,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub good: usize,
    pub neutral: usize,
    pub bad: usize,
    pub average: f64,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    #[serde(flatten)]
    pub stats: DerivedStats,
    pub trend: Trend,
    pub streak: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub current: DerivedStats,
    pub previous: DerivedStats,
    pub average_diff: f64,
    pub average_percent: f64,
    pub good_days_diff: i64,
    pub neutral_days_diff: i64,
    pub bad_days_diff: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    GoodStreak,
    ExcellentAverage,
    SelfCare,
    TrendUp,
    TrendDown,
    MoreBadThanGood,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnoutRisk {
    pub level: RiskLevel,
    pub days_low: usize,
    pub message: String,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekForecast {
    pub probability: u8,
    pub confidence: Confidence,
    pub trend: Trend,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestDayRecommendation {
    pub day_of_week: String,
    pub day_number: u8,
    pub reason: String,
    pub avg_energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyIndexes {
    pub peak_frequency: f64,
    pub low_streak_length: f64,
    pub recovery_speed: f64,
    pub cyclicity: Cyclicity,
    pub cyclicity_value: f64,
    pub peaks_count: usize,
    pub low_streaks_count: usize,
    pub low_threshold: u8,
    pub high_threshold: u8,
    pub median: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagStats {
    pub tag: String,
    pub label: String,
    pub avg: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagInfluence {
    pub overall_avg: f64,
    pub boosting: Vec<TagStats>,
    pub draining: Vec<TagStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub average: f64,
    pub total: usize,
    pub energy_percent: f64,
    pub goal_score: f64,
    pub goal_reached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub today: String,
    pub total_entries: usize,
    pub week: PeriodStats,
    pub month: PeriodStats,
    pub year: PeriodStats,
    pub insights: Vec<Insight>,
    pub burnout_risk: BurnoutRisk,
    pub forecast: WeekForecast,
    pub rest_day: Option<RestDayRecommendation>,
    pub indexes: Option<EnergyIndexes>,
    pub tags: Option<TagInfluence>,
    pub current_month: MonthlySummary,
}
