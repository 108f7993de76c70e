use crate::filter::window;
use crate::models::{EnergyEntry, TagInfluence, TagStats};
use crate::stats::round1;
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use std::str::FromStr;

const WINDOW_DAYS: u32 = 14;
const MIN_USES: usize = 2;
const TOP: usize = 3;

/// The fixed tag vocabulary offered by the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Work,
    Family,
    Sport,
    Sleep,
    Hobby,
    Social,
    Study,
    Health,
}

impl Tag {
    pub const ALL: [Tag; 8] = [
        Tag::Work,
        Tag::Family,
        Tag::Sport,
        Tag::Sleep,
        Tag::Hobby,
        Tag::Social,
        Tag::Study,
        Tag::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Family => "family",
            Self::Sport => "sport",
            Self::Sleep => "sleep",
            Self::Hobby => "hobby",
            Self::Social => "social",
            Self::Study => "study",
            Self::Health => "health",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Family => "Family",
            Self::Sport => "Sport",
            Self::Sleep => "Sleep",
            Self::Hobby => "Hobby",
            Self::Social => "Social",
            Self::Study => "Study",
            Self::Health => "Health",
        }
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tag '{s}'"))
    }
}

pub fn analyze_tags(entries: &[EnergyEntry]) -> Option<TagInfluence> {
    analyze_tags_at(Local::now().date_naive(), entries)
}

/// Tags whose days run above (boosting) or below (draining) the two-week mean.
pub fn analyze_tags_at(today: NaiveDate, entries: &[EnergyEntry]) -> Option<TagInfluence> {
    let recent = window(entries, WINDOW_DAYS, today);
    if recent.is_empty() {
        return None;
    }

    let overall = recent.iter().map(|e| f64::from(e.score)).sum::<f64>() / recent.len() as f64;

    let mut totals: BTreeMap<String, (u32, usize)> = BTreeMap::new();
    for entry in &recent {
        for tag in &entry.tags {
            let slot = totals.entry(tag.trim().to_lowercase()).or_default();
            slot.0 += u32::from(entry.score);
            slot.1 += 1;
        }
    }

    let stats: Vec<TagStats> = totals
        .into_iter()
        .filter(|(_, (_, count))| *count >= MIN_USES)
        .map(|(tag, (sum, count))| TagStats {
            label: tag
                .parse::<Tag>()
                .map(|known| known.label().to_string())
                .unwrap_or_else(|_| tag.clone()),
            avg: round1(f64::from(sum) / count as f64),
            tag,
            count,
        })
        .collect();

    let mut boosting: Vec<TagStats> = stats.iter().filter(|t| t.avg > overall).cloned().collect();
    boosting.sort_by(|a, b| b.avg.total_cmp(&a.avg));
    boosting.truncate(TOP);

    let mut draining: Vec<TagStats> = stats.into_iter().filter(|t| t.avg < overall).collect();
    draining.sort_by(|a, b| a.avg.total_cmp(&b.avg));
    draining.truncate(TOP);

    if boosting.is_empty() && draining.is_empty() {
        return None;
    }

    Some(TagInfluence {
        overall_avg: round1(overall),
        boosting,
        draining,
    })
}
