use crate::dates::parse_entry_date;
use crate::models::{EnergyEntry, RestDayRecommendation};
use crate::stats::round1;
use chrono::Datelike;

const MIN_ENTRIES: usize = 14;
const MIN_SAMPLES_PER_DAY: u32 = 2;
const RECOMMEND_BELOW: f64 = 3.5;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Copy, Default)]
struct DayTotals {
    sum: u32,
    count: u32,
}

impl DayTotals {
    fn average(self) -> f64 {
        f64::from(self.sum) / f64::from(self.count)
    }
}

/// Suggests the historically weakest weekday as a planned recovery day.
pub fn recommend_rest_day(entries: &[EnergyEntry]) -> Option<RestDayRecommendation> {
    if entries.len() < MIN_ENTRIES {
        return None;
    }

    let mut days = [DayTotals::default(); 7];
    for entry in entries {
        let Some(date) = parse_entry_date(&entry.date) else {
            continue;
        };
        let slot = &mut days[date.weekday().num_days_from_sunday() as usize];
        slot.sum += u32::from(entry.score);
        slot.count += 1;
    }

    let mut worst: Option<(usize, DayTotals)> = None;
    for (day, totals) in days.iter().enumerate() {
        if totals.count < MIN_SAMPLES_PER_DAY {
            continue;
        }
        if worst.is_none_or(|(_, current)| totals.average() < current.average()) {
            worst = Some((day, *totals));
        }
    }

    let (day, totals) = worst?;
    let average = totals.average();
    if average >= RECOMMEND_BELOW {
        return None;
    }

    Some(RestDayRecommendation {
        day_of_week: DAY_NAMES[day].to_string(),
        day_number: day as u8,
        reason: reason_for(average, totals.count).to_string(),
        avg_energy: round1(average),
    })
}

fn reason_for(average: f64, samples: u32) -> &'static str {
    if average < 2.5 {
        "Energy on this day is consistently low"
    } else if samples >= 4 {
        "The same fatigue pattern keeps coming back"
    } else {
        "Your body needs time to recover"
    }
}
