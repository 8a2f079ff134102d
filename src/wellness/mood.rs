//! Mood scale and trend aggregation.

use serde::{Deserialize, Serialize};

use super::day::{days_before, parse_day};
use super::{CoreError, CoreResult};
use crate::models::mood::MoodEntry;

/// Five-point mood scale, stored and serialized as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum Mood {
    Awful = 1,
    Bad = 2,
    Okay = 3,
    Good = 4,
    Great = 5,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Awful, Mood::Bad, Mood::Okay, Mood::Good, Mood::Great];

    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Awful => "Awful",
            Mood::Bad => "Bad",
            Mood::Okay => "Okay",
            Mood::Good => "Good",
            Mood::Great => "Great",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Awful => "😢",
            Mood::Bad => "😕",
            Mood::Okay => "😐",
            Mood::Good => "🙂",
            Mood::Great => "😄",
        }
    }
}

impl TryFrom<i32> for Mood {
    type Error = CoreError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Mood::ALL
            .into_iter()
            .find(|m| m.value() == value)
            .ok_or_else(|| CoreError::InvalidArgument(format!("mood must be 1-5, got {value}")))
    }
}

impl From<Mood> for i32 {
    fn from(mood: Mood) -> Self {
        mood.value()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTrendPoint {
    pub date: String,
    /// Day average shifted from `1..=5` to `-2..=2`; `None` without entries.
    pub centered_average: Option<f64>,
    pub entries: usize,
}

pub const MAX_TREND_DAYS: u32 = 31;

/// Per-day mood averages for the `days` days ending at `today`, oldest first.
pub fn trend(entries: &[MoodEntry], today: &str, days: u32) -> CoreResult<Vec<MoodTrendPoint>> {
    if days == 0 || days > MAX_TREND_DAYS {
        return Err(CoreError::InvalidArgument(format!(
            "trend window must be 1-{MAX_TREND_DAYS} days, got {days}"
        )));
    }
    let today = parse_day(today)?;

    let points = (0..days as i64)
        .rev()
        .map(|n| {
            let date = days_before(today, n);
            let values: Vec<i32> = entries
                .iter()
                .filter(|e| e.date == date)
                .map(|e| e.mood.value())
                .collect();
            let centered_average = if values.is_empty() {
                None
            } else {
                let avg = values.iter().sum::<i32>() as f64 / values.len() as f64;
                Some(avg - 3.0)
            };
            MoodTrendPoint {
                date,
                centered_average,
                entries: values.len(),
            }
        })
        .collect();
    Ok(points)
}

/// Entries dated within the 7 days ending at `today`, inclusive of both ends.
pub fn count_last_week(entries: &[MoodEntry], today: &str) -> CoreResult<usize> {
    let today = parse_day(today)?;
    let week_ago = days_before(today, 7);
    let today = days_before(today, 0);
    Ok(entries
        .iter()
        .filter(|e| e.date.as_str() >= week_ago.as_str() && e.date.as_str() <= today.as_str())
        .count())
}

/// Most recent entry on `date` by timestamp.
pub fn latest_on<'a>(entries: &'a [MoodEntry], date: &str) -> Option<&'a MoodEntry> {
    entries
        .iter()
        .filter(|e| e.date == date)
        .max_by_key(|e| e.timestamp)
}
