//! Habit streaks and per-habit daily progress.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::day::parse_day;
use super::{percent_of, CoreResult};
use crate::models::habit::{Habit, HabitProgress};

/// Completed calendar days for one habit.
///
/// Every record belonging to the habit has its date validated, completed or
/// not, so a malformed history fails instead of silently shortening a streak.
fn completed_days(habit_id: Uuid, records: &[HabitProgress]) -> CoreResult<BTreeSet<NaiveDate>> {
    let mut days = BTreeSet::new();
    for record in records.iter().filter(|r| r.habit_id == habit_id) {
        let day = parse_day(&record.date)?;
        if record.is_completed {
            days.insert(day);
        }
    }
    Ok(days)
}

/// Consecutive completed days ending at `today`.
///
/// Today itself must be completed for the streak to be non-zero. The walk
/// has no lookback bound and stops at the first missing or incomplete day.
pub fn current_streak(habit_id: Uuid, records: &[HabitProgress], today: &str) -> CoreResult<u32> {
    let today = parse_day(today)?;
    let days = completed_days(habit_id, records)?;

    let mut streak = 0u32;
    let mut check = today;
    while days.contains(&check) {
        streak += 1;
        check -= Duration::days(1);
    }
    Ok(streak)
}

/// Longest run of consecutive completed days anywhere in the history.
pub fn longest_streak(habit_id: Uuid, records: &[HabitProgress]) -> CoreResult<u32> {
    let days = completed_days(habit_id, records)?;

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for day in days {
        run = match prev {
            Some(p) if day == p + Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    Ok(longest)
}

/// Highest current streak among active habits, 0 when there are none.
pub fn best_current_streak(
    habits: &[Habit],
    records: &[HabitProgress],
    today: &str,
) -> CoreResult<u32> {
    let mut best = 0;
    for habit in habits.iter().filter(|h| h.is_active) {
        best = best.max(current_streak(habit.id, records, today)?);
    }
    Ok(best)
}

pub fn is_completed(current_value: i32, target_value: i32) -> bool {
    target_value > 0 && current_value >= target_value
}

pub fn progress_percentage(current_value: i32, target_value: i32) -> u8 {
    percent_of(current_value as i64, target_value as i64)
}
