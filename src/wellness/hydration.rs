//! Daily hydration totals against a goal.
//!
//! The aggregator is stateless. Whether a "goal reached" notification has
//! already gone out today is the caller's business; `goal_reached_transition`
//! only says whether one particular change crossed the line.

use serde::Serialize;

use super::day::parse_day;
use super::{percent_of, CoreError, CoreResult};
use crate::models::hydration::HydrationIntake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HydrationSummary {
    pub date: String,
    pub total_ml: i64,
    pub goal_ml: i64,
    pub percentage: u8,
    pub goal_reached: bool,
}

/// Sum of `amount_ml` over the records dated `date`.
pub fn daily_total(intakes: &[HydrationIntake], date: &str) -> CoreResult<i64> {
    parse_day(date)?;

    let mut total = 0i64;
    for intake in intakes.iter().filter(|i| i.date == date) {
        if intake.amount_ml <= 0 {
            return Err(CoreError::InvalidArgument(format!(
                "intake {} has non-positive amount {}",
                intake.id, intake.amount_ml
            )));
        }
        total += intake.amount_ml as i64;
    }
    Ok(total)
}

pub fn progress_percentage(total: i64, goal: i64) -> u8 {
    percent_of(total, goal)
}

pub fn goal_reached(total: i64, goal: i64) -> bool {
    goal > 0 && total >= goal
}

/// True when a change moved the total from below the goal to at or above it.
pub fn goal_reached_transition(before: i64, after: i64, goal: i64) -> bool {
    !goal_reached(before, goal) && goal_reached(after, goal)
}

pub fn summarize(intakes: &[HydrationIntake], date: &str, goal: i64) -> CoreResult<HydrationSummary> {
    let total_ml = daily_total(intakes, date)?;
    Ok(HydrationSummary {
        date: date.to_string(),
        total_ml,
        goal_ml: goal,
        percentage: progress_percentage(total_ml, goal),
        goal_reached: goal_reached(total_ml, goal),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn intake(date: &str, amount_ml: i32) -> HydrationIntake {
        HydrationIntake {
            id: Uuid::new_v4(),
            date: date.to_string(),
            amount_ml,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn example_day_below_goal() {
        let intakes = vec![
            intake("2024-01-01", 250),
            intake("2024-01-01", 300),
            intake("2024-01-01", 500),
        ];
        let summary = summarize(&intakes, "2024-01-01", 2000).unwrap();
        assert_eq!(summary.total_ml, 1050);
        assert_eq!(summary.percentage, 53);
        assert!(!summary.goal_reached);
    }

    #[test]
    fn adding_250_moves_only_that_day() {
        let mut intakes = vec![intake("2024-01-01", 400), intake("2024-01-02", 700)];
        let before_d1 = daily_total(&intakes, "2024-01-01").unwrap();
        let before_d2 = daily_total(&intakes, "2024-01-02").unwrap();

        intakes.push(intake("2024-01-01", 250));

        assert_eq!(daily_total(&intakes, "2024-01-01").unwrap(), before_d1 + 250);
        assert_eq!(daily_total(&intakes, "2024-01-02").unwrap(), before_d2);
    }

    #[test]
    fn empty_day_totals_zero() {
        assert_eq!(daily_total(&[], "2024-01-01").unwrap(), 0);
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let intakes = vec![intake("2024-01-01", 250), intake("2024-01-01", -5)];
        assert!(matches!(
            daily_total(&intakes, "2024-01-01"),
            Err(CoreError::InvalidArgument(_))
        ));
        // Bad records on other days are not this day's problem.
        assert_eq!(daily_total(&intakes, "2024-01-02").unwrap(), 0);
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(matches!(
            daily_total(&[], "01-01-2024"),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn percentage_is_monotonic_and_clamped() {
        let mut last = 0;
        for total in (0..5000).step_by(37) {
            let pct = progress_percentage(total, 2000);
            assert!(pct >= last);
            assert!(pct <= 100);
            last = pct;
        }
        assert_eq!(progress_percentage(2000, 2000), 100);
        assert_eq!(progress_percentage(9000, 2000), 100);
    }

    #[test]
    fn zero_goal_is_benign() {
        assert_eq!(progress_percentage(1500, 0), 0);
        assert!(!goal_reached(1500, 0));
        assert!(!goal_reached(0, 0));
    }

    #[test]
    fn goal_reached_at_exact_goal() {
        assert!(goal_reached(2000, 2000));
        assert!(!goal_reached(1999, 2000));
    }

    #[test]
    fn transition_fires_once() {
        assert!(goal_reached_transition(1800, 2050, 2000));
        assert!(goal_reached_transition(1800, 2000, 2000));
        assert!(!goal_reached_transition(2050, 2300, 2000));
        assert!(!goal_reached_transition(1000, 1500, 2000));
        assert!(!goal_reached_transition(0, 500, 0));
    }
}
