//! Hydration reminder cadence.
//!
//! Computes *when* reminders belong on a given day. Registering them with
//! anything that actually fires is left to a `ReminderDispatcher`.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::day::{format_day, parse_day};
use super::{CoreError, CoreResult};
use crate::models::hydration::HydrationSettings;

/// How a day's reminder sequence is handed to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    Recurring,
    OneShot,
}

impl std::str::FromStr for DeliveryMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recurring" => Ok(Self::Recurring),
            "one_shot" => Ok(Self::OneShot),
            other => Err(CoreError::InvalidConfiguration(format!(
                "unknown reminder mode {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderPlan {
    Disabled,
    Recurring {
        first_fire: NaiveDateTime,
        interval_minutes: i32,
    },
    OneShots(Vec<NaiveDateTime>),
}

fn check_settings(settings: &HydrationSettings) -> CoreResult<()> {
    if settings.reminder_interval_minutes <= 0 {
        return Err(CoreError::InvalidConfiguration(format!(
            "reminder interval must be positive, got {}",
            settings.reminder_interval_minutes
        )));
    }
    if !(0..=23).contains(&settings.start_time) || !(0..=23).contains(&settings.end_time) {
        return Err(CoreError::InvalidConfiguration(format!(
            "reminder hours must be 0-23, got {}..{}",
            settings.start_time, settings.end_time
        )));
    }
    if !(0..=59).contains(&settings.start_minute) {
        return Err(CoreError::InvalidConfiguration(format!(
            "reminder start minute must be 0-59, got {}",
            settings.start_minute
        )));
    }
    Ok(())
}

/// Reminder timestamps for `date`, in order.
///
/// Starts at `start_time:start_minute` and steps by the interval while the
/// time of day is at most `end_time:59`. Disabled settings give an empty
/// sequence before anything else is checked. A start hour after the end
/// hour is an empty window; it never wraps past midnight.
pub fn schedule_for_day(settings: &HydrationSettings, date: &str) -> CoreResult<Vec<NaiveDateTime>> {
    if !settings.reminder_enabled {
        return Ok(Vec::new());
    }
    check_settings(settings)?;
    let day = parse_day(date)?;

    if settings.start_time > settings.end_time {
        return Ok(Vec::new());
    }

    let midnight = day.and_time(NaiveTime::MIN);
    let window_end = i64::from(settings.end_time) * 60 + 59;
    let interval = i64::from(settings.reminder_interval_minutes);
    let mut minute = i64::from(settings.start_time) * 60 + i64::from(settings.start_minute);

    // Minutes within one day, so stepping in i64 cannot overflow.
    let mut reminders = Vec::new();
    while minute <= window_end {
        reminders.push(midnight + Duration::minutes(minute));
        minute += interval;
    }
    Ok(reminders)
}

/// First reminder of `now`'s day strictly after `now`.
pub fn next_reminder(settings: &HydrationSettings, now: NaiveDateTime) -> CoreResult<Option<NaiveDateTime>> {
    let today = format_day(now.date());
    Ok(schedule_for_day(settings, &today)?
        .into_iter()
        .find(|t| *t > now))
}

/// Turn the rest of today's schedule into something a dispatcher can register.
///
/// `Recurring` anchors on the next upcoming reminder; with nothing left
/// today it anchors on tomorrow's first one. `OneShots` only carries the
/// reminders still ahead of `now`.
pub fn plan(settings: &HydrationSettings, now: NaiveDateTime, mode: DeliveryMode) -> CoreResult<ReminderPlan> {
    let today = format_day(now.date());
    let schedule = schedule_for_day(settings, &today)?;
    if schedule.is_empty() {
        return Ok(ReminderPlan::Disabled);
    }

    let upcoming: Vec<NaiveDateTime> = schedule.iter().copied().filter(|t| *t > now).collect();

    Ok(match mode {
        DeliveryMode::OneShot => ReminderPlan::OneShots(upcoming),
        DeliveryMode::Recurring => {
            let first_fire = match upcoming.first() {
                Some(t) => *t,
                None => schedule[0] + Duration::days(1),
            };
            ReminderPlan::Recurring {
                first_fire,
                interval_minutes: settings.reminder_interval_minutes,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(start: i32, interval: i32, end: i32, enabled: bool) -> HydrationSettings {
        HydrationSettings {
            daily_goal_ml: 2000,
            reminder_enabled: enabled,
            reminder_interval_minutes: interval,
            start_time: start,
            start_minute: 0,
            end_time: end,
        }
    }

    fn hhmm(times: &[NaiveDateTime]) -> Vec<String> {
        times.iter().map(|t| t.format("%H:%M").to_string()).collect()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn two_hourly_from_eight_to_twenty() {
        let times = schedule_for_day(&settings(8, 120, 20, true), "2024-01-01").unwrap();
        assert_eq!(
            hhmm(&times),
            vec!["08:00", "10:00", "12:00", "14:00", "16:00", "18:00", "20:00"]
        );
        assert!(times.iter().all(|t| format_day(t.date()) == "2024-01-01"));
    }

    #[test]
    fn last_hour_is_inclusive() {
        let mut s = settings(20, 20, 20, true);
        s.start_minute = 10;
        let times = schedule_for_day(&s, "2024-01-01").unwrap();
        assert_eq!(hhmm(&times), vec!["20:10", "20:30", "20:50"]);
    }

    #[test]
    fn disabled_is_empty_regardless_of_fields() {
        let s = settings(8, 0, 3, false);
        assert!(schedule_for_day(&s, "not a date").unwrap().is_empty());
    }

    #[test]
    fn non_positive_interval_is_invalid_configuration() {
        for interval in [0, -30] {
            assert!(matches!(
                schedule_for_day(&settings(8, interval, 20, true), "2024-01-01"),
                Err(CoreError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn out_of_range_hours_are_invalid_configuration() {
        assert!(matches!(
            schedule_for_day(&settings(8, 60, 24, true), "2024-01-01"),
            Err(CoreError::InvalidConfiguration(_))
        ));
        let mut s = settings(8, 60, 20, true);
        s.start_minute = 60;
        assert!(matches!(
            schedule_for_day(&s, "2024-01-01"),
            Err(CoreError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn huge_interval_yields_only_the_first_reminder() {
        let times = schedule_for_day(&settings(8, i32::MAX, 20, true), "2024-01-01").unwrap();
        assert_eq!(hhmm(&times), vec!["08:00"]);

        let next = next_reminder(&settings(8, i32::MAX, 20, true), at("2024-01-01 09:00")).unwrap();
        assert_eq!(next, None);
    }

    #[test]
    fn start_after_end_does_not_wrap() {
        let times = schedule_for_day(&settings(22, 60, 6, true), "2024-01-01").unwrap();
        assert!(times.is_empty());
    }

    #[test]
    fn malformed_date_is_invalid_argument() {
        assert!(matches!(
            schedule_for_day(&settings(8, 60, 20, true), "2024-1-1"),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn identical_settings_give_identical_schedules() {
        let s = settings(7, 45, 21, true);
        let copy: HydrationSettings = serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
        assert_eq!(
            schedule_for_day(&s, "2024-06-01").unwrap(),
            schedule_for_day(&copy, "2024-06-01").unwrap()
        );
    }

    #[test]
    fn next_reminder_is_strictly_after_now() {
        let s = settings(8, 120, 20, true);
        assert_eq!(next_reminder(&s, at("2024-01-01 10:00")).unwrap(), Some(at("2024-01-01 12:00")));
        assert_eq!(next_reminder(&s, at("2024-01-01 06:30")).unwrap(), Some(at("2024-01-01 08:00")));
        assert_eq!(next_reminder(&s, at("2024-01-01 20:00")).unwrap(), None);
    }

    #[test]
    fn plan_modes() {
        let s = settings(8, 120, 20, true);
        let now = at("2024-01-01 15:00");

        assert_eq!(
            plan(&s, now, DeliveryMode::Recurring).unwrap(),
            ReminderPlan::Recurring {
                first_fire: at("2024-01-01 16:00"),
                interval_minutes: 120,
            }
        );
        assert_eq!(
            plan(&s, now, DeliveryMode::OneShot).unwrap(),
            ReminderPlan::OneShots(vec![
                at("2024-01-01 16:00"),
                at("2024-01-01 18:00"),
                at("2024-01-01 20:00"),
            ])
        );
    }

    #[test]
    fn recurring_plan_rolls_to_tomorrow_after_window() {
        let s = settings(8, 120, 20, true);
        assert_eq!(
            plan(&s, at("2024-01-01 21:00"), DeliveryMode::Recurring).unwrap(),
            ReminderPlan::Recurring {
                first_fire: at("2024-01-02 08:00"),
                interval_minutes: 120,
            }
        );
    }

    #[test]
    fn disabled_plan() {
        let s = settings(8, 120, 20, false);
        assert_eq!(
            plan(&s, at("2024-01-01 09:00"), DeliveryMode::OneShot).unwrap(),
            ReminderPlan::Disabled
        );
    }

    #[test]
    fn delivery_mode_parses() {
        assert_eq!("recurring".parse::<DeliveryMode>().unwrap(), DeliveryMode::Recurring);
        assert_eq!("one_shot".parse::<DeliveryMode>().unwrap(), DeliveryMode::OneShot);
        assert!("hourly".parse::<DeliveryMode>().is_err());
    }
}
