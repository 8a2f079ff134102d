use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::wellness::day::format_day;

/// Source of "now" in the service's single fixed calendar.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> String {
        format_day(self.now().date())
    }

    /// Instant stamped on appended records.
    fn timestamp(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant. Timestamps read it as UTC.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }

    fn timestamp(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0)
    }
}
