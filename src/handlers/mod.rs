pub mod habits;
pub mod health;
pub mod hydration;
pub mod moods;
pub mod progress;
pub mod summary;
pub mod ws;

use crate::error::AppResult;
use crate::wellness::day::parse_day;
use crate::AppState;

/// The requested day, or today when the client did not send one.
pub(crate) fn resolve_day(state: &AppState, date: Option<String>) -> AppResult<String> {
    match date {
        Some(date) => {
            parse_day(&date)?;
            Ok(date)
        }
        None => Ok(state.clock.today()),
    }
}

/// Validate an optional day filter without defaulting it.
pub(crate) fn check_day_filter(date: Option<&str>) -> AppResult<()> {
    if let Some(date) = date {
        parse_day(date)?;
    }
    Ok(())
}
