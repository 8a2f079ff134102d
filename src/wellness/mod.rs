//! Pure wellness computations.
//!
//! Everything in here works on already-loaded snapshots of records and
//! returns freshly computed values. No I/O, no shared state, no clocks:
//! callers pass "today" or "now" in explicitly.

pub mod day;
pub mod hydration;
pub mod mood;
pub mod reminders;
pub mod streak;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Shared percentage rule for habit and hydration progress.
///
/// Rounds half away from zero and clamps to `0..=100`. A non-positive
/// target means "no defined goal" and yields 0.
pub(crate) fn percent_of(value: i64, target: i64) -> u8 {
    if target <= 0 {
        return 0;
    }
    let pct = (value as f64 / target as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}
