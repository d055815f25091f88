//! Elapsed-hours calculation.
//!
//! Every hour figure in the engine is built from [`hours_between`], which
//! treats missing or reversed punches as "no hours" instead of an error.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Returns the elapsed time between two instants in fractional hours.
///
/// Returns zero when either instant is missing or when `end` is not after
/// `start`. The result is never negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::hours_between;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2026, 3, 2, 10, 30, 0).unwrap();
///
/// assert_eq!(hours_between(Some(start), Some(end)), Decimal::new(15, 1));
/// assert_eq!(hours_between(Some(end), Some(start)), Decimal::ZERO);
/// assert_eq!(hours_between(None, Some(end)), Decimal::ZERO);
/// ```
pub fn hours_between(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Decimal {
    let (Some(start), Some(end)) = (start, end) else {
        return Decimal::ZERO;
    };

    let elapsed_ms = (end - start).num_milliseconds();
    if elapsed_ms <= 0 {
        return Decimal::ZERO;
    }

    Decimal::from(elapsed_ms) / Decimal::from(MILLIS_PER_HOUR)
}
