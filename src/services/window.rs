//! Window resolution: aligns the visible span so the reference day lands in the last column

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone};

use crate::types::{Window, DAYS_PER_WEEK, MAX_WEEKS};

/// Resolves the visible day window from a reference instant
pub struct WindowResolver;

impl WindowResolver {
    /// Resolve the window ending on the local calendar day of `reference`.
    /// `weeks_requested` is clamped to `1..=MAX_WEEKS`; one week may be partial.
    pub fn resolve(reference: DateTime<Local>, weeks_requested: i64) -> Window {
        Self::resolve_date(reference.date_naive(), weeks_requested)
    }

    /// Resolve the window ending on `reference_date`
    pub fn resolve_date(reference_date: NaiveDate, weeks_requested: i64) -> Window {
        let weeks = weeks_requested.clamp(1, MAX_WEEKS) as usize;

        // Sunday-first grid: slot d counts the days since the last Sunday, today included
        let d = (reference_date.weekday().num_days_from_sunday() as usize + 1) % DAYS_PER_WEEK;
        let leading_days = if d == 0 { DAYS_PER_WEEK } else { d };
        let bucket_count = leading_days + (weeks - 1) * DAYS_PER_WEEK;

        let next_day = reference_date.succ_opt().unwrap_or(reference_date);

        Window {
            end_exclusive: local_midnight_ms(next_day),
            bucket_count,
            leading_days,
            reference_date,
        }
    }
}

/// Epoch milliseconds of the first local instant of `date`.
/// When midnight is skipped by a DST jump the day starts one hour later.
pub fn local_midnight_ms(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}
