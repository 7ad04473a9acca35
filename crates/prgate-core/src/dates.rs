//! Date helpers for title dates, submission windows and cohort weeks.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

/// Decode the trailing `yy-mm-dd` token of a title.
///
/// Returns `None` when the title is empty or the last whitespace-separated
/// token is not a valid calendar date.
pub fn encoded_date(title: &str) -> Option<NaiveDate> {
    let token = title.split_whitespace().last()?;
    NaiveDate::parse_from_str(token, "%y-%m-%d").ok()
}

/// Calendar day of `instant` in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: FixedOffset) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Whether `date` is the day before `now`'s calendar day in `tz`.
pub fn is_yesterday(date: NaiveDate, now: DateTime<Utc>, tz: FixedOffset) -> bool {
    local_date(now, tz)
        .pred_opt()
        .map(|yesterday| yesterday == date)
        .unwrap_or(false)
}

/// Start of `date` (00:00 local) as a UTC instant.
pub fn start_of_day(date: NaiveDate, tz: FixedOffset) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whether `created_at` falls within `[date 00:00, date 00:00 + due]` in `tz`.
pub fn within_submission_window(
    date: NaiveDate,
    created_at: DateTime<Utc>,
    tz: FixedOffset,
    due: Duration,
) -> bool {
    match start_of_day(date, tz) {
        Some(opens) => {
            created_at >= opens
                && opens
                    .checked_add_signed(due)
                    .map_or(true, |closes| created_at <= closes)
        }
        None => false,
    }
}

/// Cohort week containing `date`, counting `start` as week 1.
///
/// Dates before `start` yield zero or negative weeks.
pub fn week_number(date: NaiveDate, start: NaiveDate) -> i64 {
    (date - start).num_days().div_euclid(7) + 1
}
