use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

/// Attaches `tz` to a wall-clock `NaiveDateTime`.
///
/// - An ambiguous local time (clocks going back) resolves to the **earlier** instant.
/// - A local time that does not exist (clocks going forward) is read with the
///   offset in force just before the gap, which moves it forward by the gap length.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use chrono_tz::Europe::Paris;
/// # use datefr_core::dates::localize;
/// // 2025-03-30 02:30 does not exist in Paris.
/// let naive = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap().and_hms_opt(2, 30, 0).unwrap();
/// let dt = localize(&Paris, naive).unwrap();
/// assert_eq!(dt.to_rfc3339(), "2025-03-30T03:30:00+02:00");
/// ```
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let before = naive.checked_sub_signed(Duration::days(1))?;
            let offset = tz.offset_from_local_datetime(&before).earliest()?.fix();
            let utc = naive.checked_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}
