//! Calendar helpers.
//!
//! Dates are UTC calendar days; timestamps are truncated to millisecond precision
//! because that is what survives a trip through the JSON wire format.

use chrono::{DateTime, Months, NaiveDate, Utc};

/// Today's date in UTC.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The current instant truncated to whole milliseconds.
#[must_use]
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Shift a date forward by whole calendar months, clamping to the month's last day.
///
/// Dates past chrono's range are returned unchanged.
#[must_use]
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Shift a date back by whole calendar months, clamping to the month's last day.
#[must_use]
pub fn sub_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_months_clamps_to_month_end() {
        let jan31 = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(add_months(jan31, 1), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(add_months(jan31, 12), NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
    }

    #[test]
    fn now_millis_has_no_sub_millisecond_part() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
