use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// fixed step the due date advances after a partial repayment
pub const PAYMENT_CYCLE_DAYS: i64 = 30;

/// length of one overdue penalty period
pub const PENALTY_PERIOD_DAYS: i64 = 30;

/// add calendar months to a timestamp, rolling the year on overflow
///
/// the day of month is clamped to the length of the target month
/// (Jan 31 + 1 month lands on Feb 28/29), time of day is preserved
pub fn add_calendar_months(date: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let mut year = date.year();
    let mut month = date.month() + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }

    let day = date.day().min(days_in_month(year, month));
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| date.date_naive())
        .and_time(date.time());

    DateTime::from_naive_utc_and_offset(naive, Utc)
}

/// whole days elapsed between two timestamps, truncated
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_days()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
