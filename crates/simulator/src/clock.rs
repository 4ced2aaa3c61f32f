//! Simulated wall clock.

use platform::{LocalTime, Weekday};

/// Monday 2024-02-26 at `hour`:00. Crosses into a leap day on the third day.
pub fn start_time(hour: u8) -> LocalTime {
    LocalTime {
        year: 2024,
        month: 2,
        day: 26,
        weekday: Weekday::Monday,
        hour,
        minute: 0,
    }
}

fn is_leap(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// `now` plus one minute, rolling over hour, day, month and year.
pub fn advance(now: LocalTime) -> LocalTime {
    let mut next = now;
    next.minute += 1;
    if next.minute < 60 {
        return next;
    }
    next.minute = 0;
    next.hour += 1;
    if next.hour < 24 {
        return next;
    }
    next.hour = 0;
    next.weekday = Weekday::from_index(next.weekday.index() + 1);
    next.day += 1;
    if next.day <= days_in_month(next.year, next.month) {
        return next;
    }
    next.day = 1;
    next.month += 1;
    if next.month > 12 {
        next.month = 1;
        next.year += 1;
    }
    next
}
