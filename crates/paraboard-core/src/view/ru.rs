//! Russian display strings.

use chrono::{Datelike, NaiveDate};

const DAY_NAMES: [&str; 7] = [
    "Понедельник",
    "Вторник",
    "Среда",
    "Четверг",
    "Пятница",
    "Суббота",
    "Воскресенье",
];

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Capitalized day name for day numbers 1..=7; `None` otherwise.
pub fn day_name(day: u8) -> Option<&'static str> {
    day.checked_sub(1)
        .and_then(|i| DAY_NAMES.get(i as usize))
        .copied()
}

/// Short two-letter label used on the day buttons.
pub fn day_short(day: u8) -> Option<String> {
    day_name(day).map(|name| name.chars().take(2).collect())
}

/// Long date as shown under the clock, e.g. `понедельник, 2 сентября`.
pub fn long_date(date: NaiveDate) -> String {
    let weekday = DAY_NAMES[date.weekday().num_days_from_monday() as usize].to_lowercase();
    let month = MONTHS_GENITIVE[date.month0() as usize];
    format!("{weekday}, {} {month}", date.day())
}
