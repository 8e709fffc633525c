//! Month grid layout.
//!
//! Months are 0-indexed throughout this module (January is 0), matching
//! `chrono::Datelike::month0`. Any `(year, month0, day)` triple may be out of
//! range: month -1 is December of the previous year, month 12 is January of
//! the next, and day 0 is the last day of the previous month.

use chrono::{Datelike, Duration, Local, Months, NaiveDate};

use super::event::format_date_string;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// One square of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub year: i32,
    pub month0: u32,
    pub day: u32,
    /// Borrowed from the previous or next month to fill the first/last row.
    pub is_other_month: bool,
    pub is_today: bool,
}

impl DayCell {
    fn new(year: i32, month0: i32, day: i32, is_other_month: bool, today: NaiveDate) -> Self {
        let date = normalize_date(year, month0, day);
        Self {
            year: date.year(),
            month0: date.month0(),
            day: date.day(),
            is_other_month,
            is_today: date == today,
        }
    }

    pub fn date(&self) -> NaiveDate {
        normalize_date(self.year, self.month0 as i32, self.day as i32)
    }

    /// Canonical `YYYY-MM-DD` key used to look up this cell's events.
    pub fn date_string(&self) -> String {
        format_date_string(self.year, self.month0, self.day)
    }
}

/// Fold an arbitrary month offset into `(year, 0..12)`.
pub fn normalize_month(year: i32, month0: i32) -> (i32, u32) {
    (
        year + month0.div_euclid(12),
        month0.rem_euclid(12) as u32,
    )
}

/// First and last dates whose month grid can be built.
///
/// A grid reads the month before and the two months after the one shown,
/// so the outermost months chrono supports are never shown themselves.
pub fn viewable_range() -> (NaiveDate, NaiveDate) {
    let min_month = NaiveDate::MIN.with_day(1).unwrap_or(NaiveDate::MIN);
    let max_month = NaiveDate::MAX.with_day(1).unwrap_or(NaiveDate::MAX);
    let first = min_month
        .checked_add_months(Months::new(1))
        .unwrap_or(min_month);
    let last = max_month
        .checked_sub_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(max_month);
    (first, last)
}

/// Whether the month containing `date` can be shown.
pub fn is_viewable(date: NaiveDate) -> bool {
    let (first, last) = viewable_range();
    (first..=last).contains(&date)
}

fn first_of_month(year: i32, month0: i32) -> NaiveDate {
    let (year, month0) = normalize_month(year, month0);
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).expect("year within chrono's supported range")
}

/// Resolve a possibly out-of-range `(year, month0, day)` to a real date.
pub fn normalize_date(year: i32, month0: i32, day: i32) -> NaiveDate {
    first_of_month(year, month0) + Duration::days(i64::from(day) - 1)
}

/// Number of days in the month: day 0 of the following month.
pub fn days_in_month(year: i32, month0: i32) -> u32 {
    normalize_date(year, month0 + 1, 0).day()
}

/// Weekday of the 1st, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday(year: i32, month0: i32) -> u32 {
    first_of_month(year, month0).weekday().num_days_from_sunday()
}

/// Whether the triple is the host's current local date, read fresh on every call.
pub fn is_today(year: i32, month0: u32, day: u32) -> bool {
    is_same_day(Local::now().date_naive(), year, month0, day)
}

fn is_same_day(date: NaiveDate, year: i32, month0: u32, day: u32) -> bool {
    date.year() == year && date.month0() == month0 && date.day() == day
}

pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES.get(month0 as usize).copied().unwrap_or("Unknown")
}

pub fn format_month_year(year: i32, month0: u32) -> String {
    format!("{} {}", month_name(month0), year)
}

/// Build the grid for a month against the host's current date.
pub fn build_month_grid(year: i32, month0: i32) -> Vec<DayCell> {
    build_month_grid_at(year, month0, Local::now().date_naive())
}

/// Build the grid for a month, marking `today`.
///
/// The result always holds whole weeks: previous-month days lead up to the
/// 1st and next-month days pad out the last row.
pub fn build_month_grid_at(year: i32, month0: i32, today: NaiveDate) -> Vec<DayCell> {
    let (year, month0) = normalize_month(year, month0);
    let month0 = month0 as i32;

    let days = days_in_month(year, month0);
    let leading = first_weekday(year, month0);
    let days_in_prev = days_in_month(year, month0 - 1);

    let mut cells = Vec::with_capacity(42);

    for i in (0..leading).rev() {
        let day = (days_in_prev - i) as i32;
        cells.push(DayCell::new(year, month0 - 1, day, true, today));
    }

    for day in 1..=days {
        cells.push(DayCell::new(year, month0, day as i32, false, today));
    }

    let remaining = (7 - cells.len() % 7) % 7;
    for day in 1..=remaining {
        cells.push(DayCell::new(year, month0 + 1, day as i32, true, today));
    }

    cells
}
