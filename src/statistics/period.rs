//! Date windows for the statistics endpoints.
//!
//! Every statistic is computed over an inclusive window of calendar dates,
//! either given explicitly by the client with `date_from`/`date_to` or
//! derived from a named period and a target date.

use std::fmt::Display;

use time::{Date, Duration, Month, macros::format_description};

/// An inclusive range of calendar dates where `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: Date,
    end: Date,
}

impl DateWindow {
    /// Create a window spanning `a` and `b`, in whichever order they are given.
    pub fn new(a: Date, b: Date) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A window containing only `date`.
    pub fn single_day(date: Date) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The first date in the window.
    pub fn start(&self) -> Date {
        self.start
    }

    /// The last date in the window.
    pub fn end(&self) -> Date {
        self.end
    }

    /// The number of days in the window, counting both ends.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }
}

impl Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

/// Parse a `YYYY-MM-DD` query parameter.
///
/// The month and day may be written without a leading zero.
/// Missing and malformed values are both treated as absent.
pub fn parse_date_param(value: Option<&str>) -> Option<Date> {
    let format = format_description!("[year]-[month padding:none]-[day padding:none]");

    value
        .filter(|value| !value.is_empty())
        .and_then(|value| Date::parse(value, &format).ok())
}

/// Build the window for a client supplied `date_from`/`date_to` pair.
///
/// A single bound is used for both ends, and reversed bounds are swapped.
/// Returns `None` if neither bound is given.
pub fn custom_range(date_from: Option<Date>, date_to: Option<Date>) -> Option<DateWindow> {
    match (date_from, date_to) {
        (Some(from), Some(to)) => Some(DateWindow::new(from, to)),
        (Some(date), None) | (None, Some(date)) => Some(DateWindow::single_day(date)),
        (None, None) => None,
    }
}

/// The named periods that the breakdown endpoints accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The calendar month containing the target date.
    Month,
    /// The calendar year containing the target date.
    Year,
    /// Every expense, regardless of date.
    All,
}

impl Period {
    /// Parse the `period` query parameter.
    ///
    /// A missing parameter means [Period::Month]. Anything that is not
    /// "month" or "year" means [Period::All].
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            None | Some("month") => Self::Month,
            Some("year") => Self::Year,
            Some(_) => Self::All,
        }
    }
}

/// The window a breakdown covers and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSelection {
    /// The dates to include, or `None` for all dates.
    pub window: Option<DateWindow>,
    /// A human readable description of the window.
    pub label: String,
}

/// Pick the window for a breakdown.
///
/// A custom range takes precedence over the named `period`.
pub fn select_period(
    period: Period,
    target_date: Date,
    custom_range: Option<DateWindow>,
) -> PeriodSelection {
    if let Some(window) = custom_range {
        return PeriodSelection {
            window: Some(window),
            label: window.to_string(),
        };
    }

    match period {
        Period::Month => PeriodSelection {
            window: Some(month_window(target_date.year(), target_date.month())),
            label: format_month(target_date.year(), target_date.month()),
        },
        Period::Year => PeriodSelection {
            window: Some(year_window(target_date.year())),
            label: target_date.year().to_string(),
        },
        Period::All => PeriodSelection {
            window: None,
            label: "all".to_owned(),
        },
    }
}

/// The first through the last day of `month` in `year`.
pub fn month_window(year: i32, month: Month) -> DateWindow {
    let start = first_day_of_month(year, month);
    let end = start.replace_day(last_day_of_month(year, month)).unwrap_or(start);

    DateWindow { start, end }
}

/// January 1 through December 31 of `year`.
pub fn year_window(year: i32) -> DateWindow {
    DateWindow {
        start: first_day_of_month(year, Month::January),
        end: first_day_of_month(year, Month::December)
            .replace_day(31)
            .unwrap_or(Date::MAX),
    }
}

/// Monday through Sunday of the week containing `date`.
pub fn week_window(date: Date) -> DateWindow {
    let weekday_number = date.weekday().number_from_monday() as i64;
    let start = date
        .checked_sub(Duration::days(weekday_number - 1))
        .unwrap_or(Date::MIN);
    let end = start.checked_add(Duration::days(6)).unwrap_or(Date::MAX);

    DateWindow { start, end }
}

/// The "current week" shown on the summary.
///
/// With a custom range this is the last seven days of the range, or the
/// whole range if it is shorter. Otherwise it is the week containing
/// `target_date`.
pub fn summary_week_window(target_date: Date, custom_range: Option<DateWindow>) -> DateWindow {
    match custom_range {
        Some(range) => {
            let end = range.end;
            let start = end
                .checked_sub(Duration::days(6))
                .map_or(range.start, |week_start| range.start.max(week_start));

            DateWindow { start, end }
        }
        None => week_window(target_date),
    }
}

/// The calendar month before the one containing `date`.
pub fn previous_month_window(date: Date) -> DateWindow {
    let (year, month) = shift_month(date.year(), date.month(), -1);

    month_window(year, month)
}

/// Move `offset` months from `month` in `year`, rolling the year over as needed.
pub fn shift_month(year: i32, month: Month, offset: i32) -> (i32, Month) {
    let mut target_year = year;
    let mut target_month = month as i32 + offset;

    while target_month <= 0 {
        target_month += 12;
        target_year -= 1;
    }

    while target_month > 12 {
        target_month -= 12;
        target_year += 1;
    }

    (target_year, month_from_number(target_month as u8))
}

/// Format a month as `YYYY-MM`.
pub fn format_month(year: i32, month: Month) -> String {
    format!("{year}-{:02}", month as u8)
}

fn first_day_of_month(year: i32, month: Month) -> Date {
    Date::from_calendar_date(year, month, 1).unwrap_or(Date::MIN)
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn month_from_number(month: u8) -> Month {
    match month {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        _ => Month::December,
    }
}
