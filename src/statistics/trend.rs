//! Time series of expense totals for the trend charts.

use serde::Serialize;
use time::{Date, Duration, Month};

use crate::statistics::period::{DateWindow, format_month, month_window, shift_month};

/// The trend type used when the client does not ask for one.
pub const DEFAULT_TREND_TYPE: &str = "daily";
/// The number of buckets used when the client does not ask for a range.
pub const DEFAULT_TREND_RANGE: i64 = 30;
/// The longest custom range, in days, that a trend will cover.
pub const MAX_CUSTOM_RANGE_DAYS: i64 = 180;
/// The most buckets a single trend request will produce.
pub const MAX_TREND_BUCKETS: i64 = 3660;

/// The size of the buckets in a trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendType {
    /// One bucket per day.
    Daily,
    /// One bucket per seven days, ending on the reference date.
    Weekly,
    /// One bucket per calendar month.
    Monthly,
}

impl TrendType {
    /// Parse the `trend_type` query parameter, returning `None` for unknown types.
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// One bucket of a trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendBucket {
    /// A single day.
    Day(Date),
    /// Seven consecutive days.
    Week(DateWindow),
    /// A calendar month.
    Month(i32, Month),
}

impl TrendBucket {
    /// The dates covered by the bucket.
    pub fn window(&self) -> DateWindow {
        match *self {
            Self::Day(date) => DateWindow::single_day(date),
            Self::Week(window) => window,
            Self::Month(year, month) => month_window(year, month),
        }
    }

    /// Attach the totals for the bucket to produce a row for the response.
    pub fn into_point(self, total: f64, count: i64) -> TrendPoint {
        match self {
            Self::Day(date) => TrendPoint::Daily {
                date: date.to_string(),
                total,
                count,
            },
            Self::Week(window) => TrendPoint::Weekly {
                week_start: window.start().to_string(),
                week_end: window.end().to_string(),
                total,
                count,
            },
            Self::Month(year, month) => TrendPoint::Monthly {
                month: format_month(year, month),
                total,
                count,
            },
        }
    }
}

/// A row of the trend response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrendPoint {
    /// The totals for one day.
    Daily {
        /// The day, formatted as `YYYY-MM-DD`.
        date: String,
        /// The sum of the expense amounts.
        total: f64,
        /// The number of expenses.
        count: i64,
    },
    /// The totals for one seven day window.
    Weekly {
        /// The first day of the window, formatted as `YYYY-MM-DD`.
        week_start: String,
        /// The last day of the window, formatted as `YYYY-MM-DD`.
        week_end: String,
        /// The sum of the expense amounts.
        total: f64,
        /// The number of expenses.
        count: i64,
    },
    /// The totals for one calendar month.
    Monthly {
        /// The month, formatted as `YYYY-MM`.
        month: String,
        /// The sum of the expense amounts.
        total: f64,
        /// The number of expenses.
        count: i64,
    },
}

/// Build `range_value` consecutive buckets ending at `end`, oldest first.
///
/// Weekly buckets end on `end`, `end - 7 days` and so on, each starting six
/// days before it ends. Monthly buckets end with the month containing `end`.
/// A non-positive `range_value` gives no buckets, and `range_value` is
/// capped at [MAX_TREND_BUCKETS]. Buckets that would fall before the
/// earliest representable date are left out.
pub fn trend_buckets(trend_type: TrendType, range_value: i64, end: Date) -> Vec<TrendBucket> {
    let range_value = range_value.min(MAX_TREND_BUCKETS);

    (0..range_value.max(0))
        .rev()
        .filter_map(|offset| match trend_type {
            TrendType::Daily => end.checked_sub(Duration::days(offset)).map(TrendBucket::Day),
            TrendType::Weekly => {
                let week_end = end.checked_sub(Duration::weeks(offset))?;
                let week_start = week_end.checked_sub(Duration::days(6))?;

                Some(TrendBucket::Week(DateWindow::new(week_start, week_end)))
            }
            TrendType::Monthly => {
                let offset = i32::try_from(offset).ok()?;
                let (year, month) = shift_month(end.year(), end.month(), -offset);
                Date::from_calendar_date(year, month, 1).ok()?;

                Some(TrendBucket::Month(year, month))
            }
        })
        .collect()
}

/// The shape of a trend series after the query parameters have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRequest {
    /// The requested trend type, echoed back to the client as given.
    pub trend_type: String,
    /// The number of buckets.
    pub range_value: i64,
    /// The last date covered by the series.
    pub end_date: Date,
}

impl TrendRequest {
    /// Apply a client supplied date range, if any.
    ///
    /// A custom range always produces a daily series ending at the end of the
    /// range. Ranges longer than [MAX_CUSTOM_RANGE_DAYS] are cut short from the start.
    pub fn with_custom_range(self, custom_range: Option<DateWindow>) -> Self {
        match custom_range {
            Some(range) => Self {
                trend_type: DEFAULT_TREND_TYPE.to_owned(),
                range_value: range.day_count().min(MAX_CUSTOM_RANGE_DAYS),
                end_date: range.end(),
            },
            None => self,
        }
    }
}
