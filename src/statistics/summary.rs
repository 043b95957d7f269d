//! The at-a-glance spending summary: this month, this week, today, and the change from last month.

use rusqlite::Connection;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    expense::get_period_totals,
    statistics::{
        comparison::{Trend, compare_totals},
        period::{DateWindow, month_window, previous_month_window, summary_week_window},
    },
    user::UserId,
};

/// The response body for the summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Totals for the current month, or the custom range if one was given.
    pub current_month: MonthTotals,
    /// Totals for the current week.
    pub current_week: Totals,
    /// Totals for the reference day.
    pub today: Totals,
    /// The current month against the month before the reference day.
    pub comparison_previous_month: PreviousMonthComparison,
}

/// The total, count and average of the expenses in a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthTotals {
    /// The sum of the expense amounts.
    pub total: f64,
    /// The number of expenses.
    pub count: i64,
    /// The mean expense amount.
    pub average: f64,
}

/// The total and count of the expenses in a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    /// The sum of the expense amounts.
    pub total: f64,
    /// The number of expenses.
    pub count: i64,
}

/// How the current month compares to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviousMonthComparison {
    /// The total for the previous month.
    pub previous_total: f64,
    /// The current total minus the previous total.
    pub change_amount: f64,
    /// The change as a percentage of the previous total.
    pub change_percentage: f64,
    /// The direction of the change.
    pub trend: Trend,
}

/// Build the summary for `user_id`.
///
/// With a custom range, "this month" is the range itself and "today" is the
/// last day of the range. Otherwise both are taken from `target_date`. The
/// previous month is always the month before "today".
///
/// # Errors
/// Returns [Error::SqlError] if a query fails.
pub fn build_summary(
    user_id: &UserId,
    target_date: Date,
    custom_range: Option<DateWindow>,
    connection: &Connection,
) -> Result<Summary, Error> {
    let month = custom_range
        .unwrap_or_else(|| month_window(target_date.year(), target_date.month()));
    let week = summary_week_window(target_date, custom_range);
    let today = custom_range.map_or(target_date, |range| range.end());
    let previous_month = previous_month_window(today);

    let month_totals = get_period_totals(user_id, Some(month), connection)?;
    let week_totals = get_period_totals(user_id, Some(week), connection)?;
    let today_totals = get_period_totals(user_id, Some(DateWindow::single_day(today)), connection)?;
    let previous_totals = get_period_totals(user_id, Some(previous_month), connection)?;

    let change = compare_totals(month_totals.total, previous_totals.total);

    Ok(Summary {
        current_month: MonthTotals {
            total: month_totals.total,
            count: month_totals.count,
            average: month_totals.average,
        },
        current_week: Totals {
            total: week_totals.total,
            count: week_totals.count,
        },
        today: Totals {
            total: today_totals.total,
            count: today_totals.count,
        },
        comparison_previous_month: PreviousMonthComparison {
            previous_total: previous_totals.total,
            change_amount: change.amount,
            change_percentage: change.percentage,
            trend: change.trend,
        },
    })
}
