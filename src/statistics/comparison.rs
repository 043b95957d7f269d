//! Period over period changes in spending.

use serde::Serialize;
use time::{Date, Month};

use crate::{Error, statistics::aggregation::round_to_cents};

/// The direction spending moved in between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Spending went up.
    Up,
    /// Spending went down.
    Down,
    /// Spending did not change, or there was nothing to compare against.
    Stable,
}

/// The change in spending from a previous period to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Change {
    /// The current total minus the previous total.
    pub amount: f64,
    /// The change as a percentage of the previous total, rounded to 2 decimal places.
    pub percentage: f64,
    /// The direction of the change.
    pub trend: Trend,
}

/// Compare the total spent in the current period against a previous period.
///
/// When the previous total is not positive there is no meaningful
/// percentage, so the percentage is zero and the trend is
/// [Trend::Stable] regardless of the current total.
pub fn compare_totals(current: f64, previous: f64) -> Change {
    let amount = current - previous;

    if previous <= 0.0 {
        return Change {
            amount,
            percentage: 0.0,
            trend: Trend::Stable,
        };
    }

    let trend = if amount > 0.0 {
        Trend::Up
    } else if amount < 0.0 {
        Trend::Down
    } else {
        Trend::Stable
    };

    Change {
        amount,
        percentage: round_to_cents(amount / previous * 100.0),
        trend,
    }
}

/// Parse a `YYYY-MM` month token.
///
/// # Errors
/// Returns [Error::InvalidPeriod] if `token` is not two `-` separated
/// integers naming a valid month.
pub fn parse_month_token(token: &str) -> Result<(i32, Month), Error> {
    let invalid = || Error::InvalidPeriod(token.to_owned());

    let (year, month) = token.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.trim().parse().map_err(|_| invalid())?;
    let month: u8 = month.trim().parse().map_err(|_| invalid())?;
    let month = Month::try_from(month).map_err(|_| invalid())?;

    Date::from_calendar_date(year, month, 1).map_err(|_| invalid())?;

    Ok((year, month))
}
