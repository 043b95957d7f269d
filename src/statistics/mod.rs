//! Spending statistics: summaries, breakdowns by category and vendor, trends and comparisons.
//!
//! This module contains:
//! - Date window selection for named periods and custom ranges
//! - Aggregation of expenses by resolved category and decrypted vendor
//! - Trend series and month over month comparisons
//! - The HTTP handlers that serve them as JSON

mod aggregation;
mod comparison;
mod handlers;
mod period;
mod summary;
mod trend;

pub use handlers::{
    get_category_statistics, get_comparison_statistics, get_summary_statistics,
    get_trend_statistics, get_vendor_statistics,
};
pub use period::DateWindow;
