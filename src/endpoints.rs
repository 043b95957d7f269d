//! The API endpoints URIs.

/// The root route, which reports that the API is running.
pub const ROOT: &str = "/";
/// The route for checking that the service is healthy.
pub const HEALTH: &str = "/api/v1/health";
/// The route for the spending summary for the current month, week and day.
pub const STATISTICS_SUMMARY: &str = "/api/v1/statistics/summary";
/// The route for spending grouped by category.
pub const STATISTICS_BY_CATEGORY: &str = "/api/v1/statistics/by_category";
/// The route for the vendors with the most spending.
pub const STATISTICS_BY_VENDOR: &str = "/api/v1/statistics/by_vendor";
/// The route for spending over time.
pub const STATISTICS_TREND: &str = "/api/v1/statistics/trend";
/// The route for comparing the spending in two months.
pub const STATISTICS_COMPARISON: &str = "/api/v1/statistics/comparison";
