//! Statistics HTTP handlers.
//!
//! Each handler resolves its date window from the query string, reads what
//! it needs from the database while holding the connection lock, and returns
//! a JSON body.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    category::{CategoryIndex, get_categories},
    crypto::Decrypt,
    expense::{get_expenses, get_grouped_vendor_totals, get_period_totals},
    statistics::{
        aggregation::{
            CategoryShare, DEFAULT_VENDOR_LIMIT, VendorShare, aggregate_categories,
            aggregate_vendors, category_breakdown, top_vendors,
        },
        comparison::{Change, compare_totals, parse_month_token},
        period::{DateWindow, Period, custom_range, month_window, parse_date_param, select_period},
        summary::{Summary, build_summary},
        trend::{
            DEFAULT_TREND_RANGE, DEFAULT_TREND_TYPE, MAX_TREND_BUCKETS, TrendPoint, TrendRequest,
            TrendType, trend_buckets,
        },
    },
    timezone::get_local_today,
    user::UserId,
};

/// The state needed by the statistics handlers.
#[derive(Debug, Clone)]
pub struct StatisticsState {
    /// The database connection for reading expenses and categories.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The cipher for reading encrypted vendor names and metadata.
    pub cipher: Arc<dyn Decrypt>,
    /// The local timezone as a canonical timezone name, e.g. "Europe/Chisinau".
    pub local_timezone: String,
    /// The user whose expenses are reported on.
    pub user_id: UserId,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            cipher: state.cipher.clone(),
            local_timezone: state.local_timezone.clone(),
            user_id: state.default_user_id.clone(),
        }
    }
}

/// The query parameters for the summary endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// The day to report on as `YYYY-MM-DD`, defaults to today.
    pub target_date: Option<String>,
    /// The first day of a custom range as `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// The last day of a custom range as `YYYY-MM-DD`.
    pub date_to: Option<String>,
}

/// The query parameters for the category breakdown endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    /// "month", "year" or "all", defaults to "month".
    pub period: Option<String>,
    /// The day whose month or year is reported on as `YYYY-MM-DD`, defaults to today.
    pub target_date: Option<String>,
    /// The first day of a custom range as `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// The last day of a custom range as `YYYY-MM-DD`.
    pub date_to: Option<String>,
}

/// The query parameters for the vendor breakdown endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct VendorQuery {
    /// "month", "year" or "all", defaults to "month".
    pub period: Option<String>,
    /// The maximum number of vendors to return, defaults to 10.
    pub limit: Option<usize>,
    /// The day whose month or year is reported on as `YYYY-MM-DD`, defaults to today.
    pub target_date: Option<String>,
    /// The first day of a custom range as `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// The last day of a custom range as `YYYY-MM-DD`.
    pub date_to: Option<String>,
}

/// The query parameters for the trend endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    /// "daily", "weekly" or "monthly", defaults to "daily".
    pub trend_type: Option<String>,
    /// The number of buckets, defaults to 30.
    pub range_value: Option<i64>,
    /// The last day of the series as `YYYY-MM-DD`, defaults to today.
    pub target_date: Option<String>,
    /// The first day of a custom range as `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// The last day of a custom range as `YYYY-MM-DD`.
    pub date_to: Option<String>,
}

/// The query parameters for the comparison endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ComparisonQuery {
    /// The month to compare as `YYYY-MM`.
    pub current_period: Option<String>,
    /// The month to compare against as `YYYY-MM`.
    pub previous_period: Option<String>,
}

/// The response body for the category breakdown endpoint.
#[derive(Debug, Serialize)]
pub struct CategoryStatistics {
    /// A description of the dates covered.
    pub period: String,
    /// The sum of all category totals.
    pub grand_total: f64,
    /// The categories, largest total first.
    pub categories: Vec<CategoryShare>,
}

/// The response body for the vendor breakdown endpoint.
#[derive(Debug, Serialize)]
pub struct VendorStatistics {
    /// A description of the dates covered.
    pub period: String,
    /// The sum of the totals of the returned vendors.
    pub grand_total: f64,
    /// The top vendors, largest total first.
    pub top_vendors: Vec<VendorShare>,
}

/// The response body for the trend endpoint.
#[derive(Debug, Serialize)]
pub struct TrendStatistics {
    /// The trend type, as requested.
    #[serde(rename = "type")]
    pub trend_type: String,
    /// The number of buckets requested.
    pub range: i64,
    /// The buckets, oldest first.
    pub data: Vec<TrendPoint>,
}

/// The totals for one side of a comparison.
#[derive(Debug, Serialize)]
pub struct PeriodStatistics {
    /// The month, as requested.
    pub period: String,
    /// The sum of the expense amounts.
    pub total: f64,
    /// The number of expenses.
    pub count: i64,
}

/// The response body for the comparison endpoint.
#[derive(Debug, Serialize)]
pub struct ComparisonStatistics {
    /// The totals for the current month.
    pub current: PeriodStatistics,
    /// The totals for the previous month.
    pub previous: PeriodStatistics,
    /// The change from the previous month to the current one.
    pub change: Change,
}

/// Get the spending for the current month, week and day, and the change from last month.
pub async fn get_summary_statistics(
    State(state): State<StatisticsState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Summary>, Error> {
    let target_date = resolve_target_date(query.target_date.as_deref(), &state.local_timezone)?;
    let custom_range = parse_custom_range(query.date_from.as_deref(), query.date_to.as_deref());

    let connection = lock_connection(&state)?;

    build_summary(&state.user_id, target_date, custom_range, &connection)
        .inspect_err(|error| tracing::error!("could not build summary statistics: {error}"))
        .map(Json)
}

/// Get the spending in a period grouped by category.
pub async fn get_category_statistics(
    State(state): State<StatisticsState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<CategoryStatistics>, Error> {
    let target_date = resolve_target_date(query.target_date.as_deref(), &state.local_timezone)?;
    let selection = select_period(
        Period::from_query(query.period.as_deref()),
        target_date,
        parse_custom_range(query.date_from.as_deref(), query.date_to.as_deref()),
    );

    let connection = lock_connection(&state)?;

    let expenses = get_expenses(&state.user_id, selection.window, &connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;
    let categories = get_categories(&state.user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;
    drop(connection);

    let index = CategoryIndex::new(categories);
    let aggregates = aggregate_categories(&expenses, &index, state.cipher.as_ref());
    let (grand_total, categories) = category_breakdown(aggregates);

    Ok(Json(CategoryStatistics {
        period: selection.label,
        grand_total,
        categories,
    }))
}

/// Get the vendors with the most spending in a period.
pub async fn get_vendor_statistics(
    State(state): State<StatisticsState>,
    Query(query): Query<VendorQuery>,
) -> Result<Json<VendorStatistics>, Error> {
    let target_date = resolve_target_date(query.target_date.as_deref(), &state.local_timezone)?;
    let selection = select_period(
        Period::from_query(query.period.as_deref()),
        target_date,
        parse_custom_range(query.date_from.as_deref(), query.date_to.as_deref()),
    );

    let connection = lock_connection(&state)?;

    let rows = get_grouped_vendor_totals(&state.user_id, selection.window, &connection)
        .inspect_err(|error| tracing::error!("could not get vendor totals: {error}"))?;
    drop(connection);

    let aggregates = aggregate_vendors(&rows, state.cipher.as_ref());
    let breakdown = top_vendors(aggregates, query.limit.unwrap_or(DEFAULT_VENDOR_LIMIT));

    Ok(Json(VendorStatistics {
        period: selection.label,
        grand_total: breakdown.grand_total,
        top_vendors: breakdown.vendors,
    }))
}

/// Get the spending over time as a series of daily, weekly or monthly totals.
///
/// An unknown trend type gives an empty series rather than an error.
pub async fn get_trend_statistics(
    State(state): State<StatisticsState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendStatistics>, Error> {
    let end_date = resolve_target_date(query.target_date.as_deref(), &state.local_timezone)?;
    let request = TrendRequest {
        trend_type: query
            .trend_type
            .unwrap_or_else(|| DEFAULT_TREND_TYPE.to_owned()),
        range_value: query
            .range_value
            .unwrap_or(DEFAULT_TREND_RANGE)
            .min(MAX_TREND_BUCKETS),
        end_date,
    }
    .with_custom_range(parse_custom_range(
        query.date_from.as_deref(),
        query.date_to.as_deref(),
    ));

    let buckets = match TrendType::from_query(&request.trend_type) {
        Some(trend_type) => trend_buckets(trend_type, request.range_value, request.end_date),
        None => {
            tracing::debug!("unknown trend type \"{}\"", request.trend_type);
            Vec::new()
        }
    };

    let connection = lock_connection(&state)?;

    let data = buckets
        .into_iter()
        .map(|bucket| {
            get_period_totals(&state.user_id, Some(bucket.window()), &connection)
                .map(|totals| bucket.into_point(totals.total, totals.count))
        })
        .collect::<Result<Vec<TrendPoint>, Error>>()
        .inspect_err(|error| tracing::error!("could not get trend totals: {error}"))?;

    Ok(Json(TrendStatistics {
        trend_type: request.trend_type,
        range: request.range_value,
        data,
    }))
}

/// Compare the spending in two months.
pub async fn get_comparison_statistics(
    State(state): State<StatisticsState>,
    Query(query): Query<ComparisonQuery>,
) -> Result<Json<ComparisonStatistics>, Error> {
    let current_period = query.current_period.unwrap_or_default();
    let previous_period = query.previous_period.unwrap_or_default();

    let (current_year, current_month) = parse_month_token(&current_period)?;
    let (previous_year, previous_month) = parse_month_token(&previous_period)?;

    let connection = lock_connection(&state)?;

    let current = get_period_totals(
        &state.user_id,
        Some(month_window(current_year, current_month)),
        &connection,
    )
    .inspect_err(|error| tracing::error!("could not get totals for {current_period}: {error}"))?;
    let previous = get_period_totals(
        &state.user_id,
        Some(month_window(previous_year, previous_month)),
        &connection,
    )
    .inspect_err(|error| tracing::error!("could not get totals for {previous_period}: {error}"))?;

    Ok(Json(ComparisonStatistics {
        change: compare_totals(current.total, previous.total),
        current: PeriodStatistics {
            period: current_period,
            total: current.total,
            count: current.count,
        },
        previous: PeriodStatistics {
            period: previous_period,
            total: previous.total,
            count: previous.count,
        },
    }))
}

/// The date a request is about: `target_date` if given, otherwise today in `local_timezone`.
///
/// # Errors
/// Returns [Error::InvalidDate] if `target_date` is given but is not a
/// `YYYY-MM-DD` date, or [Error::InvalidTimezoneError] if `local_timezone`
/// is not a valid timezone.
fn resolve_target_date(target_date: Option<&str>, local_timezone: &str) -> Result<Date, Error> {
    match target_date.filter(|value| !value.is_empty()) {
        Some(value) => {
            parse_date_param(Some(value)).ok_or_else(|| Error::InvalidDate(value.to_owned()))
        }
        None => get_local_today(local_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(local_timezone.to_owned())),
    }
}

fn parse_custom_range(date_from: Option<&str>, date_to: Option<&str>) -> Option<DateWindow> {
    custom_range(parse_date_param(date_from), parse_date_param(date_to))
}

fn lock_connection(state: &StatisticsState) -> Result<MutexGuard<'_, Connection>, Error> {
    state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        category::{Category, create_category},
        crypto::FieldCipher,
        db::initialize,
        endpoints,
        expense::{Expense, create_expense},
        user::UserId,
    };

    use super::{
        MAX_TREND_BUCKETS, StatisticsState, get_category_statistics, get_comparison_statistics,
        get_summary_statistics, get_trend_statistics, get_vendor_statistics,
    };

    const SECRET: &str = "correct horse battery staple";

    fn alice() -> UserId {
        UserId::new("alice")
    }

    /// Two categories and a handful of expenses in February and March 2024.
    fn get_test_state() -> StatisticsState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");
        let cipher = FieldCipher::from_secret(SECRET);

        let groceries = create_category(
            Category::build(alice(), "Groceries").color("#34d399").icon("shopping-basket"),
            &connection,
        )
        .unwrap();
        let transport = create_category(Category::build(alice(), "Transport"), &connection).unwrap();

        let expenses = [
            (40.0, date!(2024 - 02 - 10), Some(groceries.id), Some("Linella"), None),
            (30.0, date!(2024 - 03 - 04), Some(groceries.id), Some("Linella"), None),
            (20.0, date!(2024 - 03 - 07), Some(transport.id), Some("Petrom"), None),
            (
                10.0,
                date!(2024 - 03 - 07),
                Some(transport.id),
                Some("Linella"),
                Some(r#"{"category": "groceries"}"#),
            ),
            (5.0, date!(2024 - 03 - 20), None, None, None),
            (0.0, date!(2024 - 03 - 21), Some(transport.id), None, None),
        ];

        for (amount, day, category_id, vendor, metadata) in expenses {
            create_expense(
                Expense::build(alice(), amount, day)
                    .category_id(category_id)
                    .vendor(vendor.map(|vendor| cipher.encrypt(vendor).unwrap()))
                    .encrypted_metadata(metadata.map(|metadata| cipher.encrypt(metadata).unwrap())),
                &connection,
            )
            .unwrap();
        }

        StatisticsState {
            db_connection: Arc::new(Mutex::new(connection)),
            cipher: Arc::new(cipher),
            local_timezone: "Etc/UTC".to_owned(),
            user_id: alice(),
        }
    }

    fn get_test_server() -> TestServer {
        let app = Router::new()
            .route(endpoints::STATISTICS_SUMMARY, get(get_summary_statistics))
            .route(endpoints::STATISTICS_BY_CATEGORY, get(get_category_statistics))
            .route(endpoints::STATISTICS_BY_VENDOR, get(get_vendor_statistics))
            .route(endpoints::STATISTICS_TREND, get(get_trend_statistics))
            .route(endpoints::STATISTICS_COMPARISON, get(get_comparison_statistics))
            .with_state(get_test_state());

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn summary_for_target_date() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_SUMMARY)
            .add_query_param("target_date", "2024-03-07")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "current_month": {"total": 65.0, "count": 5, "average": 13.0},
            "current_week": {"total": 60.0, "count": 3},
            "today": {"total": 30.0, "count": 2},
            "comparison_previous_month": {
                "previous_total": 40.0,
                "change_amount": 25.0,
                "change_percentage": 62.5,
                "trend": "up"
            }
        }));
    }

    #[tokio::test]
    async fn summary_rejects_malformed_target_date() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_SUMMARY)
            .add_query_param("target_date", "07/03/2024")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn summary_at_latest_supported_date() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_SUMMARY)
            .add_query_param("target_date", "9999-12-31")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["today"]["count"], 0);
    }

    #[tokio::test]
    async fn summary_at_earliest_supported_date() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_SUMMARY)
            .add_query_param("date_from", "-9999-01-01")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["current_week"]["count"], 0);
    }

    #[tokio::test]
    async fn summary_accepts_unpadded_target_date() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_SUMMARY)
            .add_query_param("target_date", "2024-3-7")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["today"]["count"], 2);
    }

    #[tokio::test]
    async fn summary_defaults_to_today() {
        let server = get_test_server();

        server.get(endpoints::STATISTICS_SUMMARY).await.assert_status_ok();
    }

    #[tokio::test]
    async fn categories_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_BY_CATEGORY)
            .add_query_param("period", "month")
            .add_query_param("target_date", "2024-03-15")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["period"], "2024-03");
        assert_eq!(body["grand_total"], 65.0);

        let categories = body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0]["category_name"], "Groceries");
        assert_eq!(categories[0]["total"], 40.0);
        assert_eq!(categories[0]["count"], 2);
        assert_eq!(categories[0]["percentage"], 61.54);
        assert_eq!(categories[0]["color"], "#34d399");
        assert_eq!(categories[1]["category_name"], "Transport");
        assert_eq!(categories[1]["total"], 20.0);
        assert_eq!(categories[2]["category_id"], "uncategorized");
        assert_eq!(categories[2]["category_name"], "Fără categorie");
    }

    #[tokio::test]
    async fn categories_for_custom_range() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_BY_CATEGORY)
            .add_query_param("date_from", "2024-03-07")
            .add_query_param("date_to", "2024-03-01")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["period"], "2024-03-01 → 2024-03-07");
        assert_eq!(body["grand_total"], 60.0);
    }

    #[tokio::test]
    async fn categories_with_no_expenses_have_one_empty_bucket() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_BY_CATEGORY)
            .add_query_param("target_date", "2020-01-01")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "period": "2020-01",
            "grand_total": 0.0,
            "categories": [{
                "category_id": "uncategorized",
                "category_name": "Fără categorie",
                "color": "#94a3b8",
                "icon": "tag",
                "total": 0.0,
                "count": 0,
                "percentage": 0.0
            }]
        }));
    }

    #[tokio::test]
    async fn vendors_are_merged_and_limited() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_BY_VENDOR)
            .add_query_param("period", "all")
            .add_query_param("limit", "1")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "period": "all",
            "grand_total": 80.0,
            "top_vendors": [
                {"vendor": "Linella", "total": 80.0, "count": 3, "percentage": 100.0}
            ]
        }));
    }

    #[tokio::test]
    async fn vendors_for_year() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_BY_VENDOR)
            .add_query_param("period", "year")
            .add_query_param("target_date", "2024-06-01")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["period"], "2024");
        assert_eq!(body["grand_total"], 100.0);
        assert_eq!(body["top_vendors"][0]["vendor"], "Linella");
        assert_eq!(body["top_vendors"][0]["percentage"], 80.0);
        assert_eq!(body["top_vendors"][1]["vendor"], "Petrom");
        assert_eq!(body["top_vendors"][1]["percentage"], 20.0);
    }

    #[tokio::test]
    async fn monthly_trend_ends_at_target_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_TREND)
            .add_query_param("trend_type", "monthly")
            .add_query_param("range_value", "3")
            .add_query_param("target_date", "2024-03-31")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "type": "monthly",
            "range": 3,
            "data": [
                {"month": "2024-01", "total": 0.0, "count": 0},
                {"month": "2024-02", "total": 40.0, "count": 1},
                {"month": "2024-03", "total": 65.0, "count": 5}
            ]
        }));
    }

    #[tokio::test]
    async fn custom_range_trend_is_daily() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_TREND)
            .add_query_param("trend_type", "weekly")
            .add_query_param("date_from", "2024-03-06")
            .add_query_param("date_to", "2024-03-07")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "type": "daily",
            "range": 2,
            "data": [
                {"date": "2024-03-06", "total": 0.0, "count": 0},
                {"date": "2024-03-07", "total": 30.0, "count": 2}
            ]
        }));
    }

    #[tokio::test]
    async fn weekly_trend_has_week_bounds() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_TREND)
            .add_query_param("trend_type", "weekly")
            .add_query_param("range_value", "1")
            .add_query_param("target_date", "2024-03-07")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "type": "weekly",
            "range": 1,
            "data": [
                {"week_start": "2024-03-01", "week_end": "2024-03-07", "total": 60.0, "count": 3}
            ]
        }));
    }

    #[tokio::test]
    async fn unknown_trend_type_has_no_data() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_TREND)
            .add_query_param("trend_type", "hourly")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"type": "hourly", "range": 30, "data": []}));
    }

    #[tokio::test]
    async fn trend_range_is_capped() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_TREND)
            .add_query_param("trend_type", "daily")
            .add_query_param("range_value", 100_000)
            .add_query_param("target_date", "2024-03-07")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["range"], MAX_TREND_BUCKETS);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(MAX_TREND_BUCKETS as usize));
    }

    #[tokio::test]
    async fn comparison_of_two_months() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_COMPARISON)
            .add_query_param("current_period", "2024-03")
            .add_query_param("previous_period", "2024-02")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "current": {"period": "2024-03", "total": 65.0, "count": 5},
            "previous": {"period": "2024-02", "total": 40.0, "count": 1},
            "change": {"amount": 25.0, "percentage": 62.5, "trend": "up"}
        }));
    }

    #[tokio::test]
    async fn comparison_against_empty_month_is_stable() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_COMPARISON)
            .add_query_param("current_period", "2024-02")
            .add_query_param("previous_period", "2024-01")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["change"], json!({"amount": 40.0, "percentage": 0.0, "trend": "stable"}));
    }

    #[tokio::test]
    async fn comparison_rejects_malformed_periods() {
        let server = get_test_server();

        for (current, previous) in [("2024-13", "2024-02"), ("2024-03", "March"), ("", "2024-02")] {
            let response = server
                .get(endpoints::STATISTICS_COMPARISON)
                .add_query_param("current_period", current)
                .add_query_param("previous_period", previous)
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn comparison_requires_both_periods() {
        let server = get_test_server();

        server
            .get(endpoints::STATISTICS_COMPARISON)
            .add_query_param("current_period", "2024-03")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
