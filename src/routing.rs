//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState, endpoints,
    health::{get_404_not_found, get_health, get_root},
    statistics::{
        get_category_statistics, get_comparison_statistics, get_summary_statistics,
        get_trend_statistics, get_vendor_statistics,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let statistics_routes = Router::new()
        .route(endpoints::STATISTICS_SUMMARY, get(get_summary_statistics))
        .route(
            endpoints::STATISTICS_BY_CATEGORY,
            get(get_category_statistics),
        )
        .route(endpoints::STATISTICS_BY_VENDOR, get(get_vendor_statistics))
        .route(endpoints::STATISTICS_TREND, get(get_trend_statistics))
        .route(
            endpoints::STATISTICS_COMPARISON,
            get(get_comparison_statistics),
        );

    Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(endpoints::HEALTH, get(get_health))
        .merge(statistics_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}
