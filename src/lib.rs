//! Expense Stats is a REST API for statistics over personal expenses.
//!
//! It reads expenses and categories from a SQLite database and serves JSON
//! summaries, breakdowns by category and vendor, time series of spending, and
//! month over month comparisons. Vendor names and expense metadata are stored
//! encrypted and are only decrypted in memory while a response is built.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod category;
mod config;
mod crypto;
mod database_id;
mod db;
mod endpoints;
mod error;
mod expense;
mod health;
mod logging;
mod routing;
mod statistics;
mod timezone;
mod user;

pub use app_state::AppState;
pub use category::{Category, CategoryBuilder, create_category};
pub use config::Config;
pub use crypto::{CryptoError, Decrypt, FieldCipher};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use expense::{Expense, ExpenseBuilder, create_expense};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use user::UserId;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
