//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A month token did not have the form `YYYY-MM` or named a month that does not exist.
    ///
    /// This is the only error caused by the shape of a client's request that
    /// the statistics endpoints report, every other malformed parameter falls
    /// back to a default.
    #[error("invalid period \"{0}\", use the format YYYY-MM")]
    InvalidPeriod(String),

    /// An explicitly requested target date could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date \"{0}\", use the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A request or response body could not be read.
    #[error("could not read the message body")]
    BodyReadError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, summary) = match self {
            Error::InvalidPeriod(_) | Error::InvalidDate(_) => {
                (StatusCode::BAD_REQUEST, "invalid input")
            }
            Error::NotFound => (StatusCode::NOT_FOUND, "not found"),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal server error",
                        "message": "An unexpected error occurred, check the server logs for more details."
                    })),
                )
                    .into_response();
            }
        };

        let body = Json(json!({
            "error": summary,
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn query_returned_no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn invalid_input_is_a_bad_request() {
        let response = Error::InvalidPeriod("2024-13".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = Error::InvalidDate("yesterday".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_are_server_errors() {
        let response = Error::DatabaseLockError.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = Error::InvalidTimezoneError("Mars/Olympus".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_is_not_found() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
