//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// A single field-level problem found while validating a request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// The name of the offending request body field.
    pub field: &'static str,
    /// What was wrong with the field's value.
    pub message: String,
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The session cookie is missing from the request, or its value is not a
    /// valid session identifier.
    ///
    /// Possession of a well-formed cookie value is the only access control in
    /// this system, so both cases are reported identically.
    #[error("the session cookie is missing or invalid")]
    SessionCookieMissing,

    /// The request body could not be parsed as transaction data.
    ///
    /// Covers malformed JSON, missing fields and fields of the wrong type,
    /// including a `type` value other than `credit` or `debit`.
    #[error("could not parse the request body: {0}")]
    InvalidRequestBody(String),

    /// The request body parsed but one or more fields failed validation.
    #[error("invalid transaction data")]
    InvalidTransactionData(Vec<ValidationIssue>),

    /// A transaction lookup by identifier failed.
    ///
    /// The get-by-id endpoint reports malformed identifiers and query
    /// failures as one client-error category; only a clean no-match is
    /// reported as [Error::NotFound].
    #[error("could not look up transaction: {0}")]
    TransactionLookupFailed(String),

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
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::SessionCookieMissing => {
                error_response(StatusCode::UNAUTHORIZED, "unauthorized", None)
            }
            Error::InvalidRequestBody(message) => error_response(
                StatusCode::BAD_REQUEST,
                "invalid transaction data",
                Some(json!([{ "message": message }])),
            ),
            Error::InvalidTransactionData(issues) => error_response(
                StatusCode::BAD_REQUEST,
                "invalid transaction data",
                Some(json!(issues)),
            ),
            Error::TransactionLookupFailed(message) => error_response(
                StatusCode::BAD_REQUEST,
                &format!("invalid transaction ID or lookup failed: {message}"),
                None,
            ),
            Error::NotFound => error_response(StatusCode::NOT_FOUND, "transaction not found", None),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an unexpected error occurred",
                    None,
                )
            }
        }
    }
}

/// The JSON body returned for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

fn error_response(status_code: StatusCode, message: &str, details: Option<Value>) -> Response {
    (
        status_code,
        Json(ErrorBody {
            error: message.to_owned(),
            details,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::{Error, ValidationIssue};

    #[test]
    fn sql_errors_map_to_internal_server_error() {
        let response = Error::from(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn query_returned_no_rows_maps_to_not_found() {
        let error = Error::from(rusqlite::Error::QueryReturnedNoRows);

        assert_eq!(error, Error::NotFound);
        assert_eq!(
            error.into_response().status(),
            StatusCode::NOT_FOUND,
            "expected a missing row to surface as 404"
        );
    }

    #[test]
    fn validation_issues_map_to_bad_request() {
        let issues = vec![ValidationIssue {
            field: "title",
            message: "title must not be empty".to_owned(),
        }];

        let response = Error::InvalidTransactionData(issues).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_session_cookie_maps_to_unauthorized() {
        let response = Error::SessionCookieMissing.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
