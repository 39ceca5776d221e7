//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    error::ValidationIssue,
    session::{resolve_or_create_session, set_session_cookie},
    transaction::TransactionType,
};

use super::core::{NewTransaction, create_transaction};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Whether to mark a newly issued session cookie as `Secure`.
    pub cookie_secure: bool,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            cookie_secure: state.cookie_secure,
        }
    }
}

/// The request body for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction. Must not be empty.
    pub title: String,
    /// The value of the transaction. Must be strictly positive; the sign is
    /// chosen by `type`.
    pub amount: f64,
    /// Whether the transaction is a credit or a debit.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl TransactionForm {
    fn validate(&self) -> Result<(), Error> {
        let mut issues = Vec::new();

        if self.title.is_empty() {
            issues.push(ValidationIssue {
                field: "title",
                message: "title must not be empty".to_owned(),
            });
        }

        if self.amount <= 0.0 {
            issues.push(ValidationIssue {
                field: "amount",
                message: format!("amount must be greater than zero, got {}", self.amount),
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidTransactionData(issues))
        }
    }
}

/// The response body acknowledging a created transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    /// A human readable confirmation.
    pub message: String,
}

/// A route handler for creating a new transaction.
///
/// When the request carries no session cookie, a new session identifier is
/// generated and set as a cookie on the response; an existing cookie is never
/// overwritten. The stored amount is the supplied amount, negated for debits.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    jar: CookieJar,
    body: Result<Json<TransactionForm>, JsonRejection>,
) -> Response {
    let Json(form) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return Error::InvalidRequestBody(rejection.body_text()).into_response();
        }
    };

    if let Err(error) = form.validate() {
        return error.into_response();
    }

    let (session_id, is_new_session) = resolve_or_create_session(&jar);
    let jar = if is_new_session {
        set_session_cookie(jar, session_id, state.cookie_secure)
    } else {
        jar
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let new_transaction = NewTransaction {
        title: form.title,
        amount: form.transaction_type.signed_amount(form.amount),
        session_id,
    };

    match create_transaction(new_transaction, &connection) {
        Ok(_) => (
            StatusCode::CREATED,
            jar,
            Json(CreateTransactionResponse {
                message: "transaction created".to_owned(),
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_response()
        }
    }
}
