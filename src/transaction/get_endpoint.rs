//! Defines the endpoint for fetching one transaction by its identifier.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, Error, session::SessionId, transaction::Transaction};

use super::core::get_transaction;

/// The response body for fetching a single transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetTransactionResponse {
    /// The requested transaction.
    pub data: Transaction,
}

/// A route handler for fetching one of the active session's transactions.
///
/// A malformed identifier is rejected without querying the store. Malformed
/// identifiers and query failures share one client-error response; only a
/// well-formed identifier with no matching row is a 404.
pub async fn get_transaction_endpoint(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(transaction_id): Path<String>,
) -> Response {
    let transaction_id = match Uuid::parse_str(&transaction_id) {
        Ok(transaction_id) => transaction_id,
        Err(error) => {
            return Error::TransactionLookupFailed(error.to_string()).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::TransactionLookupFailed("database lock poisoned".to_owned())
                .into_response();
        }
    };

    match get_transaction(transaction_id, session_id, &connection) {
        Ok(transaction) => (
            StatusCode::OK,
            Json(GetTransactionResponse { data: transaction }),
        )
            .into_response(),
        Err(Error::NotFound) => Error::NotFound.into_response(),
        Err(error) => {
            tracing::error!("could not get transaction: {error}");
            Error::TransactionLookupFailed(error.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use uuid::Uuid;

    use crate::{
        AppState,
        session::SessionId,
        transaction::core::{NewTransaction, Transaction, create_transaction},
    };

    use super::{GetTransactionResponse, get_transaction_endpoint};

    fn get_test_state() -> AppState {
        let conn = Connection::open_in_memory().unwrap();

        AppState::new(conn, false).unwrap()
    }

    fn insert_transaction(state: &AppState, session_id: SessionId) -> Transaction {
        let connection = state.db_connection.lock().unwrap();

        create_transaction(
            NewTransaction {
                title: "Rust Pie".to_owned(),
                amount: 3.14,
                session_id,
            },
            &connection,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn get_transaction_succeeds() {
        let state = get_test_state();
        let session_id = SessionId::generate();
        let inserted = insert_transaction(&state, session_id);

        let response = get_transaction_endpoint(
            State(state),
            Extension(session_id),
            Path(inserted.id.to_string()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let got: GetTransactionResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(got.data, inserted);
    }

    #[tokio::test]
    async fn get_unknown_transaction_is_not_found() {
        let state = get_test_state();
        let session_id = SessionId::generate();
        insert_transaction(&state, session_id);

        let response = get_transaction_endpoint(
            State(state),
            Extension(session_id),
            Path(Uuid::new_v4().to_string()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_other_sessions_transaction_is_not_found() {
        let state = get_test_state();
        let inserted = insert_transaction(&state, SessionId::generate());

        let response = get_transaction_endpoint(
            State(state),
            Extension(SessionId::generate()),
            Path(inserted.id.to_string()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_with_malformed_id_is_a_client_error() {
        let state = get_test_state();

        let response = get_transaction_endpoint(
            State(state),
            Extension(SessionId::generate()),
            Path("not-a-transaction-id".to_owned()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
