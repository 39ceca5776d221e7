//! Defines the endpoint for listing a session's transactions.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, session::SessionId, transaction::Transaction};

use super::core::get_transactions_for_session;

/// The response body for listing transactions.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListTransactionsResponse {
    /// The session's transactions.
    pub data: Vec<Transaction>,
}

/// A route handler for listing all of the active session's transactions.
pub async fn list_transactions_endpoint(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_transactions_for_session(session_id, &connection) {
        Ok(transactions) => (
            StatusCode::OK,
            Json(ListTransactionsResponse { data: transactions }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not list transactions: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Extension, extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        AppState,
        session::SessionId,
        transaction::core::{NewTransaction, create_transaction},
    };

    use super::{ListTransactionsResponse, list_transactions_endpoint};

    fn get_test_state() -> AppState {
        let conn = Connection::open_in_memory().unwrap();

        AppState::new(conn, false).unwrap()
    }

    #[tokio::test]
    async fn list_returns_the_sessions_transactions() {
        let state = get_test_state();
        let session_id = SessionId::generate();
        let inserted = {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                NewTransaction {
                    title: "Salary".to_owned(),
                    amount: 1000.0,
                    session_id,
                },
                &connection,
            )
            .unwrap()
        };

        let response =
            list_transactions_endpoint(State(state), Extension(session_id)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let got: ListTransactionsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(got.data, vec![inserted]);
    }

    #[tokio::test]
    async fn list_is_empty_for_fresh_session() {
        let state = get_test_state();

        let response =
            list_transactions_endpoint(State(state), Extension(SessionId::generate())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let got: ListTransactionsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(got.data, vec![]);
    }
}
