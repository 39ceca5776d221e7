//! Defines the endpoint for a session's running balance.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, session::SessionId, transaction::TransactionSummary};

use super::core::sum_transactions_for_session;

/// The response body for the summary endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetSummaryResponse {
    /// The session's running balance.
    pub data: TransactionSummary,
}

/// A route handler for the active session's running balance.
///
/// A session with no transactions reports a balance of `0.0`.
pub async fn get_summary_endpoint(
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

    match sum_transactions_for_session(session_id, &connection) {
        Ok(summary) => (StatusCode::OK, Json(GetSummaryResponse { data: summary })).into_response(),
        Err(error) => {
            tracing::error!("could not summarize transactions: {error}");
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

    use super::{GetSummaryResponse, get_summary_endpoint};

    fn get_test_state() -> AppState {
        let conn = Connection::open_in_memory().unwrap();

        AppState::new(conn, false).unwrap()
    }

    async fn get_summary_amount(state: AppState, session_id: SessionId) -> f64 {
        let response = get_summary_endpoint(State(state), Extension(session_id)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let got: GetSummaryResponse = serde_json::from_slice(&body).unwrap();

        got.data.amount
    }

    #[tokio::test]
    async fn summary_is_the_signed_sum() {
        let state = get_test_state();
        let session_id = SessionId::generate();
        {
            let connection = state.db_connection.lock().unwrap();
            for (title, amount) in [("Salary", 1000.0), ("Rent", -400.0)] {
                create_transaction(
                    NewTransaction {
                        title: title.to_owned(),
                        amount,
                        session_id,
                    },
                    &connection,
                )
                .unwrap();
            }
        }

        let amount = get_summary_amount(state, session_id).await;

        assert_eq!(amount, 600.0);
    }

    #[tokio::test]
    async fn summary_is_zero_for_fresh_session() {
        let state = get_test_state();

        let amount = get_summary_amount(state, SessionId::generate()).await;

        assert_eq!(amount, 0.0);
    }
}
