//! Application router configuration with session-guarded and open route definitions.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    session::session_guard,
    transaction::{
        create_transaction_endpoint, get_summary_endpoint, get_transaction_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// The read routes require the session cookie and reject cookieless requests
/// with 401; the create route issues the cookie itself and is left open.
pub fn build_router(state: AppState) -> Router {
    let open_routes = Router::new().route(endpoints::TRANSACTIONS, post(create_transaction_endpoint));

    let session_routes = Router::new()
        .route(endpoints::TRANSACTIONS, get(list_transactions_endpoint))
        .route(endpoints::TRANSACTIONS_SUMMARY, get(get_summary_endpoint))
        .route(endpoints::TRANSACTION, get(get_transaction_endpoint))
        .route_layer(middleware::from_fn(session_guard));

    session_routes.merge(open_routes).with_state(state)
}
