//! Coinpurse is a minimal personal finance ledger served over HTTP.
//!
//! Clients create credit/debit transactions and later list them, fetch one by
//! its identifier, or retrieve a running balance. All data is scoped to an
//! anonymous session identified by a browser cookie; there is no user model.
//!
//! This library provides a JSON REST API backed by a single SQLite file.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod db;
pub mod endpoints;
mod error;
mod routing;
mod session;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use error::{Error, ValidationIssue};
pub use routing::build_router;
pub use session::{SESSION_COOKIE, SessionId};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
