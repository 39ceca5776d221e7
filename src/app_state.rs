//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Whether to mark the session cookie as `Secure`.
    ///
    /// Should be true in production deployments, where the API is served over
    /// HTTPS, and false in local development.
    pub cookie_secure: bool,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the transactions
    /// table if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, cookie_secure: bool) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            cookie_secure,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
