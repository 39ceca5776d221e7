//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, session::SessionId};

// ============================================================================
// MODELS
// ============================================================================

/// An entry in a session's ledger, i.e. an event where money was either
/// earned (credit) or spent (debit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, generated by the server on insert.
    pub id: Uuid,
    /// A text description of what the transaction was for.
    pub title: String,
    /// The signed amount of money: positive for credits, negative for debits.
    ///
    /// Amounts are stored already sign-adjusted so that summing a session's
    /// rows yields its balance directly.
    pub amount: f64,
    /// The session the transaction belongs to.
    pub session_id: SessionId,
    /// When the transaction was recorded, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Whether a transaction adds money to a session's balance or removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned. Stored with a positive amount.
    Credit,
    /// Money spent. Stored with the supplied amount negated.
    Debit,
}

impl TransactionType {
    /// Apply the sign convention to a strictly positive client-supplied amount.
    pub fn signed_amount(self, amount: f64) -> f64 {
        match self {
            TransactionType::Credit => amount,
            TransactionType::Debit => -amount,
        }
    }
}

/// The data needed to insert a transaction.
///
/// `amount` must already carry the sign for the transaction's type, see
/// [TransactionType::signed_amount].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A text description of what the transaction is for.
    pub title: String,
    /// The signed amount of money.
    pub amount: f64,
    /// The session the transaction belongs to.
    pub session_id: SessionId,
}

/// A session's running balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// The sum of the signed amounts of the session's transactions.
    pub amount: f64,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// The transaction's ID and creation timestamp are generated here; callers
/// only choose the title, the signed amount and the session.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transactions (id, title, amount, session_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, title, amount, session_id, created_at",
        )?
        .query_one(
            (
                Uuid::new_v4(),
                &new_transaction.title,
                new_transaction.amount,
                new_transaction.session_id.as_uuid(),
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// The row must also belong to `session_id`: another session's transaction is
/// reported as missing rather than revealing that the ID exists.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction in the session,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(
    id: Uuid,
    session_id: SessionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let session_uuid = session_id.as_uuid();
    let transaction = connection
        .prepare(
            "SELECT id, title, amount, session_id, created_at FROM transactions
             WHERE id = :id AND session_id = :session_id",
        )?
        .query_one(
            &[(":id", &id), (":session_id", &session_uuid)],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all of a session's transactions, in the order the store keeps
/// them.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_for_session(
    session_id: SessionId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let session_uuid = session_id.as_uuid();

    connection
        .prepare(
            "SELECT id, title, amount, session_id, created_at FROM transactions
             WHERE session_id = :session_id",
        )?
        .query_map(&[(":session_id", &session_uuid)], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Sum the signed amounts of a session's transactions.
///
/// A session with no transactions sums to `0.0`, never null.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn sum_transactions_for_session(
    session_id: SessionId,
    connection: &Connection,
) -> Result<TransactionSummary, Error> {
    let session_uuid = session_id.as_uuid();
    let amount = connection
        .prepare(
            "SELECT COALESCE(SUM(amount), 0.0) AS amount FROM transactions
             WHERE session_id = :session_id",
        )?
        .query_one(&[(":session_id", &session_uuid)], |row| row.get(0))?;

    Ok(TransactionSummary { amount })
}

/// Create the transactions table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id BLOB PRIMARY KEY,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                session_id BLOB NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Index used by the session filter on every read endpoint.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_session_id ON transactions(session_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let session_id = SessionId::from(row.get::<_, Uuid>(3)?);
    let created_at = row.get(4)?;

    Ok(Transaction {
        id,
        title,
        amount,
        session_id,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
