//! Creates the application's database schema.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Initialize the database schema.
///
/// Runs inside an exclusive SQL transaction so that concurrent server starts
/// against the same file cannot interleave schema creation.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let sql_transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&sql_transaction)?;

    sql_transaction.commit()?;

    Ok(())
}
