//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the credit/debit sign convention
//! - Database functions for storing, querying, and summing transactions
//! - The HTTP handlers for the list, summary, get-by-id and create endpoints

mod core;
mod create_endpoint;
mod get_endpoint;
mod list_endpoint;
mod summary_endpoint;

pub use core::{
    Transaction, TransactionSummary, TransactionType, create_transaction_table,
    map_transaction_row,
};
pub use create_endpoint::{
    CreateTransactionResponse, CreateTransactionState, TransactionForm,
    create_transaction_endpoint,
};
pub use get_endpoint::{GetTransactionResponse, get_transaction_endpoint};
pub use list_endpoint::{ListTransactionsResponse, list_transactions_endpoint};
pub use summary_endpoint::{GetSummaryResponse, get_summary_endpoint};
