//! Bank transaction management.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and managing transactions
//! - The retrieval strategies that evaluate filter criteria
//! - JSON endpoints for listing, grouping, creating, updating, and deleting
//!   transactions

mod bank_groups_endpoint;
mod core;
mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod kind;
mod list_transactions_endpoint;
pub(crate) mod query;
mod update_transaction_endpoint;

pub use bank_groups_endpoint::bank_groups_endpoint;
pub use core::{
    Transaction, TransactionBuilder, create_transaction, create_transaction_table,
    delete_transaction, get_transaction, map_transaction_row, update_transaction,
};
pub use create_transaction_endpoint::create_transaction_endpoint;
pub use delete_transaction_endpoint::delete_transaction_endpoint;
pub use kind::TransactionKind;
pub use list_transactions_endpoint::list_transactions_endpoint;
pub use query::{get_bank_names, get_transactions};
pub use update_transaction_endpoint::update_transaction_endpoint;
