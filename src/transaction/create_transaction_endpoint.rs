//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionBuilder, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(builder): Json<TransactionBuilder>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = create_transaction(builder, &connection)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
