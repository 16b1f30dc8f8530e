//! Defines the endpoint for updating an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionBuilder, core::update_transaction},
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for replacing the fields of a transaction.
pub async fn update_transaction_endpoint(
    State(state): State<UpdateTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(builder): Json<TransactionBuilder>,
) -> Result<Json<Transaction>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = update_transaction(transaction_id, builder, &connection)?;

    Ok(Json(transaction))
}
