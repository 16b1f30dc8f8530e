//! Defines the endpoint for the statement-like per-bank view.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    AppState, Error,
    ledger::{self, BankGroup, FilterCriteria},
    transaction::query::get_transactions,
};

/// The state needed to group transactions by bank.
#[derive(Debug, Clone)]
pub struct BankGroupsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BankGroupsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The response body for the per-bank view.
#[derive(Debug, Serialize)]
pub struct BankGroupsResponse {
    /// One entry per bank, in first-encounter order, with its own balance.
    pub groups: Vec<BankGroup>,
    /// The net balance across all groups.
    pub balance: Decimal,
}

/// A route handler that partitions the filtered transactions by bank.
///
/// Transactions without a bank name are grouped under `"Other"`. The group
/// balances always sum to the reported total balance.
pub async fn bank_groups_endpoint(
    State(state): State<BankGroupsState>,
    Query(criteria): Query<FilterCriteria>,
) -> Result<Json<BankGroupsResponse>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transactions(&criteria, &connection)?;
    let balance = ledger::balance(&transactions);
    let groups = ledger::group_by_bank(&transactions);

    Ok(Json(BankGroupsResponse { groups, balance }))
}
