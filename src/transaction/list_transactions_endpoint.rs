//! Defines the endpoint for listing transactions with optional filters.

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
    ledger::{self, FilterCriteria},
    transaction::{
        Transaction,
        query::{get_bank_names, get_transactions},
    },
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The response body for the transaction listing.
#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    /// The transactions selected by the filter criteria, most recent first.
    pub transactions: Vec<Transaction>,
    /// The net balance of the selected transactions.
    pub balance: Decimal,
    /// The distinct bank names available for filtering.
    pub banks: Vec<String>,
}

/// A route handler for listing transactions.
///
/// Any combination of the `month`, `year`, `category`, and `bank` query
/// parameters may be supplied; the reported balance is always computed over
/// the same filtered set that is returned.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(criteria): Query<FilterCriteria>,
) -> Result<Json<TransactionListResponse>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transactions(&criteria, &connection)?;
    let balance = ledger::balance(&transactions);
    let banks = get_bank_names(&connection)?;

    Ok(Json(TransactionListResponse {
        transactions,
        balance,
        banks,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        db::initialize,
        ledger::FilterCriteria,
        transaction::{Transaction, TransactionKind, create_transaction},
    };

    use super::{ListTransactionsState, list_transactions_endpoint};

    fn get_test_state() -> ListTransactionsState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        create_transaction(
            Transaction::build(
                "100".parse().unwrap(),
                date!(2024 - 01 - 10),
                TransactionKind::Deposit,
            )
            .bank(Some("HDFC".to_owned())),
            &conn,
        )
        .expect("Could not create transaction");
        create_transaction(
            Transaction::build(
                "30".parse().unwrap(),
                date!(2024 - 02 - 05),
                TransactionKind::Withdrawal,
            ),
            &conn,
        )
        .expect("Could not create transaction");

        ListTransactionsState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn lists_transactions_with_balance_and_banks() {
        let state = get_test_state();

        let response =
            list_transactions_endpoint(State(state), Query(FilterCriteria::default()))
                .await
                .expect("Could not list transactions");

        assert_eq!(response.transactions.len(), 2);
        assert_eq!(response.balance, "70.00".parse::<Decimal>().unwrap());
        assert_eq!(response.banks, vec!["HDFC".to_owned()]);
    }

    #[tokio::test]
    async fn balance_is_computed_over_the_filtered_set() {
        let state = get_test_state();
        let criteria = FilterCriteria {
            month: Some(1),
            ..Default::default()
        };

        let response = list_transactions_endpoint(State(state), Query(criteria))
            .await
            .expect("Could not list transactions");

        assert_eq!(response.transactions.len(), 1);
        assert_eq!(response.balance, "100.00".parse::<Decimal>().unwrap());
    }
}
