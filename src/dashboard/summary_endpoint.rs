//! Defines the endpoint for the dashboard summary.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    AppState, Error,
    contribution::{
        ContributionWithFriend, FriendTotal, get_contributions_with_friends, get_friend_totals,
        get_total_contributions,
    },
    ledger::{self, FilterCriteria},
    transaction::{Transaction, query::get_transactions},
};

/// The state needed to build the dashboard summary.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions and contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// How many recent rows the dashboard shows per section.
const RECENT_LIMIT: usize = 5;

/// The response body for the dashboard summary.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    /// Each friend's contribution total, largest first.
    pub friend_totals: Vec<FriendTotal>,
    /// The sum of all contribution amounts.
    pub total_contributions: Decimal,
    /// The net balance over every recorded transaction.
    pub current_balance: Decimal,
    /// The five most recent contributions, joined with friend names.
    pub recent_contributions: Vec<ContributionWithFriend>,
    /// The five most recent transactions.
    pub recent_transactions: Vec<Transaction>,
}

/// A route handler for the dashboard summary.
///
/// The balance is computed over the full, unfiltered transaction history so
/// that it agrees with an unfiltered transaction listing.
pub async fn dashboard_endpoint(
    State(state): State<DashboardState>,
) -> Result<Json<DashboardSummary>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transactions(&FilterCriteria::default(), &connection)?;
    let current_balance = ledger::balance(&transactions);

    let mut recent_contributions =
        get_contributions_with_friends(&FilterCriteria::default(), &connection)?;
    recent_contributions.truncate(RECENT_LIMIT);

    let mut recent_transactions = transactions;
    recent_transactions.truncate(RECENT_LIMIT);

    Ok(Json(DashboardSummary {
        friend_totals: get_friend_totals(&connection)?,
        total_contributions: get_total_contributions(&connection)?,
        current_balance,
        recent_contributions,
        recent_transactions,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        contribution::{NewContribution, create_contribution},
        db::initialize,
        friend::{NewFriend, create_friend},
        transaction::{Transaction, TransactionKind, create_transaction},
    };

    use super::{DashboardState, dashboard_endpoint};

    fn get_test_state() -> DashboardState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let ravi = create_friend(
            NewFriend {
                name: "Ravi".to_owned(),
                email: None,
            },
            &conn,
        )
        .expect("Could not create friend");

        for day in 1..=7 {
            create_contribution(
                NewContribution {
                    friend_id: ravi.id,
                    amount: "10".parse().unwrap(),
                    notes: None,
                    date: date!(2024 - 01 - 01).replace_day(day).unwrap(),
                },
                &conn,
            )
            .expect("Could not create contribution");
        }

        create_transaction(
            Transaction::build(
                "100".parse().unwrap(),
                date!(2024 - 01 - 10),
                TransactionKind::Deposit,
            ),
            &conn,
        )
        .expect("Could not create transaction");
        create_transaction(
            Transaction::build(
                "30".parse().unwrap(),
                date!(2024 - 01 - 12),
                TransactionKind::Charges,
            ),
            &conn,
        )
        .expect("Could not create transaction");

        DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn summary_reports_totals_and_caps_recent_rows() {
        let state = get_test_state();

        let summary = dashboard_endpoint(State(state))
            .await
            .expect("Could not get dashboard summary");

        assert_eq!(summary.friend_totals.len(), 1);
        assert_eq!(
            summary.total_contributions,
            "70.00".parse::<Decimal>().unwrap()
        );
        assert_eq!(
            summary.current_balance,
            "70.00".parse::<Decimal>().unwrap()
        );
        assert_eq!(summary.recent_contributions.len(), 5);
        assert_eq!(summary.recent_transactions.len(), 2);
    }

    #[tokio::test]
    async fn recent_contributions_are_most_recent_first() {
        let state = get_test_state();

        let summary = dashboard_endpoint(State(state))
            .await
            .expect("Could not get dashboard summary");

        assert_eq!(
            summary.recent_contributions[0].contribution.date,
            date!(2024 - 01 - 07)
        );
    }
}
