//! Defines the endpoint for listing fund contributions with running totals.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    fund_contribution::core::get_fund_contributions,
    ledger::{FilterCriteria, RunningTotal, cumulative_totals},
};

/// The state needed to list fund contributions.
#[derive(Debug, Clone)]
pub struct ListFundContributionsState {
    /// The database connection for reading fund contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListFundContributionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing fund contributions in date order, each
/// decorated with the running total up to and including it.
///
/// The `month` and `year` query parameters narrow the listing; running totals
/// are computed over the filtered sequence.
pub async fn list_fund_contributions_endpoint(
    State(state): State<ListFundContributionsState>,
    Query(criteria): Query<FilterCriteria>,
) -> Result<Json<Vec<RunningTotal>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let contributions = get_fund_contributions(&criteria, &connection)?;

    Ok(Json(cumulative_totals(&contributions)))
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
        fund_contribution::{NewFundContribution, create_fund_contribution},
        ledger::FilterCriteria,
    };

    use super::{ListFundContributionsState, list_fund_contributions_endpoint};

    #[tokio::test]
    async fn listing_carries_running_totals() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        for (amount, date) in [
            ("100", date!(2024 - 01 - 01)),
            ("50", date!(2024 - 02 - 01)),
            ("25", date!(2024 - 03 - 01)),
        ] {
            create_fund_contribution(
                NewFundContribution {
                    amount: amount.parse().unwrap(),
                    date,
                },
                &conn,
            )
            .expect("Could not create fund contribution");
        }
        let state = ListFundContributionsState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response =
            list_fund_contributions_endpoint(State(state), Query(FilterCriteria::default()))
                .await
                .expect("Could not list fund contributions");

        let got_totals: Vec<Decimal> = response.iter().map(|row| row.cumulative_total).collect();
        let want_totals: Vec<Decimal> = ["100.00", "150.00", "175.00"]
            .iter()
            .map(|text| text.parse().unwrap())
            .collect();
        assert_eq!(got_totals, want_totals);
    }
}
