//! Defines the endpoint for deleting a fund contribution.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, database_id::FundContributionId,
    fund_contribution::core::delete_fund_contribution,
};

/// The state needed to delete a fund contribution.
#[derive(Debug, Clone)]
pub struct DeleteFundContributionState {
    /// The database connection for managing fund contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteFundContributionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a fund contribution by its ID.
pub async fn delete_fund_contribution_endpoint(
    State(state): State<DeleteFundContributionState>,
    Path(fund_contribution_id): Path<FundContributionId>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_fund_contribution(fund_contribution_id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}
