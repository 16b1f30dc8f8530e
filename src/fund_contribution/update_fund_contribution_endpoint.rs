//! Defines the endpoint for updating an existing fund contribution.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::FundContributionId,
    fund_contribution::core::{FundContribution, NewFundContribution, update_fund_contribution},
};

/// The state needed to update a fund contribution.
#[derive(Debug, Clone)]
pub struct UpdateFundContributionState {
    /// The database connection for managing fund contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateFundContributionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for replacing the fields of a fund contribution.
pub async fn update_fund_contribution_endpoint(
    State(state): State<UpdateFundContributionState>,
    Path(fund_contribution_id): Path<FundContributionId>,
    Json(new_contribution): Json<NewFundContribution>,
) -> Result<Json<FundContribution>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let contribution =
        update_fund_contribution(fund_contribution_id, new_contribution, &connection)?;

    Ok(Json(contribution))
}
