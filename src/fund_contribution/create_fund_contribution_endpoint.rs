//! Defines the endpoint for creating a new fund contribution.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    fund_contribution::core::{FundContribution, NewFundContribution, create_fund_contribution},
};

/// The state needed to create a fund contribution.
#[derive(Debug, Clone)]
pub struct CreateFundContributionState {
    /// The database connection for managing fund contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateFundContributionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new fund contribution.
pub async fn create_fund_contribution_endpoint(
    State(state): State<CreateFundContributionState>,
    Json(new_contribution): Json<NewFundContribution>,
) -> Result<(StatusCode, Json<FundContribution>), Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let contribution = create_fund_contribution(new_contribution, &connection)?;

    Ok((StatusCode::CREATED, Json(contribution)))
}
