//! Defines the endpoint for recording a new contribution.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    contribution::{Contribution, NewContribution, core::create_contribution},
};

/// The state needed to create a contribution.
#[derive(Debug, Clone)]
pub struct CreateContributionState {
    /// The database connection for managing contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateContributionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for recording a new contribution.
pub async fn create_contribution_endpoint(
    State(state): State<CreateContributionState>,
    Json(new_contribution): Json<NewContribution>,
) -> Result<(StatusCode, Json<Contribution>), Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let contribution = create_contribution(new_contribution, &connection)?;

    Ok((StatusCode::CREATED, Json(contribution)))
}
