//! Defines the endpoint for deleting a contribution.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{AppState, Error, contribution::core::delete_contribution, database_id::ContributionId};

/// The state needed to delete a contribution.
#[derive(Debug, Clone)]
pub struct DeleteContributionState {
    /// The database connection for managing contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteContributionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a contribution.
pub async fn delete_contribution_endpoint(
    State(state): State<DeleteContributionState>,
    Path(contribution_id): Path<ContributionId>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_contribution(contribution_id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}
