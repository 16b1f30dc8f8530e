//! Defines the endpoints for listing contributions, either all of them
//! (joined with friend names) or the rows for a single friend.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, Error, database_id::FriendId, ledger::FilterCriteria};

use super::core::{
    Contribution, ContributionWithFriend, get_contributions_by_friend,
    get_contributions_with_friends,
};

/// The state needed to list contributions.
#[derive(Debug, Clone)]
pub struct ListContributionsState {
    /// The database connection for reading contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListContributionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The month and year to restrict a contribution listing to.
#[derive(Debug, Default, Deserialize)]
pub struct ContributionQuery {
    /// The one-based month to restrict the listing to.
    pub month: Option<u8>,
    /// The year to restrict the listing to.
    pub year: Option<i32>,
}

/// A route handler for listing contributions joined with friend names.
///
/// # Errors
/// This function will return an error response if `month` is outside 1-12 or
/// the database cannot be queried.
pub async fn list_contributions_endpoint(
    State(state): State<ListContributionsState>,
    Query(query): Query<ContributionQuery>,
) -> Result<Json<Vec<ContributionWithFriend>>, Error> {
    let criteria = FilterCriteria {
        month: query.month,
        year: query.year,
        ..FilterCriteria::default()
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let contributions = get_contributions_with_friends(&criteria, &connection)?;

    Ok(Json(contributions))
}

/// A route handler for listing a single friend's contributions.
pub async fn contributions_by_friend_endpoint(
    State(state): State<ListContributionsState>,
    Path(friend_id): Path<FriendId>,
) -> Result<Json<Vec<Contribution>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let contributions = get_contributions_by_friend(friend_id, &connection)?;

    Ok(Json(contributions))
}
