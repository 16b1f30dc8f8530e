//! Defines the endpoint for replacing an existing contribution.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    contribution::{Contribution, NewContribution, core::update_contribution},
    database_id::ContributionId,
};

/// The state needed to update a contribution.
#[derive(Debug, Clone)]
pub struct UpdateContributionState {
    /// The database connection for managing contributions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateContributionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for replacing all fields of a contribution.
pub async fn update_contribution_endpoint(
    State(state): State<UpdateContributionState>,
    Path(contribution_id): Path<ContributionId>,
    Json(new_contribution): Json<NewContribution>,
) -> Result<Json<Contribution>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let contribution = update_contribution(contribution_id, new_contribution, &connection)?;

    Ok(Json(contribution))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::Path, extract::State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        contribution::{NewContribution, create_contribution},
        db::initialize,
        friend::{NewFriend, create_friend},
    };

    use super::{UpdateContributionState, update_contribution_endpoint};

    fn get_test_state() -> UpdateContributionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let friend = create_friend(
            NewFriend {
                name: "Ravi".to_owned(),
                email: None,
            },
            &conn,
        )
        .expect("Could not create friend");
        create_contribution(
            NewContribution {
                friend_id: friend.id,
                amount: "100".parse().unwrap(),
                notes: None,
                date: date!(2024 - 01 - 15),
            },
            &conn,
        )
        .expect("Could not create contribution");

        UpdateContributionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn can_update_contribution() {
        let state = get_test_state();
        let replacement = NewContribution {
            friend_id: 1,
            amount: "175.25".parse().unwrap(),
            notes: Some("corrected".to_owned()),
            date: date!(2024 - 01 - 16),
        };

        let Json(got) = update_contribution_endpoint(State(state), Path(1), Json(replacement))
            .await
            .expect("Could not update contribution");

        assert_eq!(got.amount, "175.25".parse().unwrap());
        assert_eq!(got.notes.as_deref(), Some("corrected"));
        assert_eq!(got.date, date!(2024 - 01 - 16));
    }

    #[tokio::test]
    async fn updating_missing_contribution_fails() {
        let state = get_test_state();
        let replacement = NewContribution {
            friend_id: 1,
            amount: "1".parse().unwrap(),
            notes: None,
            date: date!(2024 - 01 - 16),
        };

        let result = update_contribution_endpoint(State(state), Path(999), Json(replacement)).await;

        assert_eq!(result.unwrap_err(), Error::UpdateMissingContribution);
    }
}
