//! JSON endpoints for friend CRUD.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::FriendId,
    friend::core::{
        Friend, NewFriend, create_friend, delete_friend, get_all_friends, update_friend,
    },
};

/// The state needed to manage friends.
#[derive(Debug, Clone)]
pub struct FriendState {
    /// The database connection for managing friends.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for FriendState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FriendState {
    fn lock_connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, Error> {
        self.db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

/// A route handler for listing all friends.
pub async fn list_friends_endpoint(
    State(state): State<FriendState>,
) -> Result<Json<Vec<Friend>>, Error> {
    let connection = state.lock_connection()?;

    Ok(Json(get_all_friends(&connection)?))
}

/// A route handler for creating a new friend.
pub async fn create_friend_endpoint(
    State(state): State<FriendState>,
    Json(new_friend): Json<NewFriend>,
) -> Result<(StatusCode, Json<Friend>), Error> {
    let connection = state.lock_connection()?;

    let friend = create_friend(new_friend, &connection)?;

    Ok((StatusCode::CREATED, Json(friend)))
}

/// A route handler for replacing the fields of a friend.
pub async fn update_friend_endpoint(
    State(state): State<FriendState>,
    Path(friend_id): Path<FriendId>,
    Json(new_friend): Json<NewFriend>,
) -> Result<Json<Friend>, Error> {
    let connection = state.lock_connection()?;

    let friend = update_friend(friend_id, new_friend, &connection)?;

    Ok(Json(friend))
}

/// A route handler for deleting a friend by their ID.
pub async fn delete_friend_endpoint(
    State(state): State<FriendState>,
    Path(friend_id): Path<FriendId>,
) -> Result<StatusCode, Error> {
    let connection = state.lock_connection()?;

    delete_friend(friend_id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{db::initialize, friend::NewFriend};

    use super::{FriendState, create_friend_endpoint, list_friends_endpoint};

    #[tokio::test]
    async fn created_friend_appears_in_listing() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let state = FriendState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let (status, _) = create_friend_endpoint(
            State(state.clone()),
            Json(NewFriend {
                name: "Ravi".to_owned(),
                email: None,
            }),
        )
        .await
        .expect("Could not create friend");
        assert_eq!(status, StatusCode::CREATED);

        let Json(friends) = list_friends_endpoint(State(state))
            .await
            .expect("Could not list friends");
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].name, "Ravi");
    }
}
