//! Defines the core data model and database queries for friends.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::FriendId};

/// A friend who contributes money to the shared pot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    /// The ID of the friend.
    pub id: FriendId,
    /// The friend's name.
    pub name: String,
    /// The friend's email address.
    pub email: Option<String>,
}

/// The fields needed to create or replace a friend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewFriend {
    /// The friend's name.
    pub name: String,
    /// The friend's email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Create a new friend in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_friend(new_friend: NewFriend, connection: &Connection) -> Result<Friend, Error> {
    let friend = connection
        .prepare("INSERT INTO friend (name, email) VALUES (?1, ?2) RETURNING id, name, email")?
        .query_one((new_friend.name, new_friend.email), map_friend_row)?;

    Ok(friend)
}

/// Get all friends in the database, ordered by name.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_all_friends(connection: &Connection) -> Result<Vec<Friend>, Error> {
    connection
        .prepare("SELECT id, name, email FROM friend ORDER BY name")?
        .query_map([], map_friend_row)?
        .map(|friend_result| friend_result.map_err(Error::SqlError))
        .collect()
}

/// Retrieve a friend from the database by their `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid friend,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_friend(id: FriendId, connection: &Connection) -> Result<Friend, Error> {
    let friend = connection
        .prepare("SELECT id, name, email FROM friend WHERE id = :id")?
        .query_one(&[(":id", &id)], map_friend_row)?;

    Ok(friend)
}

/// Update a friend in the database, replacing all of their fields.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingFriend] if `id` does not refer to a valid friend,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_friend(
    id: FriendId,
    new_friend: NewFriend,
    connection: &Connection,
) -> Result<Friend, Error> {
    let rows_updated = connection.execute(
        "UPDATE friend SET name = ?1, email = ?2 WHERE id = ?3",
        (&new_friend.name, &new_friend.email, id),
    )?;

    if rows_updated == 0 {
        return Err(Error::UpdateMissingFriend);
    }

    get_friend(id, connection)
}

/// Delete the friend with `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingFriend] if `id` does not refer to a valid friend,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_friend(id: FriendId, connection: &Connection) -> Result<(), Error> {
    let rows_deleted = connection.execute("DELETE FROM friend WHERE id = ?1", [id])?;

    if rows_deleted == 0 {
        return Err(Error::DeleteMissingFriend);
    }

    Ok(())
}

/// Create the friend table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_friend_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS friend (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT
                )",
        (),
    )?;

    Ok(())
}

fn map_friend_row(row: &rusqlite::Row) -> Result<Friend, rusqlite::Error> {
    Ok(Friend {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}
