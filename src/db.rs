//! Sets up the application's SQLite database.

use rusqlite::Connection;

use crate::{
    contribution::create_contribution_table, friend::create_friend_table,
    fund::create_fund_table, fund_contribution::create_fund_contribution_table,
    transaction::create_transaction_table,
};

/// Create the tables for the domain models in the database.
///
/// Foreign keys are switched on for the connection so that contributions
/// cannot reference friends that do not exist. Calling this function on a
/// database that already has the tables is a no-op.
///
/// # Errors
/// Returns an error if any of the tables cannot be created or if there is an
/// SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    create_friend_table(connection)?;
    create_fund_table(connection)?;
    create_contribution_table(connection)?;
    create_fund_contribution_table(connection)?;
    create_transaction_table(connection)?;

    Ok(())
}
