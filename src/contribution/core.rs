//! Defines the core data model and database queries for contributions.
//!
//! A contribution is money a friend put into the shared pot. Every
//! contribution references a real friend row, enforced by a foreign key, so
//! listings can join the friend's name without inventing placeholder names.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::{ContributionId, FriendId},
    ledger::FilterCriteria,
    money::decimal_column,
};

/// Money a friend put into the shared pot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// The ID of the contribution.
    pub id: ContributionId,
    /// The ID of the friend who contributed.
    pub friend_id: FriendId,
    /// The non-negative amount contributed.
    pub amount: Decimal,
    /// Free-form notes about the contribution.
    pub notes: Option<String>,
    /// When the contribution was made.
    pub date: Date,
}

/// A contribution joined with the contributing friend's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionWithFriend {
    /// The contribution itself.
    #[serde(flatten)]
    pub contribution: Contribution,
    /// The name of the friend who contributed.
    pub friend_name: String,
}

/// One friend's total contributions, for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendTotal {
    /// The ID of the friend.
    pub friend_id: FriendId,
    /// The friend's name.
    pub name: String,
    /// The sum of the friend's contribution amounts.
    pub total: Decimal,
}

/// The fields needed to create or replace a contribution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewContribution {
    /// The ID of the friend who contributed.
    pub friend_id: FriendId,
    /// The non-negative amount contributed.
    pub amount: Decimal,
    /// Free-form notes about the contribution.
    #[serde(default)]
    pub notes: Option<String>,
    /// When the contribution was made.
    pub date: Date,
}

/// Create a new contribution in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is negative,
/// - [Error::InvalidFriend] if the friend ID does not refer to a real friend,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_contribution(
    new_contribution: NewContribution,
    connection: &Connection,
) -> Result<Contribution, Error> {
    if new_contribution.amount.is_sign_negative() && !new_contribution.amount.is_zero() {
        return Err(Error::NegativeAmount(new_contribution.amount));
    }

    let contribution = connection
        .prepare(
            "INSERT INTO contribution (friend_id, amount, notes, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, friend_id, amount, notes, date",
        )?
        .query_one(
            (
                new_contribution.friend_id,
                new_contribution.amount.to_string(),
                new_contribution.notes,
                new_contribution.date,
            ),
            map_contribution_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidFriend(new_contribution.friend_id),
            error => error.into(),
        })?;

    Ok(contribution)
}

/// Get the contributions whose dates satisfy the month and year criteria,
/// joined with the contributing friend's name, most recent first.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCriteria] if the criteria fail validation,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_contributions_with_friends(
    criteria: &FilterCriteria,
    connection: &Connection,
) -> Result<Vec<ContributionWithFriend>, Error> {
    criteria.validate()?;

    let joined: Vec<ContributionWithFriend> = connection
        .prepare(
            "SELECT contribution.id, friend_id, amount, notes, date, friend.name
             FROM contribution JOIN friend ON contribution.friend_id = friend.id
             ORDER BY date DESC, contribution.id DESC",
        )?
        .query_map([], |row| {
            Ok(ContributionWithFriend {
                contribution: map_contribution_row(row)?,
                friend_name: row.get(5)?,
            })
        })?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect::<Result<_, _>>()?;

    Ok(joined
        .into_iter()
        .filter(|row| criteria.matches_date(row.contribution.date))
        .collect())
}

/// Get one friend's contributions, most recent first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_contributions_by_friend(
    friend_id: FriendId,
    connection: &Connection,
) -> Result<Vec<Contribution>, Error> {
    connection
        .prepare(
            "SELECT id, friend_id, amount, notes, date FROM contribution
             WHERE friend_id = :friend_id
             ORDER BY date DESC, id DESC",
        )?
        .query_map(&[(":friend_id", &friend_id)], map_contribution_row)?
        .map(|contribution_result| contribution_result.map_err(Error::SqlError))
        .collect()
}

/// Total each friend's contributions, largest total first.
///
/// Friends with no contributions appear with a total of zero. The sums are
/// computed with an exact decimal accumulator, never in SQL over text
/// amounts.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_friend_totals(connection: &Connection) -> Result<Vec<FriendTotal>, Error> {
    let rows: Vec<(FriendId, String, Option<String>)> = connection
        .prepare(
            "SELECT friend.id, friend.name, contribution.amount
             FROM friend LEFT JOIN contribution ON friend.id = contribution.friend_id
             ORDER BY friend.id, contribution.id",
        )?
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect::<Result<_, _>>()?;

    let mut totals: Vec<FriendTotal> = Vec::new();

    for (friend_id, name, amount) in rows {
        if totals.last().map(|total| total.friend_id) != Some(friend_id) {
            totals.push(FriendTotal {
                friend_id,
                name,
                total: Decimal::ZERO,
            });
        }

        if let (Some(amount), Some(total)) = (amount, totals.last_mut()) {
            let amount: Decimal = amount.parse().map_err(|error| {
                Error::SqlError(rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    Box::new(error),
                ))
            })?;
            total.total += amount;
        }
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));

    Ok(totals)
}

/// The sum of all contribution amounts.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_total_contributions(connection: &Connection) -> Result<Decimal, Error> {
    let amounts: Vec<String> = connection
        .prepare("SELECT amount FROM contribution")?
        .query_map([], |row| row.get(0))?
        .map(|amount_result| amount_result.map_err(Error::SqlError))
        .collect::<Result<_, _>>()?;

    let mut total = Decimal::ZERO;
    for amount in amounts {
        let amount: Decimal = amount.parse().map_err(|error| {
            Error::SqlError(rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(error),
            ))
        })?;
        total += amount;
    }

    Ok(total.round_dp(2))
}

/// Update a contribution in the database, replacing all of its fields.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is negative,
/// - [Error::InvalidFriend] if the friend ID does not refer to a real friend,
/// - [Error::UpdateMissingContribution] if `id` is not in the database,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_contribution(
    id: ContributionId,
    new_contribution: NewContribution,
    connection: &Connection,
) -> Result<Contribution, Error> {
    if new_contribution.amount.is_sign_negative() && !new_contribution.amount.is_zero() {
        return Err(Error::NegativeAmount(new_contribution.amount));
    }

    let rows_updated = connection
        .execute(
            "UPDATE contribution SET friend_id = ?1, amount = ?2, notes = ?3, date = ?4
             WHERE id = ?5",
            (
                new_contribution.friend_id,
                new_contribution.amount.to_string(),
                &new_contribution.notes,
                new_contribution.date,
                id,
            ),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidFriend(new_contribution.friend_id),
            error => error.into(),
        })?;

    if rows_updated == 0 {
        return Err(Error::UpdateMissingContribution);
    }

    let contribution = connection
        .prepare("SELECT id, friend_id, amount, notes, date FROM contribution WHERE id = :id")?
        .query_one(&[(":id", &id)], map_contribution_row)?;

    Ok(contribution)
}

/// Delete the contribution with `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingContribution] if `id` is not in the database,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_contribution(id: ContributionId, connection: &Connection) -> Result<(), Error> {
    let rows_deleted = connection.execute("DELETE FROM contribution WHERE id = ?1", [id])?;

    if rows_deleted == 0 {
        return Err(Error::DeleteMissingContribution);
    }

    Ok(())
}

/// Create the contribution table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_contribution_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS contribution (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                friend_id INTEGER NOT NULL,
                amount TEXT NOT NULL,
                notes TEXT,
                date TEXT NOT NULL,
                FOREIGN KEY(friend_id) REFERENCES friend(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

fn map_contribution_row(row: &rusqlite::Row) -> Result<Contribution, rusqlite::Error> {
    Ok(Contribution {
        id: row.get(0)?,
        friend_id: row.get(1)?,
        amount: decimal_column(row, 2)?,
        notes: row.get(3)?,
        date: row.get(4)?,
    })
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        friend::{NewFriend, create_friend},
        ledger::FilterCriteria,
    };

    use super::{
        NewContribution, create_contribution, get_contributions_by_friend,
        get_contributions_with_friends, get_friend_totals, get_total_contributions,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn create_test_friend(name: &str, conn: &Connection) -> i64 {
        create_friend(
            NewFriend {
                name: name.to_owned(),
                email: None,
            },
            conn,
        )
        .expect("Could not create friend")
        .id
    }

    #[test]
    fn create_fails_on_unknown_friend() {
        let conn = get_test_connection();

        let result = create_contribution(
            NewContribution {
                friend_id: 42,
                amount: "100".parse().unwrap(),
                notes: None,
                date: date!(2024 - 01 - 01),
            },
            &conn,
        );

        assert_eq!(result, Err(Error::InvalidFriend(42)));
    }

    #[test]
    fn listing_joins_friend_names() {
        let conn = get_test_connection();
        let ravi = create_test_friend("Ravi", &conn);
        create_contribution(
            NewContribution {
                friend_id: ravi,
                amount: "100".parse().unwrap(),
                notes: None,
                date: date!(2024 - 01 - 01),
            },
            &conn,
        )
        .expect("Could not create contribution");

        let got = get_contributions_with_friends(&FilterCriteria::default(), &conn)
            .expect("Could not get contributions");

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].friend_name, "Ravi");
    }

    #[test]
    fn by_friend_listing_only_returns_that_friends_rows() {
        let conn = get_test_connection();
        let ravi = create_test_friend("Ravi", &conn);
        let amit = create_test_friend("Amit", &conn);
        for (friend_id, amount) in [(ravi, "100"), (amit, "50"), (ravi, "25")] {
            create_contribution(
                NewContribution {
                    friend_id,
                    amount: amount.parse().unwrap(),
                    notes: None,
                    date: date!(2024 - 01 - 01),
                },
                &conn,
            )
            .expect("Could not create contribution");
        }

        let got = get_contributions_by_friend(ravi, &conn)
            .expect("Could not get contributions by friend");

        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|contribution| contribution.friend_id == ravi));
    }

    #[test]
    fn friend_totals_sum_exactly_and_sort_descending() {
        let conn = get_test_connection();
        let ravi = create_test_friend("Ravi", &conn);
        let amit = create_test_friend("Amit", &conn);
        create_test_friend("Suresh", &conn);
        for (friend_id, amount) in [(ravi, "0.10"), (ravi, "0.20"), (amit, "5.00")] {
            create_contribution(
                NewContribution {
                    friend_id,
                    amount: amount.parse().unwrap(),
                    notes: None,
                    date: date!(2024 - 01 - 01),
                },
                &conn,
            )
            .expect("Could not create contribution");
        }

        let got = get_friend_totals(&conn).expect("Could not get friend totals");

        assert_eq!(got.len(), 3);
        assert_eq!(got[0].name, "Amit");
        assert_eq!(got[0].total, "5.00".parse::<Decimal>().unwrap());
        assert_eq!(got[1].name, "Ravi");
        assert_eq!(got[1].total, "0.30".parse::<Decimal>().unwrap());
        assert_eq!(got[2].total, Decimal::ZERO);

        let want_total = "5.30".parse::<Decimal>().unwrap();
        assert_eq!(
            get_total_contributions(&conn).expect("Could not get total"),
            want_total
        );
    }
}
