//! Defines the core data model and database queries for mutual funds.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::FundId, money::optional_decimal_column};

/// A mutual fund the pot invests in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    /// The ID of the fund.
    pub id: FundId,
    /// The fund's name.
    pub name: String,
    /// The unit price at purchase.
    pub price: Option<Decimal>,
    /// The kind of fund, e.g. "equity" or "debt".
    pub fund_type: Option<String>,
    /// A text description of the fund.
    pub description: Option<String>,
    /// When the fund was purchased.
    pub purchase_date: Option<Date>,
}

/// The fields needed to create or replace a fund.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewFund {
    /// The fund's name.
    pub name: String,
    /// The unit price at purchase.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// The kind of fund, e.g. "equity" or "debt".
    #[serde(default)]
    pub fund_type: Option<String>,
    /// A text description of the fund.
    #[serde(default)]
    pub description: Option<String>,
    /// When the fund was purchased.
    #[serde(default)]
    pub purchase_date: Option<Date>,
}

/// Create a new fund in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_fund(new_fund: NewFund, connection: &Connection) -> Result<Fund, Error> {
    let fund = connection
        .prepare(
            "INSERT INTO fund (name, price, fund_type, description, purchase_date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, name, price, fund_type, description, purchase_date",
        )?
        .query_one(
            (
                new_fund.name,
                new_fund.price.map(|price| price.to_string()),
                new_fund.fund_type,
                new_fund.description,
                new_fund.purchase_date,
            ),
            map_fund_row,
        )?;

    Ok(fund)
}

/// Get all funds in the database, ordered by name.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_all_funds(connection: &Connection) -> Result<Vec<Fund>, Error> {
    connection
        .prepare(
            "SELECT id, name, price, fund_type, description, purchase_date
             FROM fund ORDER BY name",
        )?
        .query_map([], map_fund_row)?
        .map(|fund_result| fund_result.map_err(Error::SqlError))
        .collect()
}

/// Retrieve a fund from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid fund,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_fund(id: FundId, connection: &Connection) -> Result<Fund, Error> {
    let fund = connection
        .prepare(
            "SELECT id, name, price, fund_type, description, purchase_date
             FROM fund WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_fund_row)?;

    Ok(fund)
}

/// Update a fund in the database, replacing all of its fields.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingFund] if `id` does not refer to a valid fund,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_fund(id: FundId, new_fund: NewFund, connection: &Connection) -> Result<Fund, Error> {
    let rows_updated = connection.execute(
        "UPDATE fund
         SET name = ?1, price = ?2, fund_type = ?3, description = ?4, purchase_date = ?5
         WHERE id = ?6",
        (
            &new_fund.name,
            new_fund.price.map(|price| price.to_string()),
            &new_fund.fund_type,
            &new_fund.description,
            new_fund.purchase_date,
            id,
        ),
    )?;

    if rows_updated == 0 {
        return Err(Error::UpdateMissingFund);
    }

    get_fund(id, connection)
}

/// Delete the fund with `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingFund] if `id` does not refer to a valid fund,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_fund(id: FundId, connection: &Connection) -> Result<(), Error> {
    let rows_deleted = connection.execute("DELETE FROM fund WHERE id = ?1", [id])?;

    if rows_deleted == 0 {
        return Err(Error::DeleteMissingFund);
    }

    Ok(())
}

/// Create the fund table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_fund_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS fund (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                price TEXT,
                fund_type TEXT,
                description TEXT,
                purchase_date TEXT
                )",
        (),
    )?;

    Ok(())
}

fn map_fund_row(row: &rusqlite::Row) -> Result<Fund, rusqlite::Error> {
    Ok(Fund {
        id: row.get(0)?,
        name: row.get(1)?,
        price: optional_decimal_column(row, 2)?,
        fund_type: row.get(3)?,
        description: row.get(4)?,
        purchase_date: row.get(5)?,
    })
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{Error, db::initialize};

    use super::{NewFund, create_fund, delete_fund, get_all_funds, get_fund, update_fund};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_and_get_fund() {
        let conn = get_test_connection();

        let created = create_fund(
            NewFund {
                name: "Blue Chip Growth".to_owned(),
                price: Some("45.67".parse().unwrap()),
                fund_type: Some("equity".to_owned()),
                description: None,
                purchase_date: Some(date!(2024 - 01 - 15)),
            },
            &conn,
        )
        .expect("Could not create fund");

        let got = get_fund(created.id, &conn).expect("Could not get fund");
        assert_eq!(got, created);
        assert_eq!(got.price, Some("45.67".parse().unwrap()));
    }

    #[test]
    fn funds_are_listed_by_name() {
        let conn = get_test_connection();
        for name in ["Index 50", "Balanced", "Debt Short"] {
            create_fund(
                NewFund {
                    name: name.to_owned(),
                    price: None,
                    fund_type: None,
                    description: None,
                    purchase_date: None,
                },
                &conn,
            )
            .expect("Could not create fund");
        }

        let got = get_all_funds(&conn).expect("Could not get funds");

        let got_names: Vec<&str> = got.iter().map(|fund| fund.name.as_str()).collect();
        assert_eq!(got_names, vec!["Balanced", "Debt Short", "Index 50"]);
    }

    #[test]
    fn update_and_delete_missing_fund_fail() {
        let conn = get_test_connection();
        let new_fund = NewFund {
            name: "Nobody".to_owned(),
            price: None,
            fund_type: None,
            description: None,
            purchase_date: None,
        };

        assert_eq!(
            update_fund(999, new_fund, &conn),
            Err(Error::UpdateMissingFund)
        );
        assert_eq!(delete_fund(999, &conn), Err(Error::DeleteMissingFund));
    }
}
