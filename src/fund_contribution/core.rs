//! Defines the core data model and database queries for fund contributions.

use rusqlite::{Connection, params_from_iter, types::Value};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, database_id::FundContributionId, ledger::FilterCriteria, money::decimal_column,
};

/// A single payment into the shared mutual fund pot.
///
/// Contributions form a date-ordered sequence; ties on the same date keep
/// their creation order, which is what the running totals on the listing are
/// computed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundContribution {
    /// The ID of the fund contribution.
    pub id: FundContributionId,
    /// The non-negative amount contributed.
    pub amount: Decimal,
    /// When the contribution was made.
    pub date: Date,
}

/// The fields needed to create or replace a fund contribution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewFundContribution {
    /// The non-negative amount contributed.
    pub amount: Decimal,
    /// When the contribution was made.
    pub date: Date,
}

/// Create a new fund contribution in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_fund_contribution(
    new_contribution: NewFundContribution,
    connection: &Connection,
) -> Result<FundContribution, Error> {
    if new_contribution.amount.is_sign_negative() && !new_contribution.amount.is_zero() {
        return Err(Error::NegativeAmount(new_contribution.amount));
    }

    let contribution = connection
        .prepare(
            "INSERT INTO fund_contribution (amount, date)
             VALUES (?1, ?2)
             RETURNING id, amount, date",
        )?
        .query_one(
            (new_contribution.amount.to_string(), new_contribution.date),
            map_fund_contribution_row,
        )?;

    Ok(contribution)
}

/// Get the fund contributions whose dates satisfy the month and year
/// criteria, ordered by ascending date with ties broken by creation order.
///
/// Only the date dimensions of `criteria` apply to fund contributions; the
/// category and bank fields are not consulted.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCriteria] if the criteria fail validation,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_fund_contributions(
    criteria: &FilterCriteria,
    connection: &Connection,
) -> Result<Vec<FundContribution>, Error> {
    criteria.validate()?;

    let mut conditions: Vec<&str> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(month) = criteria.month {
        conditions.push("CAST(strftime('%m', date) AS INTEGER) = ?");
        params.push(Value::Integer(i64::from(month)));
    }

    if let Some(year) = criteria.year {
        conditions.push("CAST(strftime('%Y', date) AS INTEGER) = ?");
        params.push(Value::Integer(i64::from(year)));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {} ", conditions.join(" AND "))
    };

    let query = format!(
        "SELECT id, amount, date FROM fund_contribution {where_clause}ORDER BY date ASC, id ASC"
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(params), map_fund_contribution_row)?
        .map(|contribution_result| contribution_result.map_err(Error::SqlError))
        .collect()
}

/// Update a fund contribution in the database, replacing all of its fields.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is negative,
/// - [Error::UpdateMissingFundContribution] if `id` is not in the database,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_fund_contribution(
    id: FundContributionId,
    new_contribution: NewFundContribution,
    connection: &Connection,
) -> Result<FundContribution, Error> {
    if new_contribution.amount.is_sign_negative() && !new_contribution.amount.is_zero() {
        return Err(Error::NegativeAmount(new_contribution.amount));
    }

    let rows_updated = connection.execute(
        "UPDATE fund_contribution SET amount = ?1, date = ?2 WHERE id = ?3",
        (new_contribution.amount.to_string(), new_contribution.date, id),
    )?;

    if rows_updated == 0 {
        return Err(Error::UpdateMissingFundContribution);
    }

    let contribution = connection
        .prepare("SELECT id, amount, date FROM fund_contribution WHERE id = :id")?
        .query_one(&[(":id", &id)], map_fund_contribution_row)?;

    Ok(contribution)
}

/// Delete the fund contribution with `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingFundContribution] if `id` is not in the database,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_fund_contribution(
    id: FundContributionId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_deleted = connection.execute("DELETE FROM fund_contribution WHERE id = ?1", [id])?;

    if rows_deleted == 0 {
        return Err(Error::DeleteMissingFundContribution);
    }

    Ok(())
}

/// Create the fund contribution table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_fund_contribution_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS fund_contribution (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_fund_contribution_row(
    row: &rusqlite::Row,
) -> Result<FundContribution, rusqlite::Error> {
    Ok(FundContribution {
        id: row.get(0)?,
        amount: decimal_column(row, 1)?,
        date: row.get(2)?,
    })
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{Error, db::initialize, ledger::FilterCriteria};

    use super::{
        NewFundContribution, create_fund_contribution, delete_fund_contribution,
        get_fund_contributions, update_fund_contribution,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_and_list_orders_by_date_then_creation() {
        let conn = get_test_connection();
        // Two contributions share a date; the one created first comes first.
        for (amount, date) in [
            ("50", date!(2024 - 02 - 01)),
            ("100", date!(2024 - 01 - 15)),
            ("25", date!(2024 - 01 - 15)),
        ] {
            create_fund_contribution(
                NewFundContribution {
                    amount: amount.parse().unwrap(),
                    date,
                },
                &conn,
            )
            .expect("Could not create fund contribution");
        }

        let got = get_fund_contributions(&FilterCriteria::default(), &conn)
            .expect("Could not get fund contributions");

        let got_ids: Vec<i64> = got.iter().map(|contribution| contribution.id).collect();
        assert_eq!(got_ids, vec![2, 3, 1]);
    }

    #[test]
    fn month_and_year_criteria_narrow_the_listing() {
        let conn = get_test_connection();
        for (amount, date) in [
            ("100", date!(2024 - 01 - 15)),
            ("50", date!(2024 - 02 - 01)),
            ("75", date!(2023 - 01 - 20)),
        ] {
            create_fund_contribution(
                NewFundContribution {
                    amount: amount.parse().unwrap(),
                    date,
                },
                &conn,
            )
            .expect("Could not create fund contribution");
        }
        let criteria = FilterCriteria {
            month: Some(1),
            year: Some(2024),
            ..Default::default()
        };

        let got = get_fund_contributions(&criteria, &conn)
            .expect("Could not get fund contributions");

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].date, date!(2024 - 01 - 15));
    }

    #[test]
    fn create_fails_on_negative_amount() {
        let conn = get_test_connection();
        let amount = "-10".parse().unwrap();

        let result = create_fund_contribution(
            NewFundContribution {
                amount,
                date: date!(2024 - 01 - 01),
            },
            &conn,
        );

        assert_eq!(result, Err(Error::NegativeAmount(amount)));
    }

    #[test]
    fn update_and_delete_missing_contribution_fail() {
        let conn = get_test_connection();

        let update_result = update_fund_contribution(
            999,
            NewFundContribution {
                amount: "1".parse().unwrap(),
                date: date!(2024 - 01 - 01),
            },
            &conn,
        );
        let delete_result = delete_fund_contribution(999, &conn);

        assert_eq!(update_result, Err(Error::UpdateMissingFundContribution));
        assert_eq!(delete_result, Err(Error::DeleteMissingFundContribution));
    }
}
