//! Retrieval strategies for filtered transaction queries.
//!
//! Filter criteria are either pushed down to SQLite as a `WHERE` clause or
//! applied in memory after retrieving everything. Both paths answer with the
//! same collection in the same order for the same criteria and data; the
//! strategy is an implementation detail callers cannot observe.

use rusqlite::{Connection, params_from_iter, types::Value};

use crate::{
    Error,
    ledger::{self, FilterCriteria},
};

use super::core::{Transaction, map_transaction_row};

const TRANSACTION_COLUMNS: &str = "id, amount, date, kind, category, bank, counterparty, description";

/// How to evaluate a set of filter criteria.
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum RetrievalStrategy {
    /// Evaluate the criteria in the database as a `WHERE` clause.
    Pushdown,
    /// Retrieve every row and apply the predicate in memory.
    InMemory,
}

impl RetrievalStrategy {
    /// Pick a strategy for `criteria`.
    ///
    /// Single-criterion queries go to the database; combined criteria fall
    /// back to in-memory filtering. Either way the result is identical, so
    /// the split is purely about which layer does the work.
    pub(crate) fn for_criteria(criteria: &FilterCriteria) -> Self {
        if criteria.active_count() <= 1 {
            RetrievalStrategy::Pushdown
        } else {
            RetrievalStrategy::InMemory
        }
    }
}

/// Get the transactions selected by `criteria`, most recent first.
///
/// Ties on date are broken by descending ID so the order is stable across
/// both retrieval strategies.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCriteria] if the criteria fail validation,
/// - or [Error::SqlError] if retrieval fails. Retrieval failures propagate
///   unchanged; no partial data or defaults are substituted.
pub fn get_transactions(
    criteria: &FilterCriteria,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    criteria.validate()?;

    match RetrievalStrategy::for_criteria(criteria) {
        RetrievalStrategy::Pushdown => query_with_pushdown(criteria, connection),
        RetrievalStrategy::InMemory => query_in_memory(criteria, connection),
    }
}

fn query_with_pushdown(
    criteria: &FilterCriteria,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
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

    if let Some(category) = &criteria.category {
        conditions.push("category = ?");
        params.push(Value::Text(category.clone()));
    }

    if let Some(bank) = &criteria.bank {
        conditions.push("bank = ?");
        params.push(Value::Text(bank.clone()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {} ", conditions.join(" AND "))
    };

    let query = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {where_clause}ORDER BY date DESC, id DESC"
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(params), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}

fn query_in_memory(
    criteria: &FilterCriteria,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    // Deliberately no ORDER BY: the ordering contract must hold regardless
    // of the storage-native order.
    let all: Vec<Transaction> = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\""
        ))?
        .query_map([], map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect::<Result<_, _>>()?;

    let mut filtered = ledger::filter(all, criteria);
    filtered.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    Ok(filtered)
}

/// Get the distinct bank names present in the transaction table.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_bank_names(connection: &Connection) -> Result<Vec<String>, Error> {
    connection
        .prepare("SELECT DISTINCT bank FROM \"transaction\" WHERE bank IS NOT NULL ORDER BY bank")?
        .query_map([], |row| row.get(0))?
        .map(|name_result| name_result.map_err(Error::SqlError))
        .collect()
}
