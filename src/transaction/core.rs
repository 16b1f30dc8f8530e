//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::TransactionId,
    money::decimal_column,
    transaction::kind::TransactionKind,
};

// ============================================================================
// MODELS
// ============================================================================

/// A bank transaction: money paid in, taken out, or moved between accounts.
///
/// The amount is always a non-negative magnitude; whether the transaction is
/// money in or money out is derived from its kind. To create a new
/// `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The non-negative amount of money involved in this transaction.
    pub amount: Decimal,
    /// When the transaction happened.
    pub date: Date,
    /// The kind of the transaction, e.g. deposit or withdrawal.
    pub kind: TransactionKind,
    /// A free-form category label, e.g. "bank_charges".
    pub category: Option<String>,
    /// The name of the bank account the transaction belongs to.
    pub bank: Option<String>,
    /// The name of the friend a deposit is attributable to.
    pub counterparty: Option<String>,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: Decimal, date: Date, kind: TransactionKind) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            kind,
            category: None,
            bank: None,
            counterparty: None,
            description: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The optional fields default to `None`. Pass the builder to
/// [create_transaction] to insert the transaction into the database.
#[derive(Debug, PartialEq, Clone, Deserialize)]
pub struct TransactionBuilder {
    /// The non-negative amount of money involved in the transaction.
    pub amount: Decimal,
    /// The date when the transaction occurred.
    pub date: Date,
    /// The kind of the transaction, e.g. deposit or withdrawal.
    pub kind: TransactionKind,
    /// A free-form category label.
    #[serde(default)]
    pub category: Option<String>,
    /// The name of the bank account the transaction belongs to.
    #[serde(default)]
    pub bank: Option<String>,
    /// The name of the friend a deposit is attributable to.
    #[serde(default)]
    pub counterparty: Option<String>,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
}

impl TransactionBuilder {
    /// Set the category label for the transaction.
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Set the bank name for the transaction.
    pub fn bank(mut self, bank: Option<String>) -> Self {
        self.bank = bank;
        self
    }

    /// Set the friend name a deposit is attributable to.
    pub fn counterparty(mut self, counterparty: Option<String>) -> Self {
        self.counterparty = counterparty;
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.amount.is_sign_negative() && !builder.amount.is_zero() {
        return Err(Error::NegativeAmount(builder.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, kind, category, bank, counterparty, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, amount, date, kind, category, bank, counterparty, description",
        )?
        .query_one(
            (
                builder.amount.to_string(),
                builder.date,
                builder.kind.as_str(),
                builder.category,
                builder.bank,
                builder.counterparty,
                builder.description,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, date, kind, category, bank, counterparty, description
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Update a transaction in the database, replacing all of its fields.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is negative,
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.amount.is_sign_negative() && !builder.amount.is_zero() {
        return Err(Error::NegativeAmount(builder.amount));
    }

    let rows_updated = connection.execute(
        "UPDATE \"transaction\"
         SET amount = ?1, date = ?2, kind = ?3, category = ?4, bank = ?5, counterparty = ?6, description = ?7
         WHERE id = ?8",
        (
            builder.amount.to_string(),
            builder.date,
            builder.kind.as_str(),
            &builder.category,
            &builder.bank,
            &builder.counterparty,
            &builder.description,
            id,
        ),
    )?;

    if rows_updated == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    get_transaction(id, connection)
}

/// Delete the transaction with `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_deleted = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_deleted == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                kind TEXT NOT NULL,
                category TEXT,
                bank TEXT,
                counterparty TEXT,
                description TEXT
                )",
        (),
    )?;

    // Index used by the date-ordered listing and the month/year pushdown.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = decimal_column(row, 1)?;
    let date = row.get(2)?;
    let kind = TransactionKind::from(row.get::<usize, String>(3)?);
    let category = row.get(4)?;
    let bank = row.get(5)?;
    let counterparty = row.get(6)?;
    let description = row.get(7)?;

    Ok(Transaction {
        id,
        amount,
        date,
        kind,
        category,
        bank,
        counterparty,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================
