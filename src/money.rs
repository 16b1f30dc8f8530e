//! Helpers for storing exact decimal amounts in SQLite.
//!
//! Amounts are stored as text so that they round-trip through the database
//! without binary floating point drift.

use rusqlite::{
    Row,
    types::{FromSqlError, Type},
};
use rust_decimal::Decimal;

/// Read a decimal amount from a text column.
///
/// # Errors
/// Returns [rusqlite::Error::FromSqlConversionFailure] if the column does not
/// hold a valid decimal number.
pub(crate) fn decimal_column(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    text.parse::<Decimal>().map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            Box::new(FromSqlError::Other(Box::new(error))),
        )
    })
}

/// Read an optional decimal amount from a text column.
pub(crate) fn optional_decimal_column(
    row: &Row,
    index: usize,
) -> Result<Option<Decimal>, rusqlite::Error> {
    match row.get::<usize, Option<String>>(index)? {
        Some(text) => {
            let decimal = text.parse::<Decimal>().map_err(|error| {
                rusqlite::Error::FromSqlConversionFailure(
                    index,
                    Type::Text,
                    Box::new(FromSqlError::Other(Box::new(error))),
                )
            })?;
            Ok(Some(decimal))
        }
        None => Ok(None),
    }
}
