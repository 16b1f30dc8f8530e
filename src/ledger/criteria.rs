//! Composable filter criteria for transactions.
//!
//! A [FilterCriteria] value is an explicit record of which filter dimensions
//! a caller has activated. Unset fields are `None`, never an empty string or
//! an "all" sentinel, so "do not filter on this dimension" is a state the
//! type system can see.

use serde::Deserialize;
use time::Date;

use crate::{Error, transaction::Transaction};

/// The optional filter dimensions a caller may activate.
///
/// Each active criterion independently narrows the set (a pure conjunction),
/// so the result never depends on the order fields are evaluated. With all
/// fields unset every record matches.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct FilterCriteria {
    /// The calendar month (1-12) a transaction's date must fall in.
    pub month: Option<u8>,
    /// The calendar year a transaction's date must fall in.
    pub year: Option<i32>,
    /// The exact category label a transaction must carry.
    pub category: Option<String>,
    /// The exact bank name a transaction must carry.
    pub bank: Option<String>,
}

impl FilterCriteria {
    /// Check that every active criterion holds a valid value.
    ///
    /// # Errors
    /// Returns [Error::InvalidCriteria] if the month is outside 1-12. Invalid
    /// values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), Error> {
        match self.month {
            Some(month) if !(1..=12).contains(&month) => Err(Error::InvalidCriteria(month)),
            _ => Ok(()),
        }
    }

    /// The number of active criteria.
    pub fn active_count(&self) -> usize {
        [
            self.month.is_some(),
            self.year.is_some(),
            self.category.is_some(),
            self.bank.is_some(),
        ]
        .into_iter()
        .filter(|&active| active)
        .count()
    }

    /// Whether a transaction is included by these criteria.
    ///
    /// Records with a missing `category` or `bank` never match an active
    /// criterion on that field. Label comparisons are exact and
    /// case-sensitive.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_date(transaction.date)
            && matches_label(&self.category, &transaction.category)
            && matches_label(&self.bank, &transaction.bank)
    }

    /// Whether a date satisfies the month and year criteria.
    ///
    /// Used directly for fund contributions, which only filter by date.
    pub fn matches_date(&self, date: Date) -> bool {
        if let Some(month) = self.month
            && u8::from(date.month()) != month
        {
            return false;
        }

        if let Some(year) = self.year
            && date.year() != year
        {
            return false;
        }

        true
    }
}

fn matches_label(criterion: &Option<String>, field: &Option<String>) -> bool {
    match criterion {
        None => true,
        Some(want) => field.as_deref() == Some(want.as_str()),
    }
}

/// Keep the transactions included by `criteria`, preserving their order.
pub fn filter(mut transactions: Vec<Transaction>, criteria: &FilterCriteria) -> Vec<Transaction> {
    transactions.retain(|transaction| criteria.matches(transaction));
    transactions
}
