//! The pure, synchronous core of the application.
//!
//! This module owns the one filter predicate, the one sign mapping, the bank
//! grouping, and the running-total sequence that every endpoint uses. Nothing
//! in here touches the database: each function operates on an immutable
//! snapshot of records supplied by the caller and is safe to call from
//! concurrent requests.

mod balance;
mod criteria;
mod grouping;
mod running_total;

pub use balance::{balance, signed_amount};
pub use criteria::{FilterCriteria, filter};
pub use grouping::{BankGroup, OTHER_BANK_LABEL, group_by_bank, verify_reconciliation};
pub use running_total::{RunningTotal, cumulative_totals};
