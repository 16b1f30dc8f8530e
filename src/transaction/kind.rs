//! The open-ended set of transaction kinds.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The kind of a transaction, which determines the direction of the money
/// flow.
///
/// The set of kinds is open-ended: labels this application does not know
/// about are preserved as [TransactionKind::Other] rather than rejected, and
/// contribute nothing to balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    /// Money paid into the account.
    Deposit,
    /// Money taken out of the account.
    Withdrawal,
    /// Fees charged by the bank.
    Charges,
    /// Money moved into mutual funds.
    MutualFunds,
    /// A kind this application does not know about.
    Other(String),
}

impl TransactionKind {
    /// The label used to store this kind in the database.
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Charges => "charges",
            TransactionKind::MutualFunds => "mutual_funds",
            TransactionKind::Other(label) => label,
        }
    }
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "deposit" => TransactionKind::Deposit,
            "withdrawal" => TransactionKind::Withdrawal,
            "charges" => TransactionKind::Charges,
            "mutual_funds" => TransactionKind::MutualFunds,
            _ => TransactionKind::Other(value),
        }
    }
}

impl From<TransactionKind> for String {
    fn from(value: TransactionKind) -> Self {
        value.as_str().to_owned()
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
