//! The single sign mapping and balance calculation.
//!
//! Every balance in this application goes through [balance], so every
//! endpoint agrees on which transaction kinds count as money out.

use rust_decimal::Decimal;

use crate::transaction::{Transaction, TransactionKind};

/// The signed contribution of a transaction to a balance.
///
/// Deposits count positive; withdrawals, charges, and mutual fund purchases
/// count negative; kinds this application does not know about contribute
/// nothing.
pub fn signed_amount(transaction: &Transaction) -> Decimal {
    match transaction.kind {
        TransactionKind::Deposit => transaction.amount,
        TransactionKind::Withdrawal | TransactionKind::Charges | TransactionKind::MutualFunds => {
            -transaction.amount
        }
        TransactionKind::Other(_) => Decimal::ZERO,
    }
}

/// The net balance of a set of transactions, rounded to cents.
///
/// The accumulator is an exact decimal, so the result does not depend on
/// summation order, and the balance of a whole set equals the sum of the
/// balances of any partition of it.
pub fn balance(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .map(signed_amount)
        .sum::<Decimal>()
        .round_dp(2)
}
