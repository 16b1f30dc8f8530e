//! Partitioning transactions by bank with per-group balances.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{Error, ledger::balance, transaction::Transaction};

/// The sentinel group for transactions with no bank name.
pub const OTHER_BANK_LABEL: &str = "Other";

/// One bank's transactions and their net balance.
#[derive(Debug, PartialEq, Serialize)]
pub struct BankGroup {
    /// The bank name, or [OTHER_BANK_LABEL] for transactions without one.
    pub bank: String,
    /// The member transactions, in the order they appear in the input.
    pub transactions: Vec<Transaction>,
    /// The net balance of the member transactions.
    pub balance: Decimal,
}

/// Partition transactions by bank and compute each partition's balance.
///
/// Groups appear in the order their bank name is first encountered in the
/// input, so a deterministic input order gives a deterministic group order.
/// The group balances always sum to the balance of the whole input set.
pub fn group_by_bank(transactions: &[Transaction]) -> Vec<BankGroup> {
    let mut groups: Vec<BankGroup> = Vec::new();

    for transaction in transactions {
        let label = transaction.bank.as_deref().unwrap_or(OTHER_BANK_LABEL);

        if !groups.iter().any(|group| group.bank == label) {
            groups.push(BankGroup {
                bank: label.to_owned(),
                transactions: Vec::new(),
                balance: Decimal::ZERO,
            });
        }

        if let Some(group) = groups.iter_mut().find(|group| group.bank == label) {
            group.transactions.push(transaction.clone());
        }
    }

    for group in &mut groups {
        group.balance = balance(&group.transactions);
    }

    debug_assert_eq!(
        verify_reconciliation(&groups, balance(transactions)),
        Ok(()),
        "bank group balances must sum to the set balance"
    );

    groups
}

/// Check that the group balances sum to the balance of the whole set.
///
/// # Errors
/// Returns [Error::AggregationInvariantViolated] on a mismatch. A mismatch is
/// a programming defect, so this should fail loudly in tests rather than be
/// handled at runtime.
pub fn verify_reconciliation(groups: &[BankGroup], total: Decimal) -> Result<(), Error> {
    let got: Decimal = groups.iter().map(|group| group.balance).sum();

    if got == total {
        Ok(())
    } else {
        Err(Error::AggregationInvariantViolated { want: total, got })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        ledger::balance,
        transaction::{Transaction, TransactionKind},
    };

    use super::{OTHER_BANK_LABEL, group_by_bank, verify_reconciliation};

    fn transaction(id: i64, amount: &str, kind: TransactionKind, bank: Option<&str>) -> Transaction {
        Transaction {
            id,
            amount: amount.parse().unwrap(),
            date: date!(2024 - 06 - 01),
            kind,
            category: None,
            bank: bank.map(str::to_owned),
            counterparty: None,
            description: None,
        }
    }

    fn decimal(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn groups_appear_in_first_encounter_order() {
        let transactions = vec![
            transaction(1, "100", TransactionKind::Deposit, Some("HDFC")),
            transaction(2, "50", TransactionKind::Deposit, Some("SBI")),
            transaction(3, "10", TransactionKind::Withdrawal, Some("HDFC")),
        ];

        let groups = group_by_bank(&transactions);

        let got_banks: Vec<&str> = groups.iter().map(|group| group.bank.as_str()).collect();
        assert_eq!(got_banks, vec!["HDFC", "SBI"]);
        assert_eq!(groups[0].transactions.len(), 2);
        assert_eq!(groups[0].balance, decimal("90.00"));
    }

    #[test]
    fn missing_bank_goes_to_the_other_group() {
        let transactions = vec![
            transaction(1, "500", TransactionKind::Deposit, None),
            transaction(2, "20", TransactionKind::Charges, None),
            transaction(3, "100", TransactionKind::Deposit, Some("HDFC")),
        ];

        let groups = group_by_bank(&transactions);

        let other = groups
            .iter()
            .find(|group| group.bank == OTHER_BANK_LABEL)
            .expect("expected a group for transactions without a bank");
        assert_eq!(other.transactions.len(), 2);
        assert_eq!(other.balance, decimal("480.00"));
    }

    #[test]
    fn group_balances_reconcile_with_set_balance() {
        let transactions = vec![
            transaction(1, "500", TransactionKind::Deposit, Some("HDFC")),
            transaction(2, "100", TransactionKind::Withdrawal, Some("SBI")),
            transaction(3, "20", TransactionKind::Charges, None),
            transaction(4, "200", TransactionKind::MutualFunds, Some("HDFC")),
            transaction(
                5,
                "999",
                TransactionKind::Other("jenish_personal".to_owned()),
                Some("SBI"),
            ),
        ];

        let groups = group_by_bank(&transactions);

        verify_reconciliation(&groups, balance(&transactions))
            .expect("group balances did not sum to the set balance");
    }

    #[test]
    fn empty_input_produces_no_groups() {
        assert!(group_by_bank(&[]).is_empty());
    }
}
