//! Running totals over date-ordered fund contributions.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::fund_contribution::FundContribution;

/// A fund contribution decorated with the running total up to and including
/// it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningTotal {
    /// The contribution itself.
    #[serde(flatten)]
    pub contribution: FundContribution,
    /// The sum of all amounts from the first contribution through this one,
    /// rounded to cents.
    pub cumulative_total: Decimal,
}

/// Compute the running total for each contribution, in order.
///
/// This is a strict left-to-right prefix sum over the input, which callers
/// supply ordered by ascending date with ties broken by creation order.
/// Amounts may be negative (corrections); the totals are the exact signed
/// prefix sums, with no monotonicity assumed.
pub fn cumulative_totals(contributions: &[FundContribution]) -> Vec<RunningTotal> {
    let mut total = Decimal::ZERO;

    contributions
        .iter()
        .map(|contribution| {
            total += contribution.amount;

            RunningTotal {
                contribution: contribution.clone(),
                cumulative_total: total.round_dp(2),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::fund_contribution::FundContribution;

    use super::cumulative_totals;

    fn contribution(id: i64, amount: &str, date: time::Date) -> FundContribution {
        FundContribution {
            id,
            amount: amount.parse().unwrap(),
            date,
        }
    }

    fn decimal(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn totals_are_prefix_sums() {
        let contributions = vec![
            contribution(1, "100", date!(2024 - 01 - 01)),
            contribution(2, "50", date!(2024 - 02 - 01)),
            contribution(3, "25", date!(2024 - 03 - 01)),
        ];

        let got = cumulative_totals(&contributions);

        let got_totals: Vec<Decimal> = got.iter().map(|row| row.cumulative_total).collect();
        assert_eq!(
            got_totals,
            vec![decimal("100.00"), decimal("150.00"), decimal("175.00")]
        );
    }

    #[test]
    fn negative_corrections_are_summed_exactly() {
        let contributions = vec![
            contribution(1, "100", date!(2024 - 01 - 01)),
            contribution(2, "-30.50", date!(2024 - 01 - 15)),
            contribution(3, "10", date!(2024 - 02 - 01)),
        ];

        let got = cumulative_totals(&contributions);

        let got_totals: Vec<Decimal> = got.iter().map(|row| row.cumulative_total).collect();
        assert_eq!(
            got_totals,
            vec![decimal("100.00"), decimal("69.50"), decimal("79.50")]
        );
    }

    #[test]
    fn recomputation_yields_the_same_sequence() {
        let contributions = vec![
            contribution(1, "1.11", date!(2024 - 01 - 01)),
            contribution(2, "2.22", date!(2024 - 01 - 01)),
        ];

        let first = cumulative_totals(&contributions);
        let second = cumulative_totals(&contributions);

        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(cumulative_totals(&[]).is_empty());
    }
}
