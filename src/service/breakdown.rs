use crate::models::{BillCount, BillCounts, DENOMINATIONS};
use serde::{Deserialize, Serialize};

/// Greedy breakdown assuming unlimited bills.
///
/// Fewest bills for {20, 10, 5, 1} specifically; the greedy choice is not a
/// minimum in general and must not be reused for other denomination sets.
pub fn breakdown_counts(amount: u32) -> BillCounts {
    let mut counts = BillCounts::default();
    let mut remaining = amount;
    for d in DENOMINATIONS {
        let quantity = remaining / d.value();
        remaining -= quantity * d.value();
        counts.set(d, quantity);
    }
    counts
}

/// Suggested bills for one amount, largest first.
pub fn breakdown(amount: u32) -> Vec<BillCount> {
    breakdown_counts(amount).to_bills()
}

/// Outcome of checking hand-entered bill counts against the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEntryCheck {
    pub valid: bool,
    pub expected: u64,
    pub actual: u64,
    /// `actual - expected`; negative when the entry is short.
    pub difference: i64,
    /// Greedy suggestion to reset to when the entry is discarded.
    pub reset_to: Vec<BillCount>,
}

/// Checks operator-edited counts for one recipient against the expected total.
pub fn validate_manual_entry(entered: &BillCounts, expected: u32) -> ManualEntryCheck {
    let actual = entered.total_value();
    let expected_total = u64::from(expected);
    ManualEntryCheck {
        valid: actual == expected_total,
        expected: expected_total,
        actual,
        difference: actual as i64 - expected_total as i64,
        reset_to: breakdown(expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Denomination;
    use proptest::prelude::*;
    use rstest::rstest;

    /// Fewest bills for each amount in 0..=target, by exhaustive DP over the set.
    fn min_bills_table(target: usize) -> Vec<u64> {
        let mut best = vec![u64::MAX; target + 1];
        best[0] = 0;
        for amount in 1..=target {
            for d in DENOMINATIONS {
                let value = d.value() as usize;
                if value <= amount && best[amount - value] != u64::MAX {
                    best[amount] = best[amount].min(best[amount - value] + 1);
                }
            }
        }
        best
    }

    #[test]
    fn breaks_down_thirty_seven() {
        let bills = breakdown(37);
        assert_eq!(
            bills,
            vec![
                BillCount { denomination: Denomination::Twenty, quantity: 1 },
                BillCount { denomination: Denomination::Ten, quantity: 1 },
                BillCount { denomination: Denomination::Five, quantity: 1 },
                BillCount { denomination: Denomination::One, quantity: 2 },
            ]
        );
    }

    #[test]
    fn zero_has_no_bills() {
        assert!(breakdown(0).is_empty());
    }

    #[test]
    fn greedy_uses_fewest_bills_up_to_two_hundred() {
        let best = min_bills_table(200);
        for amount in 0..=200u32 {
            let counts = breakdown_counts(amount);
            assert_eq!(counts.total_value(), u64::from(amount));
            assert_eq!(
                counts.bill_count(),
                best[amount as usize],
                "greedy is not minimal for {}",
                amount
            );
        }
    }

    #[rstest]
    #[case::exact(BillCounts::new(1, 1, 1, 2), 37, true, 0)]
    #[case::short(BillCounts::new(1, 0, 1, 2), 37, false, -10)]
    #[case::over(BillCounts::new(2, 0, 0, 0), 37, false, 3)]
    fn validates_manual_entry(
        #[case] entered: BillCounts,
        #[case] expected: u32,
        #[case] valid: bool,
        #[case] difference: i64,
    ) {
        let check = validate_manual_entry(&entered, expected);
        assert_eq!(check.valid, valid);
        assert_eq!(check.difference, difference);
        assert_eq!(check.reset_to, breakdown(expected));
    }

    proptest! {
        #[test]
        fn breakdown_sums_to_amount(amount in 0u32..=100_000) {
            let total: u64 = breakdown(amount).iter().map(BillCount::value).sum();
            prop_assert_eq!(total, u64::from(amount));
        }
    }
}
