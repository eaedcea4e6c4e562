use crate::error::InventoryError;
use crate::models::denomination::{BillCount, Denomination, DENOMINATIONS};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Count per denomination.
///
/// Used both for the operator's physical stock (`BillInventory`) and for a
/// single recipient's bills (`Combo`). Serialized keyed by face value:
/// `{"20": 1, "10": 0, "5": 2, "1": 3}`; missing keys are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BillCounts {
    #[serde(rename = "20")]
    pub twenties: u32,
    #[serde(rename = "10")]
    pub tens: u32,
    #[serde(rename = "5")]
    pub fives: u32,
    #[serde(rename = "1")]
    pub ones: u32,
}

/// Physically counted stock, never increased internally.
pub type BillInventory = BillCounts;

/// Bills for one target amount.
pub type Combo = BillCounts;

impl BillCounts {
    pub const fn new(twenties: u32, tens: u32, fives: u32, ones: u32) -> Self {
        Self {
            twenties,
            tens,
            fives,
            ones,
        }
    }

    pub fn get(&self, denomination: Denomination) -> u32 {
        match denomination {
            Denomination::Twenty => self.twenties,
            Denomination::Ten => self.tens,
            Denomination::Five => self.fives,
            Denomination::One => self.ones,
        }
    }

    pub fn set(&mut self, denomination: Denomination, count: u32) {
        match denomination {
            Denomination::Twenty => self.twenties = count,
            Denomination::Ten => self.tens = count,
            Denomination::Five => self.fives = count,
            Denomination::One => self.ones = count,
        }
    }

    pub fn with(mut self, denomination: Denomination, count: u32) -> Self {
        self.set(denomination, count);
        self
    }

    /// Σ count × face value.
    pub fn total_value(&self) -> u64 {
        DENOMINATIONS
            .iter()
            .map(|&d| u64::from(self.get(d)) * u64::from(d.value()))
            .sum()
    }

    pub fn bill_count(&self) -> u64 {
        DENOMINATIONS.iter().map(|&d| u64::from(self.get(d))).sum()
    }

    pub fn is_empty(&self) -> bool {
        DENOMINATIONS.iter().all(|&d| self.get(d) == 0)
    }

    /// True when every count is ≤ the matching count in `other`.
    pub fn fits_within(&self, other: &BillCounts) -> bool {
        DENOMINATIONS.iter().all(|&d| self.get(d) <= other.get(d))
    }

    /// Component-wise partial order; `None` when some counts are larger and others smaller.
    pub fn compare(&self, other: &BillCounts) -> Option<Ordering> {
        match (self.fits_within(other), other.fits_within(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }

    /// Component-wise `self - taken`. Fails on the first denomination that would go negative.
    pub fn checked_sub(&self, taken: &BillCounts) -> Result<BillCounts, InventoryError> {
        let mut out = *self;
        for d in DENOMINATIONS {
            let available = self.get(d);
            let requested = taken.get(d);
            let left = available
                .checked_sub(requested)
                .ok_or(InventoryError::Underflow {
                    denomination: d,
                    available,
                    requested,
                })?;
            out.set(d, left);
        }
        Ok(out)
    }

    /// Largest first, zero quantities omitted.
    pub fn to_bills(&self) -> Vec<BillCount> {
        DENOMINATIONS
            .iter()
            .filter_map(|&d| match self.get(d) {
                0 => None,
                quantity => Some(BillCount {
                    denomination: d,
                    quantity,
                }),
            })
            .collect()
    }

    /// Tie-break key: fewer $1 first, then fewer $5, then $10, then $20.
    pub(crate) fn preference_key(&self) -> (u32, u32, u32, u32) {
        (self.ones, self.fives, self.tens, self.twenties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty(BillCounts::default(), 0)]
    #[case::one_each(BillCounts::new(1, 1, 1, 1), 36)]
    #[case::mixed(BillCounts::new(3, 0, 2, 7), 77)]
    fn total_value_sums_face_values(#[case] counts: BillCounts, #[case] expected: u64) {
        assert_eq!(counts.total_value(), expected);
    }

    #[test]
    fn checked_sub_subtracts_component_wise() {
        let inventory = BillCounts::new(2, 3, 4, 5);
        let taken = BillCounts::new(1, 3, 0, 2);
        assert_eq!(
            inventory.checked_sub(&taken),
            Ok(BillCounts::new(1, 0, 4, 3))
        );
    }

    #[test]
    fn checked_sub_reports_underflow_instead_of_clamping() {
        let inventory = BillCounts::new(0, 2, 2, 5);
        let taken = BillCounts::new(0, 0, 1, 10);
        assert_eq!(
            inventory.checked_sub(&taken),
            Err(InventoryError::Underflow {
                denomination: Denomination::One,
                available: 5,
                requested: 10,
            })
        );
    }

    #[rstest]
    #[case::equal(BillCounts::new(1, 2, 3, 4), BillCounts::new(1, 2, 3, 4), Some(Ordering::Equal))]
    #[case::less(BillCounts::new(0, 2, 3, 4), BillCounts::new(1, 2, 3, 4), Some(Ordering::Less))]
    #[case::greater(BillCounts::new(1, 2, 3, 5), BillCounts::new(1, 2, 3, 4), Some(Ordering::Greater))]
    #[case::incomparable(BillCounts::new(2, 0, 0, 0), BillCounts::new(0, 0, 0, 40), None)]
    fn compare_is_component_wise(
        #[case] left: BillCounts,
        #[case] right: BillCounts,
        #[case] expected: Option<Ordering>,
    ) {
        assert_eq!(left.compare(&right), expected);
    }

    #[test]
    fn to_bills_omits_zero_counts_largest_first() {
        let bills = BillCounts::new(1, 0, 1, 2).to_bills();
        let pairs: Vec<(u32, u32)> = bills
            .iter()
            .map(|b| (b.denomination.value(), b.quantity))
            .collect();
        assert_eq!(pairs, vec![(20, 1), (5, 1), (1, 2)]);
    }

    #[test]
    fn deserializes_partial_face_value_map() {
        let counts: BillCounts = serde_json::from_str(r#"{"20": 1, "1": 3}"#).unwrap();
        assert_eq!(counts, BillCounts::new(1, 0, 0, 3));
        assert!(!counts.is_empty());
        assert!(BillCounts::default().is_empty());
    }
}
