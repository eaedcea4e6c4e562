use crate::error::AllocationError;
use crate::models::denomination::BillCount;
use crate::models::inventory::BillInventory;
use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

/// One recipient's whole-unit target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientRequest {
    pub id: String,
    pub amount: u32,
}

impl RecipientRequest {
    pub fn new(id: impl Into<String>, amount: u32) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }

    /// Validates a raw payout amount. Rounding to whole units happens upstream;
    /// anything fractional, negative or above `max_amount` is rejected here.
    pub fn from_raw(
        id: impl Into<String>,
        raw: &BigDecimal,
        max_amount: u32,
    ) -> Result<Self, AllocationError> {
        let id = id.into();
        let amount = parse_amount(&id, raw, max_amount)?;
        Ok(Self { id, amount })
    }
}

pub fn parse_amount(field: &str, raw: &BigDecimal, max_amount: u32) -> Result<u32, AllocationError> {
    let invalid = |reason| AllocationError::InvalidAmount {
        field: field.to_string(),
        value: raw.to_string(),
        reason,
    };

    if *raw < BigDecimal::zero() {
        return Err(invalid("negative"));
    }
    if raw.with_scale(0) != *raw {
        return Err(invalid("not a whole amount"));
    }
    match raw.to_u32() {
        Some(amount) if amount <= max_amount => Ok(amount),
        _ => Err(invalid("too large")),
    }
}

/// Bills handed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientBreakdown {
    pub id: String,
    pub amount: u32,
    pub bills: Vec<BillCount>,
}

impl RecipientBreakdown {
    pub fn total(&self) -> u64 {
        self.bills.iter().map(BillCount::value).sum()
    }
}

/// A complete, all-or-nothing allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Caller's recipient order.
    pub breakdowns: Vec<RecipientBreakdown>,
    pub remaining: BillInventory,
    /// Combos tried before the search reached a verdict.
    pub steps: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case::whole("25", 25)]
    #[case::zero("0", 0)]
    #[case::trailing_zero_scale("40.00", 40)]
    fn accepts_whole_amounts(#[case] raw: &str, #[case] expected: u32) {
        let raw = BigDecimal::from_str(raw).unwrap();
        let request = RecipientRequest::from_raw("alex", &raw, 1_000).unwrap();
        assert_eq!(request.amount, expected);
    }

    #[rstest]
    #[case::negative("-5", "negative")]
    #[case::fractional("12.5", "not a whole amount")]
    #[case::over_limit("1001", "too large")]
    fn rejects_invalid_amounts(#[case] raw: &str, #[case] expected_reason: &str) {
        let raw = BigDecimal::from_str(raw).unwrap();
        match RecipientRequest::from_raw("alex", &raw, 1_000) {
            Err(AllocationError::InvalidAmount { field, reason, .. }) => {
                assert_eq!(field, "alex");
                assert_eq!(reason, expected_reason);
            }
            other => panic!("expected invalid amount, got {:?}", other),
        }
    }
}
