use crate::models::Denomination;
use thiserror::Error;

/// Inventory arithmetic failures. Subtraction never clamps, so hitting this
/// means an admissibility check upstream let through a combo it should not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("cannot take {requested} x {denomination} bills, only {available} left")]
    Underflow {
        denomination: Denomination,
        available: u32,
        requested: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("invalid amount for {field}: {value} ({reason})")]
    InvalidAmount {
        field: String,
        value: String,
        reason: &'static str,
    },
    #[error("{count} recipients exceed the limit of {max}")]
    TooManyRecipients { count: usize, max: usize },
    #[error("recipient {0} appears more than once")]
    DuplicateRecipient(String),
    #[error("inventory is empty but {0} recipient(s) need cash")]
    EmptyInventory(usize),
    #[error("amount {amount} for recipient {recipient} cannot be built from the available bills")]
    UnrepresentableAmount { recipient: String, amount: u32 },
    #[error("no combination of bills covers every recipient (requested {requested}, on hand {available})")]
    InfeasibleAllocation { requested: u64, available: u64 },
    #[error("search gave up after {max_steps} steps without a verdict")]
    SearchBudgetExhausted { max_steps: u64 },
    #[error("more than {max_candidates} candidate combos needed before searching")]
    CandidateLimitExceeded { max_candidates: u64 },
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl AllocationError {
    /// Stable identifier used in API payloads.
    pub fn code(&self) -> &'static str {
        match self {
            AllocationError::InvalidAmount { .. } => "invalid_amount",
            AllocationError::TooManyRecipients { .. } => "too_many_recipients",
            AllocationError::DuplicateRecipient(_) => "duplicate_recipient",
            AllocationError::EmptyInventory(_) => "empty_inventory",
            AllocationError::UnrepresentableAmount { .. } => "unrepresentable_amount",
            AllocationError::InfeasibleAllocation { .. } => "infeasible_allocation",
            AllocationError::SearchBudgetExhausted { .. } => "search_budget_exhausted",
            AllocationError::CandidateLimitExceeded { .. } => "candidate_limit_exceeded",
            AllocationError::Inventory(_) => "inventory_underflow",
        }
    }

    /// Malformed input, rejected before any search runs.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            AllocationError::InvalidAmount { .. }
                | AllocationError::TooManyRecipients { .. }
                | AllocationError::DuplicateRecipient(_)
        )
    }

    /// Expected "no cash fits" outcomes the operator can correct.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            AllocationError::EmptyInventory(_)
                | AllocationError::UnrepresentableAmount { .. }
                | AllocationError::InfeasibleAllocation { .. }
                | AllocationError::SearchBudgetExhausted { .. }
                | AllocationError::CandidateLimitExceeded { .. }
        )
    }
}
