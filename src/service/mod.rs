pub mod allocator;
pub mod breakdown;
pub mod combinations;

pub use allocator::{
    Allocator, SearchBudget, DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_RECIPIENTS, DEFAULT_MAX_STEPS,
};
pub use breakdown::{breakdown, breakdown_counts, validate_manual_entry, ManualEntryCheck};
pub use combinations::{generate, generate_within};
