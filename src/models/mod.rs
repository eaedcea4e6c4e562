pub mod allocation;
pub mod denomination;
pub mod inventory;

pub use allocation::{parse_amount, Allocation, RecipientBreakdown, RecipientRequest};
pub use denomination::{BillCount, Denomination, DENOMINATIONS};
pub use inventory::{BillCounts, BillInventory, Combo};
