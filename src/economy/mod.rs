//! Stat economy
//!
//! Pure price and milestone functions. The ledger consults these on every
//! stat purchase and refund; nothing here holds state.

pub mod cost;
pub mod milestone;

pub use cost::{cost_between, cost_to_raise, refund_value};
pub use milestone::{milestone_bonus, minimum_value, MilestoneAward, MilestoneFlags};
