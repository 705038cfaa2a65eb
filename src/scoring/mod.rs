//! Build scoring: power level, mastery and advisory checks
//!
//! Read-only views over a character record and the engine context.

pub mod advisor;
pub mod power;

pub use advisor::{recommended_purchases, validate_build, BuildWarning, Purchase, Recommendation};
pub use power::{mastery_levels, power_level, MasteryLevel, MAX_TIER};
