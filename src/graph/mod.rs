//! Skill graph: prerequisite resolution, reverse dependencies, upgrade
//! chains and path planning
//!
//! Everything here is derived from the immutable catalog. Walks carry a
//! visited set so malformed (cyclic) data cannot hang them.

pub mod dependents;
pub mod path;
pub mod prerequisites;
pub mod upgrade_chain;

pub use dependents::DependencyIndex;
pub use path::{plan_path, PathPlan, PlanStep};
pub use prerequisites::{can_unlock, fusion_available, is_satisfied, resolve, Overlay, Resolution, SkillSet};
pub use upgrade_chain::UpgradeChainIndex;
