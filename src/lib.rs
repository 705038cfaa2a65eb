//! Lumen Progression - character progression economy
//!
//! Characters spend lumens to raise stats and unlock skills in a
//! prerequisite graph. Skill bonuses are parsed from description text.

pub mod bonuses;
pub mod catalog;
pub mod character;
pub mod core;
pub mod economy;
pub mod engine;
pub mod graph;
pub mod ledger;
pub mod scoring;

pub use engine::EngineContext;
pub use ledger::ProgressionLedger;
