//! One-time stat milestones and the floors they leave behind

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::config::ProgressionConfig;
use crate::core::types::Stat;

/// Achieved milestone flags ("hp25", "stamina15", ...)
///
/// Flags are only ever added. Nothing in the ledger clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestoneFlags(BTreeSet<String>);

impl MilestoneFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self, flag: &str) -> bool {
        self.0.contains(flag)
    }

    /// Mark a flag achieved. Returns false if it already was.
    pub fn set(&mut self, flag: &str) -> bool {
        self.0.insert(flag.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A milestone triggered by a purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneAward {
    pub flag: String,
    pub bonus: u32,
}

/// Milestone fired by a stat landing exactly on `new_value`, if its flag is still unset
pub fn milestone_bonus(
    config: &ProgressionConfig,
    stat: Stat,
    new_value: u32,
    achieved: &MilestoneFlags,
) -> Option<MilestoneAward> {
    config
        .milestones_for(stat)
        .iter()
        .find(|m| m.threshold == new_value && !achieved.is_set(&m.flag))
        .map(|m| MilestoneAward {
            flag: m.flag.clone(),
            bonus: m.bonus,
        })
}

/// Lowest value a refund may leave the stat at
///
/// Starting value plus the cumulative bonus of every milestone up to and
/// including the highest one achieved, so the floor never moves down.
pub fn minimum_value(config: &ProgressionConfig, stat: Stat, achieved: &MilestoneFlags) -> u32 {
    let start = config.stat(stat).start;
    let mut cumulative = 0;
    let mut floor = start;
    for milestone in config.milestones_for(stat) {
        cumulative += milestone.bonus;
        if achieved.is_set(&milestone.flag) {
            floor = floor.max(start + cumulative);
        }
    }
    floor
}
