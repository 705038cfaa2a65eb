//! Serializable character record
//!
//! This is the full persisted shape of a character. The ledger owns one and
//! mutates it in place; `snapshot()` hands a copy to whatever persists it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::character::equipment::Equipment;
use crate::character::stats::StatBlock;
use crate::character::unlocked::UnlockedSkills;
use crate::core::config::ProgressionConfig;
use crate::core::types::{CharacterId, Lumens, SkillId};
use crate::economy::MilestoneFlags;

/// Display-only coin purse, outside the progression economy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purse {
    pub copper: u32,
    pub silver: u32,
    pub gold: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    pub lumens: Lumens,
    pub purse: Purse,
    pub stats: StatBlock,
    /// Hit points right now, as opposed to the purchased hp stat
    pub current_hp: u32,
    pub milestones: MilestoneFlags,
    pub unlocked: UnlockedSkills,
    pub active_toggles: BTreeSet<SkillId>,
    pub equipment: Equipment,
    pub total_skills: u32,
    pub total_lumens_spent: Lumens,
}

/// On-disk shape; fields added after the first release are optional
#[derive(Deserialize)]
struct StoredRecord {
    id: CharacterId,
    name: String,
    lumens: Lumens,
    #[serde(default)]
    purse: Purse,
    stats: StatBlock,
    /// Missing means full health
    #[serde(default)]
    current_hp: Option<u32>,
    #[serde(default)]
    milestones: MilestoneFlags,
    #[serde(default)]
    unlocked: UnlockedSkills,
    #[serde(default)]
    active_toggles: BTreeSet<SkillId>,
    #[serde(default)]
    equipment: Equipment,
    #[serde(default)]
    total_skills: u32,
    #[serde(default)]
    total_lumens_spent: Lumens,
}

impl From<StoredRecord> for CharacterRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            lumens: stored.lumens,
            purse: stored.purse,
            current_hp: stored.current_hp.unwrap_or(stored.stats.hp),
            stats: stored.stats,
            milestones: stored.milestones,
            unlocked: stored.unlocked,
            active_toggles: stored.active_toggles,
            equipment: stored.equipment,
            total_skills: stored.total_skills,
            total_lumens_spent: stored.total_lumens_spent,
        }
    }
}

impl CharacterRecord {
    /// A fresh character at starting stats with a lumen grant
    pub fn new(name: impl Into<String>, lumens: Lumens, config: &ProgressionConfig) -> Self {
        let stats = StatBlock::starting(config);
        Self {
            id: CharacterId::new(),
            name: name.into(),
            lumens,
            purse: Purse::default(),
            current_hp: stats.hp,
            stats,
            milestones: MilestoneFlags::new(),
            unlocked: UnlockedSkills::new(),
            active_toggles: BTreeSet::new(),
            equipment: Equipment::default(),
            total_skills: 0,
            total_lumens_spent: 0,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}
