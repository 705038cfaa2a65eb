//! Base stat block

use serde::{Deserialize, Serialize};

use crate::core::config::ProgressionConfig;
use crate::core::types::Stat;

/// The seven purchasable stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBlock {
    pub hp: u32,
    pub stamina: u32,
    pub strength: u32,
    pub magic_power: u32,
    pub speed: u32,
    pub physical_defence: u32,
    pub magical_defence: u32,
}

impl StatBlock {
    /// Every stat at its configured starting value
    pub fn starting(config: &ProgressionConfig) -> Self {
        let mut block = Self::default();
        for stat in Stat::ALL {
            block.set(stat, config.stat(stat).start);
        }
        block
    }

    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Stamina => self.stamina,
            Stat::Strength => self.strength,
            Stat::MagicPower => self.magic_power,
            Stat::Speed => self.speed,
            Stat::PhysicalDefence => self.physical_defence,
            Stat::MagicalDefence => self.magical_defence,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u32) {
        let slot = match stat {
            Stat::Hp => &mut self.hp,
            Stat::Stamina => &mut self.stamina,
            Stat::Strength => &mut self.strength,
            Stat::MagicPower => &mut self.magic_power,
            Stat::Speed => &mut self.speed,
            Stat::PhysicalDefence => &mut self.physical_defence,
            Stat::MagicalDefence => &mut self.magical_defence,
        };
        *slot = value;
    }

    /// Sum of all seven stats
    pub fn total(&self) -> u32 {
        Stat::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// How far a stat has progressed from start to cap (0.0 to 1.0)
    pub fn progress(&self, stat: Stat, config: &ProgressionConfig) -> f32 {
        let def = config.stat(stat);
        let range = def.max.saturating_sub(def.start);
        if range == 0 {
            return 1.0;
        }
        let gained = self.get(stat).saturating_sub(def.start).min(range);
        gained as f32 / range as f32
    }
}
