//! Progression configuration with documented constants
//!
//! Every price, cap and threshold the engine uses lives here. The defaults
//! reproduce the standard rulebook; a campaign can override any section from
//! a TOML file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::character::equipment::WeaponCategory;
use crate::core::error::ConfigError;
use crate::core::types::{Lumens, SkillId, Stat};

/// Configuration for the progression economy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    // === STATS ===
    /// Starting value, cap and pricing for every base stat
    pub stats: StatDefinitions,

    /// Price curve for stats that define neither a flat cost nor a table
    ///
    /// cost = floor(base_cost * multiplier ^ upgrade_level)
    pub fallback_cost: GeometricCost,

    // === MILESTONES ===
    /// One-time threshold bonuses per stat, ordered by threshold
    ///
    /// Reaching a threshold exactly grants the bonus and permanently
    /// raises the stat's floor.
    pub milestones: BTreeMap<Stat, Vec<Milestone>>,

    // === HARDCODED RULES ===
    /// Racial passive granting defence while nearly dead
    pub last_stand: LastStandRule,

    /// Accuracy penalty for fighting with two mismatched weapons
    pub dual_wield: DualWieldRule,

    // === BUILD ADVISOR ===
    /// Thresholds for advisory build warnings
    pub advisor: AdvisorThresholds,
}

/// Starting value, maximum and pricing for one stat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDefinition {
    pub start: u32,
    pub max: u32,
    /// Flat price per point, independent of the current value
    #[serde(default)]
    pub flat_cost: Option<Lumens>,
    /// Price indexed by upgrade level; the last entry repeats past the end
    #[serde(default)]
    pub cost_table: Vec<Lumens>,
}

impl StatDefinition {
    fn flat(start: u32, max: u32, cost: Lumens) -> Self {
        Self {
            start,
            max,
            flat_cost: Some(cost),
            cost_table: Vec::new(),
        }
    }

    fn tabled(start: u32, max: u32, table: &[Lumens]) -> Self {
        Self {
            start,
            max,
            flat_cost: None,
            cost_table: table.to_vec(),
        }
    }
}

/// Per-stat definitions, one field per stat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDefinitions {
    pub hp: StatDefinition,
    pub stamina: StatDefinition,
    pub strength: StatDefinition,
    pub magic_power: StatDefinition,
    pub speed: StatDefinition,
    pub physical_defence: StatDefinition,
    pub magical_defence: StatDefinition,
}

impl StatDefinitions {
    pub fn get(&self, stat: Stat) -> &StatDefinition {
        match stat {
            Stat::Hp => &self.hp,
            Stat::Stamina => &self.stamina,
            Stat::Strength => &self.strength,
            Stat::MagicPower => &self.magic_power,
            Stat::Speed => &self.speed,
            Stat::PhysicalDefence => &self.physical_defence,
            Stat::MagicalDefence => &self.magical_defence,
        }
    }
}

impl Default for StatDefinitions {
    fn default() -> Self {
        let attack_table = [8, 12, 16, 20, 25, 30, 35];
        let defence_table = [4, 6, 8, 10, 12, 15, 18, 21, 24, 28];
        Self {
            hp: StatDefinition::flat(10, 250, 3),
            stamina: StatDefinition::flat(5, 50, 5),
            strength: StatDefinition::tabled(1, 8, &attack_table),
            magic_power: StatDefinition::tabled(1, 8, &attack_table),
            speed: StatDefinition::tabled(2, 12, &[6, 10, 14, 18, 22, 26, 30, 35, 40, 45]),
            physical_defence: StatDefinition::tabled(0, 16, &defence_table),
            magical_defence: StatDefinition::tabled(0, 16, &defence_table),
        }
    }
}

/// Geometric price growth for untabled stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricCost {
    pub base_cost: Lumens,
    pub multiplier: f64,
}

impl Default for GeometricCost {
    fn default() -> Self {
        Self {
            base_cost: 5,
            multiplier: 1.5,
        }
    }
}

/// A one-time stat threshold bonus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub threshold: u32,
    pub bonus: u32,
    pub flag: String,
}

impl Milestone {
    fn new(threshold: u32, bonus: u32, flag: &str) -> Self {
        Self {
            threshold,
            bonus,
            flag: flag.to_string(),
        }
    }
}

fn default_milestones() -> BTreeMap<Stat, Vec<Milestone>> {
    let hp = [(25, 5), (50, 10), (100, 25), (200, 25), (300, 25), (400, 25), (500, 25)]
        .into_iter()
        .map(|(t, b)| Milestone::new(t, b, &format!("hp{}", t)))
        .collect();
    let stamina = [(15, 3), (25, 5), (40, 10), (60, 15)]
        .into_iter()
        .map(|(t, b)| Milestone::new(t, b, &format!("stamina{}", t)))
        .collect();

    let mut milestones = BTreeMap::new();
    milestones.insert(Stat::Hp, hp);
    milestones.insert(Stat::Stamina, stamina);
    milestones
}

/// Flat defence granted by a racial passive while current hp is at or below a threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastStandRule {
    pub skill_id: SkillId,
    pub hp_threshold: u32,
    pub physical_defence: i32,
    pub magical_defence: i32,
}

impl Default for LastStandRule {
    fn default() -> Self {
        Self {
            skill_id: SkillId::from("stoneblood"),
            hp_threshold: 5,
            physical_defence: 3,
            magical_defence: 3,
        }
    }
}

/// Accuracy penalty while dual wielding anything but a matched pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualWieldRule {
    pub skill_id: SkillId,
    pub accuracy_penalty: i32,
    /// Both hands holding this category waives the penalty
    pub exempt_category: WeaponCategory,
}

impl Default for DualWieldRule {
    fn default() -> Self {
        Self {
            skill_id: SkillId::from("dual_wield"),
            accuracy_penalty: -6,
            exempt_category: WeaponCategory::Dagger,
        }
    }
}

/// Thresholds for the advisory build validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorThresholds {
    /// Max difference between the most and least developed combat stat (0.0 to 1.0)
    pub imbalance_spread: f32,
    /// Most expensive owned skill's stamina cost as a share of the stamina pool
    pub stamina_ratio: f32,
    /// Share of unlocked skills in one category that counts as skewed
    pub category_share: f32,
    /// Skewed-category check only runs past this many unlocked skills
    pub category_min_skills: usize,
    /// Hp below which a build counts as fragile
    pub survivability_hp: u32,
    /// Combined physical + magical defence below which a build counts as fragile
    pub survivability_defence: u32,
    /// Lumens spent before the survivability check applies
    pub survivability_spent: Lumens,
}

impl Default for AdvisorThresholds {
    fn default() -> Self {
        Self {
            imbalance_spread: 0.6,
            stamina_ratio: 0.5,
            category_share: 0.8,
            category_min_skills: 5,
            survivability_hp: 25,
            survivability_defence: 4,
            survivability_spent: 50,
        }
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            stats: StatDefinitions::default(),
            fallback_cost: GeometricCost::default(),
            milestones: default_milestones(),
            last_stand: LastStandRule::default(),
            dual_wield: DualWieldRule::default(),
            advisor: AdvisorThresholds::default(),
        }
    }
}

impl ProgressionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stat(&self, stat: Stat) -> &StatDefinition {
        self.stats.get(stat)
    }

    /// Milestones for a stat, ordered by threshold
    pub fn milestones_for(&self, stat: Stat) -> &[Milestone] {
        self.milestones.get(&stat).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        for stat in Stat::ALL {
            let def = self.stat(stat);
            if def.start > def.max {
                return Err(ConfigError::Invalid(format!(
                    "{}: start ({}) exceeds max ({})",
                    stat, def.start, def.max
                )));
            }
            // Prices never drop as a stat grows
            if def.cost_table.windows(2).any(|w| w[0] > w[1]) {
                return Err(ConfigError::Invalid(format!(
                    "{}: cost table must be non-decreasing",
                    stat
                )));
            }
        }

        if self.fallback_cost.multiplier < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "fallback multiplier ({}) must be >= 1.0",
                self.fallback_cost.multiplier
            )));
        }

        for (stat, list) in &self.milestones {
            if list.windows(2).any(|w| w[0].threshold >= w[1].threshold) {
                return Err(ConfigError::Invalid(format!(
                    "{}: milestone thresholds must be strictly increasing",
                    stat
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ProgressionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_caps() {
        let config = ProgressionConfig::default();
        assert_eq!(config.stat(Stat::Hp).max, 250);
        assert_eq!(config.stat(Stat::Stamina).max, 50);
        assert_eq!(config.stat(Stat::Strength).max, 8);
        assert_eq!(config.stat(Stat::MagicPower).max, 8);
        assert_eq!(config.stat(Stat::Speed).max, 12);
        assert_eq!(config.stat(Stat::PhysicalDefence).max, 16);
        assert_eq!(config.stat(Stat::MagicalDefence).max, 16);
    }

    #[test]
    fn test_partial_toml_override() {
        let config = ProgressionConfig::from_toml_str(
            r#"
            [fallback_cost]
            base_cost = 7
            multiplier = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(config.fallback_cost.base_cost, 7);
        // Untouched sections keep their defaults
        assert_eq!(config.stat(Stat::Speed).cost_table[0], 6);
        assert_eq!(config.milestones_for(Stat::Hp).len(), 7);
    }

    #[test]
    fn test_rejects_decreasing_table() {
        let mut config = ProgressionConfig::default();
        config.stats.speed.cost_table = vec![10, 6];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unordered_milestones() {
        let mut config = ProgressionConfig::default();
        config
            .milestones
            .insert(Stat::Strength, vec![Milestone::new(5, 1, "str5"), Milestone::new(3, 1, "str3")]);
        assert!(config.validate().is_err());
    }
}
