//! Description -> structured bonus

use serde::Serialize;
use std::collections::BTreeMap;

use crate::bonuses::condition::{ConditionParser, EquipmentCondition};
use crate::bonuses::patterns::{BonusStat, BonusTarget, Element, PatternTable, PatternValue, Rating};
use crate::character::Equipment;

/// Parsed bonus of one skill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillBonus {
    pub values: BTreeMap<BonusStat, i32>,
    pub resistances: BTreeMap<Element, Rating>,
    pub weaknesses: BTreeMap<Element, Rating>,
    /// Gate on the whole set
    pub condition: Option<EquipmentCondition>,
    /// Applies only while toggled on
    pub toggle: bool,
}

impl SkillBonus {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.resistances.is_empty() && self.weaknesses.is_empty()
    }

    pub fn get(&self, stat: BonusStat) -> i32 {
        self.values.get(&stat).copied().unwrap_or(0)
    }

    /// Equipment gate passes (or there is none)
    pub fn applies_to(&self, equipment: &Equipment) -> bool {
        self.condition.as_ref().map_or(true, |c| c.is_met(equipment))
    }
}

/// Action and reaction skills carry none of these and grant nothing
pub fn has_bonus_marker(lower: &str) -> bool {
    lower.contains("passive") || lower.contains("toggle") || lower.contains('+')
}

/// Runs the pattern table and condition parser over skill text
#[derive(Debug, Clone)]
pub struct BonusExtractor {
    patterns: PatternTable,
    conditions: Option<ConditionParser>,
}

impl BonusExtractor {
    pub fn new() -> Self {
        let conditions = match ConditionParser::new() {
            Ok(parser) => Some(parser),
            Err(e) => {
                tracing::warn!("Equipment condition matcher failed to compile: {}", e);
                None
            }
        };
        Self {
            patterns: PatternTable::standard(),
            conditions,
        }
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Parse a description. Pure: the same text always yields the same bonus.
    pub fn extract(&self, desc: &str) -> SkillBonus {
        let lower = desc.to_lowercase();
        if !has_bonus_marker(&lower) {
            return SkillBonus::default();
        }

        let mut bonus = SkillBonus {
            toggle: lower.contains("toggle"),
            ..SkillBonus::default()
        };

        for pattern in self.patterns.iter() {
            let Some(value) = pattern.best_match(&lower) else { continue };
            match (pattern.target, value) {
                (BonusTarget::Stat(stat), PatternValue::Flat(v)) => {
                    bonus.values.insert(stat, v);
                }
                (BonusTarget::Resistance(element), PatternValue::Rating(r)) => {
                    bonus.resistances.insert(element, r);
                }
                (BonusTarget::Weakness(element), PatternValue::Rating(r)) => {
                    bonus.weaknesses.insert(element, r);
                }
                _ => {}
            }
        }

        if !bonus.is_empty() {
            bonus.condition = self.conditions.as_ref().and_then(|c| c.parse(&lower));
        }
        bonus
    }
}

impl Default for BonusExtractor {
    fn default() -> Self {
        Self::new()
    }
}
