//! Character-wide bonus aggregation

use serde::Serialize;
use std::collections::BTreeMap;

use crate::bonuses::extract::SkillBonus;
use crate::bonuses::patterns::{BonusStat, Element, Rating};
use crate::character::CharacterRecord;
use crate::core::types::SkillId;
use crate::engine::EngineContext;

/// Summed bonuses for one character, plus which skills fed them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CharacterBonuses {
    pub values: BTreeMap<BonusStat, i32>,
    /// Best rating per element
    pub resistances: BTreeMap<Element, Rating>,
    pub weaknesses: BTreeMap<Element, Rating>,
    pub contributors: Vec<SkillId>,
    /// Owned but replaced by an owned upgrade
    pub superseded: Vec<SkillId>,
    /// Owned but their equipment condition is not met
    pub gated: Vec<SkillId>,
    pub last_stand: bool,
    pub dual_wield_penalty: bool,
}

impl CharacterBonuses {
    pub fn get(&self, stat: BonusStat) -> i32 {
        self.values.get(&stat).copied().unwrap_or(0)
    }

    pub fn resistance(&self, element: Element) -> Option<Rating> {
        self.resistances.get(&element).copied()
    }

    pub fn weakness(&self, element: Element) -> Option<Rating> {
        self.weaknesses.get(&element).copied()
    }

    fn add(&mut self, stat: BonusStat, amount: i32) {
        *self.values.entry(stat).or_insert(0) += amount;
    }

    fn absorb(&mut self, id: &SkillId, bonus: &SkillBonus) {
        for (stat, value) in &bonus.values {
            self.add(*stat, *value);
        }
        for (element, rating) in &bonus.resistances {
            let best = self.resistances.entry(*element).or_insert(*rating);
            *best = (*best).max(*rating);
        }
        for (element, rating) in &bonus.weaknesses {
            let best = self.weaknesses.entry(*element).or_insert(*rating);
            *best = (*best).max(*rating);
        }
        self.contributors.push(id.clone());
    }
}

/// Aggregate every bonus a character currently enjoys
///
/// Pure over (unlocked skills, active toggles, equipment, current hp):
/// superseded skills are dropped, toggle skills count only while active,
/// equipment conditions gate a skill's whole bonus set, then the last-stand
/// and dual-wield rules apply.
pub fn compute_character_bonuses(ctx: &EngineContext, record: &CharacterRecord) -> CharacterBonuses {
    let mut out = CharacterBonuses::default();
    let owned = record.unlocked.ids();
    let upgrades = ctx.upgrades();

    let effective = upgrades.filter_superseded(owned.iter(), &record.unlocked);
    out.superseded = owned
        .iter()
        .filter(|id| !effective.contains(id))
        .cloned()
        .collect();

    // Permanent passives
    for id in &effective {
        let Some(bonus) = ctx.skill_bonus(id.as_str()) else { continue };
        if bonus.is_empty() || bonus.toggle {
            continue;
        }
        if bonus.applies_to(&record.equipment) {
            out.absorb(id, &bonus);
        } else {
            out.gated.push(id.clone());
        }
    }

    // Active toggles, not already in the sum above
    for id in &record.active_toggles {
        if !record.unlocked.contains(id.as_str()) || !effective.contains(id) {
            continue;
        }
        let Some(bonus) = ctx.skill_bonus(id.as_str()) else { continue };
        if bonus.is_empty() || !bonus.toggle {
            continue;
        }
        if bonus.applies_to(&record.equipment) {
            out.absorb(id, &bonus);
        } else {
            out.gated.push(id.clone());
        }
    }

    let config = ctx.config();
    let last_stand = &config.last_stand;
    if record.unlocked.contains(last_stand.skill_id.as_str()) && record.current_hp <= last_stand.hp_threshold {
        out.add(BonusStat::PhysicalDefence, last_stand.physical_defence);
        out.add(BonusStat::MagicalDefence, last_stand.magical_defence);
        out.last_stand = true;
    }

    let dual_wield = &config.dual_wield;
    if record.unlocked.contains(dual_wield.skill_id.as_str())
        && !record.equipment.both_hands(dual_wield.exempt_category)
    {
        out.add(BonusStat::Accuracy, dual_wield.accuracy_penalty);
        out.dual_wield_penalty = true;
    }

    out
}
