//! Progression ledger - one character's mutable progression state
//!
//! Every mutation validates first and only then touches the record, so a
//! failed operation leaves the character exactly as it was.

pub mod preset;

use serde::Serialize;

use crate::bonuses::{compute_character_bonuses, CharacterBonuses};
use crate::character::{CharacterRecord, Equipment};
use crate::core::error::{ProgressionError, Result};
use crate::core::types::{Lumens, SkillId, Stat};
use crate::economy::{cost_to_raise, milestone_bonus, minimum_value, refund_value, MilestoneAward};
use crate::engine::EngineContext;
use crate::graph::{can_unlock, plan_path, resolve, PathPlan, Resolution};

pub use preset::{Preset, PresetReport};

/// A skill as seen from one character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkillState {
    Locked,
    Unlockable,
    Unlocked,
}

/// Result of a successful stat purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatPurchase {
    pub stat: Stat,
    pub cost: Lumens,
    pub new_value: u32,
    pub milestone: Option<MilestoneAward>,
}

/// Result of a successful skill refund
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRefund {
    /// Dependents first, the requested skill last
    pub removed: Vec<SkillId>,
    pub refunded: Lumens,
}

#[derive(Debug, Clone)]
pub struct ProgressionLedger {
    record: CharacterRecord,
}

impl ProgressionLedger {
    pub fn new(record: CharacterRecord) -> Self {
        Self { record }
    }

    /// Brand new character at starting stats
    pub fn fresh(ctx: &EngineContext, name: impl Into<String>, lumens: Lumens) -> Self {
        Self::new(CharacterRecord::new(name, lumens, ctx.config()))
    }

    pub fn record(&self) -> &CharacterRecord {
        &self.record
    }

    /// Serializable copy for whatever persists characters
    pub fn snapshot(&self) -> CharacterRecord {
        self.record.clone()
    }

    pub fn into_record(self) -> CharacterRecord {
        self.record
    }

    pub fn lumens(&self) -> Lumens {
        self.record.lumens
    }

    pub fn stat(&self, stat: Stat) -> u32 {
        self.record.stats.get(stat)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.record.unlocked.contains(id)
    }

    pub fn skill_state(&self, ctx: &EngineContext, id: &str) -> Result<SkillState> {
        let skill = ctx
            .catalog()
            .get(id)
            .ok_or_else(|| ProgressionError::SkillNotFound(SkillId::from(id)))?;
        if self.is_unlocked(id) {
            Ok(SkillState::Unlocked)
        } else if can_unlock(skill, &self.record.unlocked, ctx.catalog()) {
            Ok(SkillState::Unlockable)
        } else {
            Ok(SkillState::Locked)
        }
    }

    // ========================================================================
    // Skills
    // ========================================================================

    /// Buy a skill; returns the lumens paid
    pub fn unlock_skill(&mut self, ctx: &EngineContext, id: &str) -> Result<Lumens> {
        let skill = ctx
            .catalog()
            .get(id)
            .ok_or_else(|| ProgressionError::SkillNotFound(SkillId::from(id)))?;

        if self.is_unlocked(id) {
            return Err(ProgressionError::AlreadyUnlocked(skill.id.clone()));
        }

        match resolve(skill, &self.record.unlocked, ctx.catalog()) {
            Resolution::Satisfied => {}
            Resolution::Unmet { .. } => {
                return Err(ProgressionError::PrerequisitesNotMet(skill.id.clone()));
            }
            Resolution::InvalidReference { dangling } => {
                let missing = dangling.into_iter().next().unwrap_or_else(|| skill.id.clone());
                tracing::warn!("Skill {} can never unlock: {} is not in the catalog", skill.id, missing);
                return Err(ProgressionError::InvalidCatalogReference {
                    skill: skill.id.clone(),
                    missing,
                });
            }
        }

        if self.record.lumens < skill.cost {
            return Err(ProgressionError::InsufficientFunds {
                needed: skill.cost,
                available: self.record.lumens,
            });
        }

        self.record.lumens -= skill.cost;
        self.record
            .unlocked
            .insert(&skill.category, skill.subcategory.as_deref(), skill.id.clone());
        self.record.total_skills += 1;
        self.record.total_lumens_spent = self.record.total_lumens_spent.saturating_add(skill.cost);

        tracing::debug!(
            "{} unlocked {} for {} lumens ({} left)",
            self.record.name,
            skill.id,
            skill.cost,
            self.record.lumens
        );
        Ok(skill.cost)
    }

    /// Refund a skill and every owned skill that depends on it
    ///
    /// The refund is the summed catalog cost of everything removed.
    pub fn refund_skill(&mut self, ctx: &EngineContext, id: &str) -> Result<SkillRefund> {
        if !self.is_unlocked(id) {
            return Err(ProgressionError::NotUnlocked(SkillId::from(id)));
        }

        let unlocked = &self.record.unlocked;
        let mut removed = ctx
            .dependents()
            .transitive(id, |dependent| unlocked.contains(dependent.as_str()));
        removed.reverse();
        removed.push(SkillId::from(id));

        let refunded = removed
            .iter()
            .map(|skill_id| match ctx.catalog().get(skill_id.as_str()) {
                Some(skill) => skill.cost,
                None => {
                    tracing::warn!("Refunding {} which is no longer in the catalog", skill_id);
                    0
                }
            })
            .fold(0, Lumens::saturating_add);

        for skill_id in &removed {
            self.record.unlocked.remove(skill_id.as_str());
            self.record.active_toggles.remove(skill_id);
            if skill_id.as_str() != id {
                tracing::debug!("Cascade refund of {} (depends on {})", skill_id, id);
            }
        }
        self.record.lumens = self.record.lumens.saturating_add(refunded);
        self.record.total_skills = self.record.total_skills.saturating_sub(removed.len() as u32);
        self.record.total_lumens_spent = self.record.total_lumens_spent.saturating_sub(refunded);

        tracing::debug!(
            "{} refunded {} ({} skills, {} lumens)",
            self.record.name,
            id,
            removed.len(),
            refunded
        );
        Ok(SkillRefund { removed, refunded })
    }

    /// Switch a toggle skill on or off; returns the new state
    pub fn toggle_skill(&mut self, ctx: &EngineContext, id: &str) -> Result<bool> {
        if !self.is_unlocked(id) {
            return Err(ProgressionError::NotUnlocked(SkillId::from(id)));
        }
        let skill = ctx
            .catalog()
            .get(id)
            .ok_or_else(|| ProgressionError::SkillNotFound(SkillId::from(id)))?;
        if !skill.is_toggle() {
            return Err(ProgressionError::NotAToggle(skill.id.clone()));
        }

        let active = if self.record.active_toggles.remove(id) {
            false
        } else {
            self.record.active_toggles.insert(skill.id.clone());
            true
        };
        tracing::debug!("{} toggled {} {}", self.record.name, id, if active { "on" } else { "off" });
        Ok(active)
    }

    // ========================================================================
    // Stats
    // ========================================================================

    pub fn can_upgrade_stat(&self, ctx: &EngineContext, stat: Stat) -> bool {
        let config = ctx.config();
        let current = self.stat(stat);
        current < config.stat(stat).max && self.record.lumens >= cost_to_raise(config, stat, current)
    }

    /// Buy one point of a stat, applying any milestone it lands on
    pub fn upgrade_stat(&mut self, ctx: &EngineContext, stat: Stat) -> Result<StatPurchase> {
        let config = ctx.config();
        let current = self.stat(stat);
        let max = config.stat(stat).max;
        if current >= max {
            return Err(ProgressionError::AtMaximum { stat, max });
        }

        let cost = cost_to_raise(config, stat, current);
        if self.record.lumens < cost {
            return Err(ProgressionError::InsufficientFunds {
                needed: cost,
                available: self.record.lumens,
            });
        }

        let mut new_value = current + 1;
        let milestone = milestone_bonus(config, stat, new_value, &self.record.milestones);
        if let Some(award) = &milestone {
            new_value = new_value.saturating_add(award.bonus).min(max);
            self.record.milestones.set(&award.flag);
            tracing::info!(
                "{} reached milestone {} (+{} {})",
                self.record.name,
                award.flag,
                award.bonus,
                stat
            );
        }

        self.record.lumens -= cost;
        self.record.total_lumens_spent = self.record.total_lumens_spent.saturating_add(cost);
        self.record.stats.set(stat, new_value);
        if stat == Stat::Hp {
            self.record.current_hp = self.record.current_hp.saturating_add(new_value - current).min(new_value);
        }

        tracing::debug!("{} raised {} to {} for {} lumens", self.record.name, stat, new_value, cost);
        Ok(StatPurchase {
            stat,
            cost,
            new_value,
            milestone,
        })
    }

    /// Sell back one point of a stat; returns the lumens refunded
    pub fn refund_stat(&mut self, ctx: &EngineContext, stat: Stat) -> Result<Lumens> {
        let config = ctx.config();
        let current = self.stat(stat);
        let minimum = minimum_value(config, stat, &self.record.milestones);
        if current == 0 || current - 1 < minimum {
            return Err(ProgressionError::BelowMinimum { stat, minimum });
        }

        let refund = refund_value(config, stat, current);
        let new_value = current - 1;
        self.record.lumens = self.record.lumens.saturating_add(refund);
        self.record.total_lumens_spent = self.record.total_lumens_spent.saturating_sub(refund);
        self.record.stats.set(stat, new_value);
        if stat == Stat::Hp {
            self.record.current_hp = self.record.current_hp.min(new_value);
        }

        tracing::debug!("{} lowered {} to {} (+{} lumens)", self.record.name, stat, new_value, refund);
        Ok(refund)
    }

    // ========================================================================
    // Everything else
    // ========================================================================

    pub fn grant_lumens(&mut self, amount: Lumens) {
        self.record.lumens = self.record.lumens.saturating_add(amount);
    }

    pub fn equip(&mut self, equipment: Equipment) {
        self.record.equipment = equipment;
    }

    /// Set current hit points, capped at the hp stat
    pub fn set_current_hp(&mut self, hp: u32) {
        self.record.current_hp = hp.min(self.record.stats.hp);
    }

    pub fn compute_bonuses(&self, ctx: &EngineContext) -> CharacterBonuses {
        compute_character_bonuses(ctx, &self.record)
    }

    pub fn plan_path(&self, ctx: &EngineContext, target: &str) -> Result<PathPlan> {
        plan_path(ctx.catalog(), &self.record.unlocked, self.record.lumens, target)
    }
}
