//! Preset baselines
//!
//! A preset wipes a character back to starting values, grants its lumen
//! budget, then buys its stat targets and skills through the ordinary ledger
//! operations. Whatever cannot be bought is reported, not forced.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::character::CharacterRecord;
use crate::core::error::ProgressionError;
use crate::core::types::{Lumens, SkillId, Stat};
use crate::engine::EngineContext;
use crate::ledger::ProgressionLedger;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub lumens: Lumens,
    /// Target value per stat
    #[serde(default)]
    pub stats: BTreeMap<Stat, u32>,
    /// Skills to own; missing prerequisites are bought first
    #[serde(default)]
    pub skills: Vec<SkillId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetReport {
    pub stat_failures: Vec<(Stat, ProgressionError)>,
    pub skill_failures: Vec<(SkillId, ProgressionError)>,
    pub lumens_left: Lumens,
}

impl PresetReport {
    pub fn is_complete(&self) -> bool {
        self.stat_failures.is_empty() && self.skill_failures.is_empty()
    }
}

impl ProgressionLedger {
    /// Reinitialize from a preset, keeping identity, name, purse and equipment
    pub fn reset_to_preset(&mut self, ctx: &EngineContext, preset: &Preset) -> PresetReport {
        let previous = &self.record;
        let mut fresh = CharacterRecord::new(previous.name.clone(), preset.lumens, ctx.config());
        fresh.id = previous.id;
        fresh.purse = previous.purse;
        fresh.equipment = previous.equipment.clone();
        self.record = fresh;

        let mut report = PresetReport::default();

        for (&stat, &target) in &preset.stats {
            while self.stat(stat) < target {
                if let Err(e) = self.upgrade_stat(ctx, stat) {
                    report.stat_failures.push((stat, e));
                    break;
                }
            }
        }

        for target in &preset.skills {
            if self.is_unlocked(target.as_str()) {
                continue;
            }
            let plan = match self.plan_path(ctx, target.as_str()) {
                Ok(plan) => plan,
                Err(e) => {
                    report.skill_failures.push((target.clone(), e));
                    continue;
                }
            };
            if let Some(missing) = plan.unresolved.first() {
                report.skill_failures.push((
                    target.clone(),
                    ProgressionError::InvalidCatalogReference {
                        skill: target.clone(),
                        missing: missing.clone(),
                    },
                ));
                continue;
            }
            for step in &plan.steps {
                if let Err(e) = self.unlock_skill(ctx, step.skill_id.as_str()) {
                    report.skill_failures.push((target.clone(), e));
                    break;
                }
            }
        }

        report.lumens_left = self.record.lumens;
        tracing::info!(
            "{} reset to preset '{}' ({} lumens left, {} failures)",
            self.record.name,
            preset.name,
            report.lumens_left,
            report.stat_failures.len() + report.skill_failures.len()
        );
        report
    }
}
