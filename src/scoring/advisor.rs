//! Build advisor
//!
//! Advisory only: warnings never block a ledger operation, and
//! recommendations are suggestions ranked from the current state.

use serde::Serialize;

use crate::bonuses::{compute_character_bonuses, BonusStat};
use crate::character::CharacterRecord;
use crate::core::types::{Lumens, SkillId, Stat};
use crate::economy::cost_to_raise;
use crate::engine::EngineContext;
use crate::graph::can_unlock;

/// Stats compared by the imbalance check (pools grow on a different scale)
const COMBAT_STATS: [Stat; 5] = [
    Stat::Strength,
    Stat::MagicPower,
    Stat::Speed,
    Stat::PhysicalDefence,
    Stat::MagicalDefence,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BuildWarning {
    StatImbalance { strongest: Stat, weakest: Stat, spread: f32 },
    StaminaStrain { skill: SkillId, stamina_cost: u32, pool: u32 },
    SkewedCategories { category: String, share: f32 },
    LowSurvivability { hp: i64, defence: i64 },
}

/// Run every build heuristic
pub fn validate_build(ctx: &EngineContext, record: &CharacterRecord) -> Vec<BuildWarning> {
    let config = ctx.config();
    let thresholds = &config.advisor;
    let mut warnings = Vec::new();

    // Stat imbalance
    let progress: Vec<(Stat, f32)> = COMBAT_STATS
        .iter()
        .map(|&stat| (stat, record.stats.progress(stat, config)))
        .collect();
    let strongest = progress.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1));
    let weakest = progress.iter().copied().min_by(|a, b| a.1.total_cmp(&b.1));
    if let (Some(strongest), Some(weakest)) = (strongest, weakest) {
        let spread = strongest.1 - weakest.1;
        if spread > thresholds.imbalance_spread {
            warnings.push(BuildWarning::StatImbalance {
                strongest: strongest.0,
                weakest: weakest.0,
                spread,
            });
        }
    }

    // Stamina strain
    let pool = record.stats.stamina;
    let hungriest = record
        .unlocked
        .ids()
        .into_iter()
        .filter_map(|id| ctx.catalog().get(id.as_str()))
        .filter(|skill| skill.stamina_cost > 0)
        .max_by_key(|skill| skill.stamina_cost);
    if let Some(skill) = hungriest {
        if pool == 0 || skill.stamina_cost as f32 / pool as f32 > thresholds.stamina_ratio {
            warnings.push(BuildWarning::StaminaStrain {
                skill: skill.id.clone(),
                stamina_cost: skill.stamina_cost,
                pool,
            });
        }
    }

    // Skewed categories
    let owned = record.unlocked.len();
    if owned >= thresholds.category_min_skills {
        for (category, count) in record.unlocked.category_counts() {
            let share = count as f32 / owned as f32;
            if share > thresholds.category_share {
                warnings.push(BuildWarning::SkewedCategories {
                    category: category.to_string(),
                    share,
                });
            }
        }
    }

    // Survivability, counting skill bonuses
    if record.total_lumens_spent >= thresholds.survivability_spent {
        let bonuses = compute_character_bonuses(ctx, record);
        let hp = record.stats.hp as i64 + bonuses.get(BonusStat::Hp) as i64;
        let defence = record.stats.physical_defence as i64
            + record.stats.magical_defence as i64
            + bonuses.get(BonusStat::PhysicalDefence) as i64
            + bonuses.get(BonusStat::MagicalDefence) as i64;
        if hp < thresholds.survivability_hp as i64 || defence < thresholds.survivability_defence as i64 {
            warnings.push(BuildWarning::LowSurvivability { hp, defence });
        }
    }

    if !warnings.is_empty() {
        tracing::debug!("{}: {} build warnings", record.name, warnings.len());
    }
    warnings
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Purchase {
    Skill { id: SkillId, cost: Lumens },
    Stat { stat: Stat, cost: Lumens },
}

impl Purchase {
    pub fn cost(&self) -> Lumens {
        match self {
            Purchase::Skill { cost, .. } | Purchase::Stat { cost, .. } => *cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub purchase: Purchase,
    pub reason: String,
}

/// Affordable next purchases, best first
///
/// Skills that are unlockable now rank by how invested the character already
/// is in their category, then tier, then price. Skills whose upgrade is
/// already owned are skipped. Stat points follow: hp first when the build is
/// fragile, then the least developed combat stat.
pub fn recommended_purchases(ctx: &EngineContext, record: &CharacterRecord, limit: usize) -> Vec<Recommendation> {
    let catalog = ctx.catalog();
    let config = ctx.config();
    let lumens = record.lumens;

    let mut skills: Vec<(usize, u8, Lumens, &SkillId)> = catalog
        .iter()
        .filter(|skill| !record.unlocked.contains(skill.id.as_str()))
        .filter(|skill| skill.cost <= lumens)
        .filter(|skill| !ctx.upgrades().is_superseded(skill.id.as_str(), &record.unlocked))
        .filter(|skill| can_unlock(skill, &record.unlocked, catalog))
        .map(|skill| {
            let invested = record.unlocked.count_in(&skill.category, skill.subcategory.as_deref());
            (invested, skill.tier, skill.cost, &skill.id)
        })
        .collect();
    skills.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then(b.1.cmp(&a.1))
            .then(a.2.cmp(&b.2))
            .then(a.3.cmp(b.3))
    });

    let mut out: Vec<Recommendation> = skills
        .into_iter()
        .map(|(invested, tier, cost, id)| Recommendation {
            purchase: Purchase::Skill { id: id.clone(), cost },
            reason: if invested > 0 {
                format!("builds on {} owned skills in its tree (tier {})", invested, tier)
            } else {
                format!("opens a new tree (tier {})", tier)
            },
        })
        .collect();

    let affordable_stat = |stat: Stat| {
        let current = record.stats.get(stat);
        let cost = cost_to_raise(config, stat, current);
        (current < config.stat(stat).max && cost <= lumens).then_some(cost)
    };

    let fragile = validate_build(ctx, record)
        .iter()
        .any(|w| matches!(w, BuildWarning::LowSurvivability { .. }));
    let mut stats = Vec::new();
    if fragile {
        if let Some(cost) = affordable_stat(Stat::Hp) {
            stats.push(Recommendation {
                purchase: Purchase::Stat { stat: Stat::Hp, cost },
                reason: "build is fragile".to_string(),
            });
        }
    }
    let weakest = COMBAT_STATS
        .iter()
        .copied()
        .filter(|&stat| affordable_stat(stat).is_some())
        .min_by(|a, b| {
            record
                .stats
                .progress(*a, config)
                .total_cmp(&record.stats.progress(*b, config))
        });
    if let Some(stat) = weakest {
        if let Some(cost) = affordable_stat(stat) {
            stats.push(Recommendation {
                purchase: Purchase::Stat { stat, cost },
                reason: format!("{} is the least developed combat stat", stat),
            });
        }
    }

    // Survival ahead of everything else
    if fragile {
        stats.extend(out);
        out = stats;
    } else {
        out.extend(stats);
    }
    out.truncate(limit);
    out
}
