//! Power level and per-tree mastery

use serde::Serialize;

use crate::catalog::{CategorySkills, Skill};
use crate::character::CharacterRecord;
use crate::engine::EngineContext;

/// Highest skill tier; tier progress is measured against it
pub const MAX_TIER: u8 = 5;

/// statTotal x2 + skills x5 + sum of tier x2 over owned skills
pub fn power_level(ctx: &EngineContext, record: &CharacterRecord) -> u32 {
    let owned = record.unlocked.ids();
    let tiers: u32 = owned
        .iter()
        .filter_map(|id| ctx.catalog().get(id.as_str()))
        .map(|skill| skill.tier as u32 * 2)
        .sum();
    record.stats.total() * 2 + owned.len() as u32 * 5 + tiers
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasteryLevel {
    pub category: String,
    /// `None` for flat categories
    pub subcategory: Option<String>,
    pub unlocked: usize,
    pub total: usize,
    /// unlocked / total x 100
    pub percent: f32,
    pub highest_tier: u8,
    /// highest tier / 5 x 100
    pub tier_progress: f32,
}

impl MasteryLevel {
    fn measure(category: &str, subcategory: Option<&str>, skills: &[&Skill], record: &CharacterRecord) -> Self {
        let owned: Vec<&&Skill> = skills
            .iter()
            .filter(|s| record.unlocked.contains(s.id.as_str()))
            .collect();
        let highest_tier = owned.iter().map(|s| s.tier).max().unwrap_or(0);
        let percent = if skills.is_empty() {
            0.0
        } else {
            owned.len() as f32 / skills.len() as f32 * 100.0
        };
        Self {
            category: category.to_string(),
            subcategory: subcategory.map(str::to_string),
            unlocked: owned.len(),
            total: skills.len(),
            percent,
            highest_tier,
            tier_progress: highest_tier.min(MAX_TIER) as f32 / MAX_TIER as f32 * 100.0,
        }
    }
}

/// Mastery for every flat category and every subcategory, in catalog order
pub fn mastery_levels(ctx: &EngineContext, record: &CharacterRecord) -> Vec<MasteryLevel> {
    let catalog = ctx.catalog();
    let mut out = Vec::new();
    for (category, group) in catalog.categories() {
        match group {
            CategorySkills::Flat(_) => {
                let skills = catalog.skills_in(category, None);
                out.push(MasteryLevel::measure(category, None, &skills, record));
            }
            CategorySkills::Nested(subs) => {
                for sub in subs.keys() {
                    let skills = catalog.skills_in(category, Some(sub.as_str()));
                    out.push(MasteryLevel::measure(category, Some(sub.as_str()), &skills, record));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::core::types::SkillId;

    fn context() -> EngineContext {
        let nested = |id: &str, tier, sub: &str| {
            let mut s = Skill::new(id, id, tier, 10);
            s.category = "mage".into();
            s.subcategory = Some(sub.into());
            s
        };
        let mut claw = Skill::new("claw", "Claw", 1, 5);
        claw.category = "monster".into();
        EngineContext::with_catalog(
            Catalog::from_skills([
                nested("spark", 1, "fire"),
                nested("kindle", 2, "fire"),
                nested("inferno", 4, "fire"),
                nested("frost_bolt", 1, "frost"),
                claw,
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_power_level() {
        let ctx = context();
        let mut record = CharacterRecord::new("Mira", 0, ctx.config());
        let base = power_level(&ctx, &record);
        assert_eq!(base, record.stats.total() * 2);

        record.unlocked.insert("mage", Some("fire"), SkillId::from("spark"));
        record.unlocked.insert("mage", Some("fire"), SkillId::from("inferno"));
        // 2 skills x5 + tiers (1 + 4) x2
        assert_eq!(power_level(&ctx, &record), base + 10 + 10);
    }

    #[test]
    fn test_mastery_levels() {
        let ctx = context();
        let mut record = CharacterRecord::new("Mira", 0, ctx.config());
        record.unlocked.insert("mage", Some("fire"), SkillId::from("kindle"));

        let levels = mastery_levels(&ctx, &record);
        assert_eq!(levels.len(), 3);

        let fire = levels
            .iter()
            .find(|m| m.subcategory.as_deref() == Some("fire"))
            .unwrap();
        assert_eq!((fire.unlocked, fire.total), (1, 3));
        assert!((fire.percent - 33.333).abs() < 0.01);
        assert_eq!(fire.highest_tier, 2);
        assert!((fire.tier_progress - 40.0).abs() < 1e-3);

        let monster = levels.iter().find(|m| m.category == "monster").unwrap();
        assert!(monster.subcategory.is_none());
        assert_eq!(monster.percent, 0.0);
    }
}
