//! Property tests for the progression economy
//!
//! Random purchase sequences over the sample catalog must keep the ledger's
//! invariants: refunds undo unlocks, cascades leave no orphaned dependents,
//! gating matches the resolver, milestones fire once and floors only rise,
//! and bonus aggregation is a pure function of character state.

use std::path::Path;
use std::sync::OnceLock;

use proptest::prelude::*;

use lumen_progression::bonuses::compute_character_bonuses;
use lumen_progression::catalog::load_catalog;
use lumen_progression::character::{Equipment, Weapon, WeaponCategory};
use lumen_progression::core::{ProgressionError, SkillId, Stat};
use lumen_progression::economy::minimum_value;
use lumen_progression::graph::can_unlock;
use lumen_progression::{EngineContext, ProgressionLedger};

fn context() -> &'static EngineContext {
    static CTX: OnceLock<EngineContext> = OnceLock::new();
    CTX.get_or_init(|| {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/catalog.toml");
        EngineContext::with_catalog(load_catalog(&path).unwrap())
    })
}

fn skill_ids() -> Vec<SkillId> {
    context().catalog().iter().map(|s| s.id.clone()).collect()
}

/// Try to unlock each picked skill in turn, ignoring failures
fn build(picks: &[usize], lumens: u32) -> ProgressionLedger {
    let ctx = context();
    let ids = skill_ids();
    let mut ledger = ProgressionLedger::fresh(ctx, "Prop", lumens);
    for &pick in picks {
        let _ = ledger.unlock_skill(ctx, ids[pick % ids.len()].as_str());
    }
    ledger
}

const WEAPONS: [WeaponCategory; 6] = [
    WeaponCategory::Sword,
    WeaponCategory::Axe,
    WeaponCategory::Dagger,
    WeaponCategory::Bow,
    WeaponCategory::Staff,
    WeaponCategory::Shield,
];

proptest! {
    #[test]
    fn prop_unlock_refund_symmetry(picks in prop::collection::vec(0usize..64, 0..40), target in 0usize..64) {
        let ctx = context();
        let ids = skill_ids();
        let mut ledger = build(&picks, 400);
        let target = &ids[target % ids.len()];

        // Literal cascade also takes owned OR-dependents; symmetry covers the rest
        let has_owned_dependent = ctx
            .dependents()
            .direct(target.as_str())
            .iter()
            .any(|d| ledger.is_unlocked(d.as_str()));

        let before = ledger.snapshot();
        if ledger.unlock_skill(ctx, target.as_str()).is_ok() && !has_owned_dependent {
            ledger.refund_skill(ctx, target.as_str()).unwrap();
            prop_assert_eq!(ledger.snapshot(), before);
        }
    }

    #[test]
    fn prop_cascade_leaves_no_orphans(picks in prop::collection::vec(0usize..64, 1..40), victim in 0usize..64) {
        let ctx = context();
        let mut ledger = build(&picks, 1_000);
        let owned: Vec<SkillId> = ledger.record().unlocked.ids().into_iter().collect();
        prop_assume!(!owned.is_empty());
        let victim = owned[victim % owned.len()].clone();

        let lumens_before = ledger.lumens();
        let receipt = ledger.refund_skill(ctx, victim.as_str()).unwrap();
        prop_assert_eq!(ledger.lumens(), lumens_before + receipt.refunded);

        for removed in &receipt.removed {
            prop_assert!(!ledger.is_unlocked(removed.as_str()));
            for dependent in ctx.dependents().direct(removed.as_str()) {
                prop_assert!(!ledger.is_unlocked(dependent.as_str()));
            }
        }
        prop_assert_eq!(ledger.record().total_skills as usize, ledger.record().unlocked.len());
    }

    #[test]
    fn prop_unlock_gated_by_resolver(picks in prop::collection::vec(0usize..64, 0..30), target in 0usize..64) {
        let ctx = context();
        let ids = skill_ids();
        let mut ledger = build(&picks, 10_000);
        let target = &ids[target % ids.len()];
        prop_assume!(!ledger.is_unlocked(target.as_str()));

        let skill = ctx.catalog().get(target.as_str()).unwrap();
        let allowed = can_unlock(skill, &ledger.record().unlocked, ctx.catalog());
        let result = ledger.unlock_skill(ctx, target.as_str());
        if allowed {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(ProgressionError::PrerequisitesNotMet(target.clone())));
        }
    }

    #[test]
    fn prop_milestones_fire_once_and_floor_rises(ops in prop::collection::vec(any::<bool>(), 1..200)) {
        let ctx = context();
        let config = ctx.config();
        let mut ledger = ProgressionLedger::fresh(ctx, "Prop", 5_000);
        let mut awarded: Vec<String> = Vec::new();
        let mut floor = minimum_value(config, Stat::Hp, &ledger.record().milestones);

        for raise in ops {
            if raise {
                if let Ok(purchase) = ledger.upgrade_stat(ctx, Stat::Hp) {
                    if let Some(award) = purchase.milestone {
                        prop_assert!(!awarded.contains(&award.flag));
                        awarded.push(award.flag);
                    }
                }
            } else {
                let _ = ledger.refund_stat(ctx, Stat::Hp);
            }
            let next = minimum_value(config, Stat::Hp, &ledger.record().milestones);
            prop_assert!(next >= floor);
            prop_assert!(ledger.stat(Stat::Hp) >= next);
            floor = next;
        }
    }

    #[test]
    fn prop_bonuses_are_deterministic(
        picks in prop::collection::vec(0usize..64, 0..40),
        toggles in prop::collection::vec(0usize..64, 0..5),
        main in prop::option::of(0usize..6),
        off in prop::option::of(0usize..6),
        hp in 0u32..12,
    ) {
        let ctx = context();
        let ids = skill_ids();
        let mut ledger = build(&picks, 1_000);
        for t in toggles {
            let _ = ledger.toggle_skill(ctx, ids[t % ids.len()].as_str());
        }
        ledger.equip(Equipment {
            main_hand: main.map(|i| Weapon::new("Main", WEAPONS[i])),
            off_hand: off.map(|i| Weapon::new("Off", WEAPONS[i])),
        });
        ledger.set_current_hp(hp);

        let record = ledger.snapshot();
        let first = compute_character_bonuses(ctx, &record);
        let second = compute_character_bonuses(ctx, &record);
        prop_assert_eq!(&first, &second);

        // Uncached extraction agrees with the cache
        for id in record.unlocked.ids() {
            let skill = ctx.catalog().get(id.as_str()).unwrap();
            let cached = ctx.skill_bonus(id.as_str()).unwrap();
            prop_assert_eq!(&*cached, &ctx.extractor().extract(&skill.desc));
        }
    }
}
