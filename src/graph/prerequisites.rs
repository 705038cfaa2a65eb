//! Prerequisite clause evaluation
//!
//! Membership is checked globally: a clause may name skills from any
//! category. An id the catalog does not know is never owned, so a clause
//! that needs it can never pass.

use ahash::AHashSet;
use std::collections::BTreeSet;

use crate::catalog::{Catalog, PrerequisiteKind, Prerequisites, Skill};
use crate::character::UnlockedSkills;
use crate::core::types::SkillId;

/// Anything that can answer "is this skill owned?"
pub trait SkillSet {
    fn has_skill(&self, id: &str) -> bool;
}

impl SkillSet for UnlockedSkills {
    fn has_skill(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl SkillSet for AHashSet<SkillId> {
    fn has_skill(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl SkillSet for BTreeSet<SkillId> {
    fn has_skill(&self, id: &str) -> bool {
        self.contains(id)
    }
}

/// Owned skills plus a hypothetical extra set (planned purchases)
pub struct Overlay<'a, A: SkillSet, B: SkillSet> {
    pub base: &'a A,
    pub extra: &'a B,
}

impl<A: SkillSet, B: SkillSet> SkillSet for Overlay<'_, A, B> {
    fn has_skill(&self, id: &str) -> bool {
        self.base.has_skill(id) || self.extra.has_skill(id)
    }
}

fn owned(id: &SkillId, owned: &impl SkillSet, catalog: &Catalog) -> bool {
    catalog.contains(id.as_str()) && owned.has_skill(id.as_str())
}

/// Evaluate a prerequisite clause
///
/// An OR clause with an empty list imposes no requirement.
pub fn is_satisfied(clause: &Prerequisites, owned_set: &impl SkillSet, catalog: &Catalog) -> bool {
    match clause.kind {
        PrerequisiteKind::None => true,
        PrerequisiteKind::And => clause.skills.iter().all(|id| owned(id, owned_set, catalog)),
        PrerequisiteKind::Or => {
            clause.skills.is_empty() || clause.skills.iter().any(|id| owned(id, owned_set, catalog))
        }
    }
}

/// Any one requirement group fully owned. No groups means no requirement.
pub fn fusion_available(groups: &[Vec<SkillId>], owned_set: &impl SkillSet, catalog: &Catalog) -> bool {
    groups.is_empty()
        || groups
            .iter()
            .any(|group| group.iter().all(|id| owned(id, owned_set, catalog)))
}

/// Both the clause and (for fusion skills) the requirement groups pass
pub fn can_unlock(skill: &Skill, owned_set: &impl SkillSet, catalog: &Catalog) -> bool {
    is_satisfied(&skill.prerequisites, owned_set, catalog)
        && fusion_available(&skill.fusion_requirements, owned_set, catalog)
}

/// Result of checking a skill's requirements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Satisfied,
    /// Could be met by buying the listed skills
    Unmet { missing: Vec<SkillId> },
    /// Can never be met: it needs ids the catalog lacks
    InvalidReference { dangling: Vec<SkillId> },
}

/// Check a skill's requirements and explain a failure
pub fn resolve(skill: &Skill, owned_set: &impl SkillSet, catalog: &Catalog) -> Resolution {
    if can_unlock(skill, owned_set, catalog) {
        return Resolution::Satisfied;
    }

    let everything = AllPresent;
    if !can_unlock(skill, &everything, catalog) {
        let dangling = skill
            .references()
            .filter(|id| !catalog.contains(id.as_str()))
            .cloned()
            .collect();
        return Resolution::InvalidReference { dangling };
    }

    let mut missing: Vec<SkillId> = skill
        .references()
        .filter(|id| catalog.contains(id.as_str()) && !owned_set.has_skill(id.as_str()))
        .cloned()
        .collect();
    missing.sort();
    missing.dedup();
    Resolution::Unmet { missing }
}

/// Pretends every skill is owned, so only catalog presence decides
struct AllPresent;

impl SkillSet for AllPresent {
    fn has_skill(&self, _id: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_skills(
            ["a", "b", "c"]
                .into_iter()
                .map(|id| {
                    let mut s = Skill::new(id, id, 1, 5);
                    s.category = "test".into();
                    s
                }),
        )
        .unwrap()
    }

    fn owned_set(ids: &[&str]) -> AHashSet<SkillId> {
        ids.iter().map(|id| SkillId::from(*id)).collect()
    }

    #[test]
    fn test_none_always_passes() {
        assert!(is_satisfied(&Prerequisites::none(), &owned_set(&[]), &catalog()));
    }

    #[test]
    fn test_and_requires_all() {
        let clause = Prerequisites::all_of(["a", "b"]);
        let catalog = catalog();
        assert!(!is_satisfied(&clause, &owned_set(&["a"]), &catalog));
        assert!(is_satisfied(&clause, &owned_set(&["a", "b"]), &catalog));
    }

    #[test]
    fn test_or_requires_one() {
        let clause = Prerequisites::any_of(["a", "b"]);
        let catalog = catalog();
        assert!(!is_satisfied(&clause, &owned_set(&["c"]), &catalog));
        assert!(is_satisfied(&clause, &owned_set(&["b"]), &catalog));
    }

    #[test]
    fn test_missing_catalog_id_never_satisfies() {
        let catalog = catalog();
        // A stale record might still list the id
        let stale = owned_set(&["ghost"]);
        assert!(!is_satisfied(&Prerequisites::all_of(["ghost"]), &stale, &catalog));
        assert!(!is_satisfied(&Prerequisites::any_of(["ghost"]), &stale, &catalog));
    }

    #[test]
    fn test_fusion_is_or_of_ands() {
        let catalog = catalog();
        let groups = vec![
            vec![SkillId::from("a"), SkillId::from("b")],
            vec![SkillId::from("c")],
        ];
        assert!(!fusion_available(&groups, &owned_set(&["a"]), &catalog));
        assert!(fusion_available(&groups, &owned_set(&["a", "b"]), &catalog));
        assert!(fusion_available(&groups, &owned_set(&["c"]), &catalog));
        assert!(fusion_available(&[], &owned_set(&[]), &catalog));
    }

    #[test]
    fn test_resolve_explains_failures() {
        let catalog = catalog();
        let skill = Skill::new("d", "D", 2, 10).with_prerequisites(Prerequisites::all_of(["a", "b"]));
        assert_eq!(
            resolve(&skill, &owned_set(&["a"]), &catalog),
            Resolution::Unmet { missing: vec!["b".into()] }
        );

        let broken = Skill::new("e", "E", 2, 10).with_prerequisites(Prerequisites::all_of(["a", "ghost"]));
        assert_eq!(
            resolve(&broken, &owned_set(&["a"]), &catalog),
            Resolution::InvalidReference { dangling: vec!["ghost".into()] }
        );

        // OR with a live alternative is merely unmet
        let partial = Skill::new("f", "F", 2, 10).with_prerequisites(Prerequisites::any_of(["ghost", "c"]));
        assert!(matches!(resolve(&partial, &owned_set(&[]), &catalog), Resolution::Unmet { .. }));
    }

    #[test]
    fn test_overlay_combines_sets() {
        let catalog = catalog();
        let base = owned_set(&["a"]);
        let extra = owned_set(&["b"]);
        let both = Overlay { base: &base, extra: &extra };
        assert!(is_satisfied(&Prerequisites::all_of(["a", "b"]), &both, &catalog));
    }
}
