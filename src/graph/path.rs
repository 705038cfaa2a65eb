//! Acquisition path planning
//!
//! Post-order depth-first walk from a target skill down its prerequisite
//! graph. Owned skills are pruned with everything beneath them; shared
//! prerequisites appear once, at their earliest position.
//!
//! Before the walk, the planner collects every skill the target needs no
//! matter which OR options are taken (AND edges and single-group fusions).
//! An OR clause naming one of those skills is satisfied by it rather than
//! by a cheaper option that would end up bought twice over.

use ahash::AHashSet;
use serde::Serialize;

use crate::catalog::{Catalog, PrerequisiteKind, Skill};
use crate::core::error::{ProgressionError, Result};
use crate::core::types::{Lumens, SkillId};
use crate::graph::prerequisites::{Overlay, SkillSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    pub skill_id: SkillId,
    pub name: String,
    pub tier: u8,
    pub cost: Lumens,
}

/// Ordered purchase list for reaching a target skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathPlan {
    pub target: SkillId,
    /// Dependencies before dependents
    pub steps: Vec<PlanStep>,
    pub total_cost: Lumens,
    pub can_afford: bool,
    /// Referenced ids missing from the catalog; a plan with any is not executable
    pub unresolved: Vec<SkillId>,
}

impl PathPlan {
    pub fn is_executable(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn skill_ids(&self) -> impl Iterator<Item = &SkillId> {
        self.steps.iter().map(|s| &s.skill_id)
    }
}

/// Plan every purchase needed to unlock `target`
///
/// OR clauses take the cheapest listed option the catalog knows (ties by
/// listed order) unless one is already owned or planned. Fusion skills take
/// the requirement group with the lowest outstanding cost.
pub fn plan_path(
    catalog: &Catalog,
    owned: &impl SkillSet,
    lumens: Lumens,
    target: &str,
) -> Result<PathPlan> {
    let target_skill = catalog
        .get(target)
        .ok_or_else(|| ProgressionError::SkillNotFound(SkillId::from(target)))?;

    let mut planner = Planner {
        catalog,
        owned,
        required: AHashSet::new(),
        visited: AHashSet::new(),
        planned: AHashSet::new(),
        steps: Vec::new(),
        unresolved: Vec::new(),
    };
    planner.collect_required(&target_skill.id);
    planner.visit(&target_skill.id);

    let total_cost = planner
        .steps
        .iter()
        .fold(0, |acc: Lumens, s| acc.saturating_add(s.cost));

    Ok(PathPlan {
        target: target_skill.id.clone(),
        can_afford: lumens >= total_cost,
        total_cost,
        steps: planner.steps,
        unresolved: planner.unresolved,
    })
}

struct Planner<'a, S: SkillSet> {
    catalog: &'a Catalog,
    owned: &'a S,
    /// Unowned skills the target needs whatever OR options are chosen
    required: AHashSet<SkillId>,
    visited: AHashSet<SkillId>,
    /// Finished nodes, counted as owned when choosing OR options
    planned: AHashSet<SkillId>,
    steps: Vec<PlanStep>,
    unresolved: Vec<SkillId>,
}

impl<S: SkillSet> Planner<'_, S> {
    fn collect_required(&mut self, target: &SkillId) {
        let mut stack = vec![target.clone()];
        while let Some(id) = stack.pop() {
            if self.owned.has_skill(id.as_str()) || !self.required.insert(id.clone()) {
                continue;
            }
            let Some(skill) = self.catalog.get(id.as_str()) else {
                continue;
            };
            if skill.prerequisites.kind == PrerequisiteKind::And {
                stack.extend(skill.prerequisites.skills.iter().cloned());
            }
            if let [group] = skill.fusion_requirements.as_slice() {
                stack.extend(group.iter().cloned());
            }
        }
    }

    fn visit(&mut self, id: &SkillId) {
        if self.owned.has_skill(id.as_str()) || !self.visited.insert(id.clone()) {
            return;
        }
        let catalog = self.catalog;
        let Some(skill) = catalog.get(id.as_str()) else {
            if !self.unresolved.contains(id) {
                self.unresolved.push(id.clone());
            }
            return;
        };

        for requirement in self.requirements(skill) {
            self.visit(&requirement);
        }

        self.planned.insert(id.clone());
        self.steps.push(PlanStep {
            skill_id: skill.id.clone(),
            name: skill.name.clone(),
            tier: skill.tier,
            cost: skill.cost,
        });
    }

    fn available(&self, id: &SkillId) -> bool {
        let both = Overlay {
            base: self.owned,
            extra: &self.planned,
        };
        self.catalog.contains(id.as_str()) && both.has_skill(id.as_str())
    }

    fn cost_of(&self, id: &SkillId) -> Option<Lumens> {
        self.catalog.get(id.as_str()).map(|s| s.cost)
    }

    /// Ids that must be bought before `skill`
    fn requirements(&self, skill: &Skill) -> Vec<SkillId> {
        let mut needed = Vec::new();
        let clause = &skill.prerequisites;

        match clause.kind {
            PrerequisiteKind::None => {}
            PrerequisiteKind::And => needed.extend(clause.skills.iter().cloned()),
            PrerequisiteKind::Or => {
                if !clause.skills.is_empty() && !clause.skills.iter().any(|id| self.available(id)) {
                    let bought_anyway = clause
                        .skills
                        .iter()
                        .find(|id| self.required.contains(*id) && self.catalog.contains(id.as_str()));
                    let cheapest = clause
                        .skills
                        .iter()
                        .filter_map(|id| self.cost_of(id).map(|cost| (cost, id)))
                        .min_by_key(|(cost, _)| *cost);
                    match (bought_anyway, cheapest) {
                        (Some(id), _) | (None, Some((_, id))) => needed.push(id.clone()),
                        // Nothing listed exists; surface the first as unresolved
                        (None, None) => needed.extend(clause.skills.first().cloned()),
                    }
                }
            }
        }

        let groups = &skill.fusion_requirements;
        if !groups.is_empty() && !groups.iter().any(|g| g.iter().all(|id| self.available(id))) {
            let best = groups
                .iter()
                .filter(|g| g.iter().all(|id| self.catalog.contains(id.as_str())))
                .min_by_key(|g| {
                    g.iter()
                        .filter(|id| !self.available(id))
                        .filter_map(|id| self.cost_of(id))
                        .fold(0, |acc: Lumens, c| acc.saturating_add(c))
                });
            match best {
                Some(group) => needed.extend(group.iter().cloned()),
                None => needed.extend(groups[0].iter().cloned()),
            }
        }

        needed
    }
}
