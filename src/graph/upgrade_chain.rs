//! Upgrade chains: base skill -> the skill that supersedes it
//!
//! When a superseding skill is owned, the base skill's bonuses are dropped
//! entirely; the upgrade's own description carries the full bonus.

use ahash::{AHashMap, AHashSet};

use crate::catalog::Catalog;
use crate::core::types::SkillId;
use crate::graph::prerequisites::SkillSet;

#[derive(Debug, Clone, Default)]
pub struct UpgradeChainIndex {
    supersedes: AHashMap<SkillId, SkillId>,
    /// Walk bound: no valid chain is longer than the catalog
    limit: usize,
}

impl UpgradeChainIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut supersedes = AHashMap::new();
        for skill in catalog.iter() {
            let Some(base) = &skill.upgrade else { continue };
            if let Some(existing) = supersedes.get(base) {
                tracing::warn!(
                    "Skill {} is upgraded by both {} and {}; keeping {}",
                    base,
                    existing,
                    skill.id,
                    existing
                );
                continue;
            }
            supersedes.insert(base.clone(), skill.id.clone());
        }
        Self {
            supersedes,
            limit: catalog.len(),
        }
    }

    /// The skill directly superseding `id`
    pub fn successor(&self, id: &str) -> Option<&SkillId> {
        self.supersedes.get(id)
    }

    /// Every skill further along the chain from `id`, nearest first
    ///
    /// A cycle is a data error: the walk stops at the first repeated id.
    pub fn chain(&self, id: &str) -> Vec<&SkillId> {
        let mut out = Vec::new();
        let mut seen: AHashSet<&str> = AHashSet::new();
        seen.insert(id);
        let mut current = id;
        while let Some(next) = self.supersedes.get(current) {
            if !seen.insert(next.as_str()) || out.len() >= self.limit {
                tracing::warn!("Upgrade chain from {} loops back on {}", id, next);
                break;
            }
            out.push(next);
            current = next.as_str();
        }
        out
    }

    /// True if anything later in the chain is owned
    pub fn is_superseded(&self, id: &str, owned: &impl SkillSet) -> bool {
        self.chain(id).into_iter().any(|later| owned.has_skill(later.as_str()))
    }

    /// Drop ids whose bonuses are replaced by an owned upgrade
    pub fn filter_superseded<'a, I>(&self, ids: I, owned: &impl SkillSet) -> Vec<SkillId>
    where
        I: IntoIterator<Item = &'a SkillId>,
    {
        ids.into_iter()
            .filter(|id| !self.is_superseded(id.as_str(), owned))
            .cloned()
            .collect()
    }

    /// Base ids whose chain revisits itself
    pub fn cycles(&self) -> Vec<SkillId> {
        let mut bases: Vec<&SkillId> = self.supersedes.keys().collect();
        bases.sort();
        bases
            .into_iter()
            .filter(|base| {
                let mut seen: AHashSet<&str> = AHashSet::new();
                let mut current = base.as_str();
                while let Some(next) = self.supersedes.get(current) {
                    if !seen.insert(next.as_str()) {
                        return true;
                    }
                    current = next.as_str();
                }
                false
            })
            .cloned()
            .collect()
    }
}
