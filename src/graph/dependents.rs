//! Reverse prerequisite index: skill id -> skills that reference it
//!
//! Built once from the catalog so a cascade refund only touches actual
//! dependents instead of rescanning every skill.

use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

use crate::catalog::Catalog;
use crate::core::types::SkillId;

#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    dependents: AHashMap<SkillId, Vec<SkillId>>,
}

impl DependencyIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut dependents: AHashMap<SkillId, Vec<SkillId>> = AHashMap::new();
        for skill in catalog.iter() {
            for referenced in skill.references() {
                let list = dependents.entry(referenced.clone()).or_default();
                if !list.contains(&skill.id) {
                    list.push(skill.id.clone());
                }
            }
        }
        Self { dependents }
    }

    /// Skills whose clause or fusion groups name `id`, in catalog order
    pub fn direct(&self, id: &str) -> &[SkillId] {
        self.dependents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Breadth-first closure of dependents that pass `include`, excluding `root`
    ///
    /// Dependents rejected by `include` are not expanded further. The visited
    /// set bounds the walk even on cyclic data.
    pub fn transitive<F>(&self, root: &str, mut include: F) -> Vec<SkillId>
    where
        F: FnMut(&SkillId) -> bool,
    {
        let mut out = Vec::new();
        let mut visited: AHashSet<&str> = AHashSet::new();
        visited.insert(root);
        let mut queue: VecDeque<&str> = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            for dependent in self.direct(current) {
                if !visited.insert(dependent.as_str()) {
                    continue;
                }
                if include(dependent) {
                    out.push(dependent.clone());
                    queue.push_back(dependent.as_str());
                }
            }
        }
        out
    }
}
