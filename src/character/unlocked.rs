//! Owned skills, grouped the same way the catalog groups them

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::types::SkillId;

/// Owned skills within one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnlockedCategory {
    /// Categories without subcategories (monster)
    Flat(BTreeSet<SkillId>),
    /// subcategory -> owned ids
    Nested(BTreeMap<String, BTreeSet<SkillId>>),
}

impl UnlockedCategory {
    fn len(&self) -> usize {
        match self {
            UnlockedCategory::Flat(ids) => ids.len(),
            UnlockedCategory::Nested(subs) => subs.values().map(BTreeSet::len).sum(),
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: &str) -> bool {
        match self {
            UnlockedCategory::Flat(ids) => ids.contains(id),
            UnlockedCategory::Nested(subs) => subs.values().any(|ids| ids.contains(id)),
        }
    }
}

/// category -> (subcategory ->) owned skill ids
///
/// Lookups are global: prerequisites may point across categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockedSkills {
    categories: BTreeMap<String, UnlockedCategory>,
}

impl UnlockedSkills {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id under its catalog location. Returns false if it was already owned.
    pub fn insert(&mut self, category: &str, subcategory: Option<&str>, id: SkillId) -> bool {
        if self.contains(id.as_str()) {
            return false;
        }
        let entry = self
            .categories
            .entry(category.to_string())
            .or_insert_with(|| match subcategory {
                Some(_) => UnlockedCategory::Nested(BTreeMap::new()),
                None => UnlockedCategory::Flat(BTreeSet::new()),
            });
        match entry {
            UnlockedCategory::Flat(ids) => ids.insert(id),
            UnlockedCategory::Nested(subs) => subs
                .entry(subcategory.unwrap_or_default().to_string())
                .or_default()
                .insert(id),
        }
    }

    /// Remove an id wherever it lives, pruning emptied groups
    pub fn remove(&mut self, id: &str) -> bool {
        let mut removed = false;
        for group in self.categories.values_mut() {
            match group {
                UnlockedCategory::Flat(ids) => removed |= ids.remove(id),
                UnlockedCategory::Nested(subs) => {
                    for ids in subs.values_mut() {
                        removed |= ids.remove(id);
                    }
                    subs.retain(|_, ids| !ids.is_empty());
                }
            }
        }
        self.categories.retain(|_, group| !group.is_empty());
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.categories.values().any(|group| group.contains(id))
    }

    /// All owned ids across every category, sorted
    pub fn ids(&self) -> BTreeSet<SkillId> {
        let mut out = BTreeSet::new();
        for group in self.categories.values() {
            match group {
                UnlockedCategory::Flat(ids) => out.extend(ids.iter().cloned()),
                UnlockedCategory::Nested(subs) => {
                    for ids in subs.values() {
                        out.extend(ids.iter().cloned());
                    }
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(UnlockedCategory::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owned count for a category, optionally narrowed to one subcategory
    pub fn count_in(&self, category: &str, subcategory: Option<&str>) -> usize {
        match (self.categories.get(category), subcategory) {
            (None, _) => 0,
            (Some(group), None) => group.len(),
            (Some(UnlockedCategory::Flat(ids)), Some(_)) => ids.len(),
            (Some(UnlockedCategory::Nested(subs)), Some(sub)) => {
                subs.get(sub).map(BTreeSet::len).unwrap_or(0)
            }
        }
    }

    /// (category, owned count) pairs
    pub fn category_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.categories
            .iter()
            .map(|(name, group)| (name.as_str(), group.len()))
    }
}
