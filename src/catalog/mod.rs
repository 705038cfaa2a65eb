//! Skill catalog
//!
//! Read-only table of every skill, keyed by id. Categories are resolved once
//! at load time into flat lists (monster) or subcategory maps, so nothing
//! downstream branches on category names.

pub mod loader;
pub mod skill;

use ahash::AHashMap;
use std::collections::BTreeMap;

use crate::core::error::CatalogError;
use crate::core::types::SkillId;

pub use loader::{load_catalog, parse_json, parse_toml};
pub use skill::{PrerequisiteKind, Prerequisites, Skill};

/// Skills of one category, in catalog order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySkills {
    Flat(Vec<SkillId>),
    Nested(BTreeMap<String, Vec<SkillId>>),
}

/// A prerequisite or fusion id that names no catalog skill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub skill: SkillId,
    pub missing: SkillId,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    skills: AHashMap<SkillId, Skill>,
    /// Insertion order, for deterministic iteration
    order: Vec<SkillId>,
    categories: BTreeMap<String, CategorySkills>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from skills that already carry their category/subcategory
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for skill in skills {
            let category = skill.category.clone();
            let subcategory = skill.subcategory.clone();
            catalog.add(&category, subcategory.as_deref(), skill)?;
        }
        Ok(catalog)
    }

    /// Register a skill under a category (and subcategory, for nested categories)
    pub fn add(
        &mut self,
        category: &str,
        subcategory: Option<&str>,
        mut skill: Skill,
    ) -> Result<(), CatalogError> {
        if self.skills.contains_key(&skill.id) {
            return Err(CatalogError::DuplicateSkill(skill.id));
        }

        let group = self
            .categories
            .entry(category.to_string())
            .or_insert_with(|| match subcategory {
                Some(_) => CategorySkills::Nested(BTreeMap::new()),
                None => CategorySkills::Flat(Vec::new()),
            });
        match (group, subcategory) {
            (CategorySkills::Flat(ids), None) => ids.push(skill.id.clone()),
            (CategorySkills::Nested(subs), Some(sub)) => {
                subs.entry(sub.to_string()).or_default().push(skill.id.clone())
            }
            _ => return Err(CatalogError::MalformedCategory(category.to_string())),
        }

        skill.category = category.to_string();
        skill.subcategory = subcategory.map(str::to_string);
        self.order.push(skill.id.clone());
        self.skills.insert(skill.id.clone(), skill);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All skills in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.order.iter().filter_map(|id| self.skills.get(id))
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategorySkills)> {
        self.categories.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Skills of a category, optionally narrowed to one subcategory
    pub fn skills_in(&self, category: &str, subcategory: Option<&str>) -> Vec<&Skill> {
        let ids: Vec<&SkillId> = match (self.categories.get(category), subcategory) {
            (None, _) => Vec::new(),
            (Some(CategorySkills::Flat(ids)), _) => ids.iter().collect(),
            (Some(CategorySkills::Nested(subs)), None) => subs.values().flatten().collect(),
            (Some(CategorySkills::Nested(subs)), Some(sub)) => {
                subs.get(sub).map(|ids| ids.iter().collect()).unwrap_or_default()
            }
        };
        ids.into_iter().filter_map(|id| self.skills.get(id)).collect()
    }

    /// Every reference to a skill id the catalog does not contain
    ///
    /// Operators see these as entries to delete; the engine treats them as
    /// permanently unsatisfiable.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut out = Vec::new();
        for skill in self.iter() {
            let dangling = skill
                .references()
                .chain(skill.upgrade.iter())
                .filter(|id| !self.contains(id.as_str()));
            for missing in dangling {
                out.push(DanglingReference {
                    skill: skill.id.clone(),
                    missing: missing.clone(),
                });
            }
        }
        out
    }
}
