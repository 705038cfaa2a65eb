//! Catalog skill records

use serde::{Deserialize, Serialize};

use crate::core::types::{Lumens, SkillId};

/// How a prerequisite list combines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrerequisiteKind {
    #[default]
    None,
    /// Every listed skill must be owned
    And,
    /// At least one listed skill must be owned
    Or,
}

/// Prerequisite clause of a skill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisites {
    #[serde(rename = "type", default)]
    pub kind: PrerequisiteKind,
    #[serde(default)]
    pub skills: Vec<SkillId>,
}

impl Prerequisites {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all_of<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SkillId>,
    {
        Self {
            kind: PrerequisiteKind::And,
            skills: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn any_of<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SkillId>,
    {
        Self {
            kind: PrerequisiteKind::Or,
            skills: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Ids this clause actually consults
    pub fn references(&self) -> &[SkillId] {
        match self.kind {
            PrerequisiteKind::None => &[],
            PrerequisiteKind::And | PrerequisiteKind::Or => &self.skills,
        }
    }
}

/// An immutable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    /// Rank 1-5
    pub tier: u8,
    #[serde(default)]
    pub cost: Lumens,
    #[serde(default)]
    pub stamina_cost: u32,
    /// Free text; the source of truth for parsed bonuses
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub icon: String,
    /// Filled from the skill's position in the catalog document
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub prerequisites: Prerequisites,
    /// Base skill this one supersedes
    #[serde(default)]
    pub upgrade: Option<SkillId>,
    /// Fusion skills: any one group fully owned unlocks it
    #[serde(default)]
    pub fusion_requirements: Vec<Vec<SkillId>>,
}

impl Skill {
    /// Minimal skill with no prerequisites, mostly for building catalogs in code
    pub fn new(id: impl Into<SkillId>, name: impl Into<String>, tier: u8, cost: Lumens) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
            cost,
            stamina_cost: 0,
            desc: String::new(),
            icon: String::new(),
            category: String::new(),
            subcategory: None,
            prerequisites: Prerequisites::none(),
            upgrade: None,
            fusion_requirements: Vec::new(),
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn with_prerequisites(mut self, prerequisites: Prerequisites) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    pub fn with_upgrade(mut self, base: impl Into<SkillId>) -> Self {
        self.upgrade = Some(base.into());
        self
    }

    pub fn with_fusion(mut self, groups: Vec<Vec<SkillId>>) -> Self {
        self.fusion_requirements = groups;
        self
    }

    pub fn with_stamina_cost(mut self, stamina_cost: u32) -> Self {
        self.stamina_cost = stamina_cost;
        self
    }

    /// Toggle skills contribute only while switched on
    pub fn is_toggle(&self) -> bool {
        self.desc.to_lowercase().contains("toggle")
    }

    /// Every id referenced by the prerequisite clause or fusion groups
    pub fn references(&self) -> impl Iterator<Item = &SkillId> {
        self.prerequisites
            .references()
            .iter()
            .chain(self.fusion_requirements.iter().flatten())
    }
}
