//! Equipment conditions on skill bonuses
//!
//! "while wielding an axe", "when Bow or Staff weapons are equipped": the
//! whole bonus set of such a skill applies only while a listed weapon
//! category is held.

use regex::Regex;
use serde::Serialize;

use crate::character::{Equipment, WeaponCategory};

const WEAPON_WORDS: &str =
    r"swords?|axes?|maces?|hammers?|spears?|daggers?|crossbows?|bows?|staff|staffs|staves|wands?|shields?|unarmed";

/// Weapon categories gating a bonus; any one held satisfies it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipmentCondition {
    pub categories: Vec<WeaponCategory>,
}

impl EquipmentCondition {
    pub fn new(categories: Vec<WeaponCategory>) -> Self {
        Self { categories }
    }

    pub fn is_met(&self, equipment: &Equipment) -> bool {
        self.categories.iter().any(|c| equipment.has_category(*c))
    }

    /// "X or Y" phrasing
    pub fn is_multi(&self) -> bool {
        self.categories.len() > 1
    }
}

/// Finds the first equipment phrase in a description
#[derive(Debug, Clone)]
pub struct ConditionParser {
    matcher: Regex,
}

impl ConditionParser {
    pub fn new() -> Result<Self, regex::Error> {
        let pattern = format!(
            r"\b(?:while|when|with|wielding|equipped)\b[^.;]*?\b({w})\b(?:\s*(?:or|/)\s*(?:an?\s+)?({w})\b)?",
            w = WEAPON_WORDS
        );
        Ok(Self {
            matcher: Regex::new(&pattern)?,
        })
    }

    /// Parse the condition out of lower-case text
    pub fn parse(&self, text: &str) -> Option<EquipmentCondition> {
        let caps = self.matcher.captures(text)?;
        let mut categories = Vec::new();
        for group in [caps.get(1), caps.get(2)].into_iter().flatten() {
            if let Some(category) = WeaponCategory::from_keyword(group.as_str()) {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }
        if categories.is_empty() {
            None
        } else {
            Some(EquipmentCondition::new(categories))
        }
    }
}
