//! Equipped weapons
//!
//! Only the weapon category matters to progression: skills gate their
//! bonuses on what is currently held.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weapon family, as referenced by skill descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponCategory {
    Sword,
    Axe,
    Mace,
    Hammer,
    Spear,
    Dagger,
    Bow,
    Crossbow,
    Staff,
    Wand,
    Shield,
    /// Satisfied only when both hands are empty
    Unarmed,
}

impl WeaponCategory {
    /// Parse a (possibly plural) keyword from skill text
    pub fn from_keyword(word: &str) -> Option<Self> {
        let category = match word.to_lowercase().as_str() {
            "sword" | "swords" => WeaponCategory::Sword,
            "axe" | "axes" => WeaponCategory::Axe,
            "mace" | "maces" => WeaponCategory::Mace,
            "hammer" | "hammers" => WeaponCategory::Hammer,
            "spear" | "spears" => WeaponCategory::Spear,
            "dagger" | "daggers" => WeaponCategory::Dagger,
            "bow" | "bows" => WeaponCategory::Bow,
            "crossbow" | "crossbows" => WeaponCategory::Crossbow,
            "staff" | "staffs" | "staves" => WeaponCategory::Staff,
            "wand" | "wands" => WeaponCategory::Wand,
            "shield" | "shields" => WeaponCategory::Shield,
            "unarmed" => WeaponCategory::Unarmed,
            _ => return None,
        };
        Some(category)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponCategory::Sword => "sword",
            WeaponCategory::Axe => "axe",
            WeaponCategory::Mace => "mace",
            WeaponCategory::Hammer => "hammer",
            WeaponCategory::Spear => "spear",
            WeaponCategory::Dagger => "dagger",
            WeaponCategory::Bow => "bow",
            WeaponCategory::Crossbow => "crossbow",
            WeaponCategory::Staff => "staff",
            WeaponCategory::Wand => "wand",
            WeaponCategory::Shield => "shield",
            WeaponCategory::Unarmed => "unarmed",
        }
    }
}

impl fmt::Display for WeaponCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A held weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub category: WeaponCategory,
}

impl Weapon {
    pub fn new(name: impl Into<String>, category: WeaponCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// What the character currently holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub main_hand: Option<Weapon>,
    #[serde(default)]
    pub off_hand: Option<Weapon>,
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn one_handed(weapon: Weapon) -> Self {
        Self {
            main_hand: Some(weapon),
            off_hand: None,
        }
    }

    pub fn dual(main_hand: Weapon, off_hand: Weapon) -> Self {
        Self {
            main_hand: Some(main_hand),
            off_hand: Some(off_hand),
        }
    }

    fn hands(&self) -> impl Iterator<Item = &Weapon> {
        self.main_hand.iter().chain(self.off_hand.iter())
    }

    pub fn is_unarmed(&self) -> bool {
        self.main_hand.is_none() && self.off_hand.is_none()
    }

    /// True if either hand holds the category
    pub fn has_category(&self, category: WeaponCategory) -> bool {
        if category == WeaponCategory::Unarmed {
            return self.is_unarmed();
        }
        self.hands().any(|w| w.category == category)
    }

    /// True only if both hands hold the category
    pub fn both_hands(&self, category: WeaponCategory) -> bool {
        match (&self.main_hand, &self.off_hand) {
            (Some(main), Some(off)) => main.category == category && off.category == category,
            _ => false,
        }
    }
}
