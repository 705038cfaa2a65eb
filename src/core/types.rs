//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Progression currency amount
pub type Lumens = u32;

/// Unique identifier for characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

/// Globally unique skill identifier (catalog key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(transparent)]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SkillId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SkillId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for SkillId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The seven purchasable base stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Hp,
    Stamina,
    Strength,
    MagicPower,
    Speed,
    PhysicalDefence,
    MagicalDefence,
}

impl Stat {
    pub const ALL: [Stat; 7] = [
        Stat::Hp,
        Stat::Stamina,
        Stat::Strength,
        Stat::MagicPower,
        Stat::Speed,
        Stat::PhysicalDefence,
        Stat::MagicalDefence,
    ];

    /// Record key, matching the serialized name
    pub fn key(&self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Stamina => "stamina",
            Stat::Strength => "strength",
            Stat::MagicPower => "magicPower",
            Stat::Speed => "speed",
            Stat::PhysicalDefence => "physicalDefence",
            Stat::MagicalDefence => "magicalDefence",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key().eq_ignore_ascii_case(key))
    }

    /// Resource pools (hp, stamina) are bought at a flat per-point price
    pub fn is_pool(&self) -> bool {
        matches!(self, Stat::Hp | Stat::Stamina)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
