//! Bonus extraction engine
//!
//! Skill descriptions are the source of truth for numeric bonuses. The
//! pattern table turns text into a [`SkillBonus`], the condition parser adds
//! an optional equipment gate, the cache memoizes per skill id, and
//! [`compute_character_bonuses`] folds it all over one character.

pub mod aggregate;
pub mod cache;
pub mod condition;
pub mod extract;
pub mod patterns;

pub use aggregate::{compute_character_bonuses, CharacterBonuses};
pub use cache::BonusCache;
pub use condition::{ConditionParser, EquipmentCondition};
pub use extract::{has_bonus_marker, BonusExtractor, SkillBonus};
pub use patterns::{BonusPattern, BonusStat, BonusTarget, Element, PatternTable, PatternValue, Rating, ValueShape};
