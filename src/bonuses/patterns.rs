//! Bonus pattern table
//!
//! Each entry pairs a target (stat, resistance or weakness) with a matcher
//! and the shape of value it yields. Descriptions are matched lower-cased.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stats a skill description can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BonusStat {
    Strength,
    Speed,
    PhysicalDefence,
    MagicalDefence,
    Damage,
    Accuracy,
    Attack,
    MagicPower,
    Hp,
    Stamina,
    Stealth,
    Reach,
    CriticalPercent,
}

impl BonusStat {
    pub const ALL: [BonusStat; 13] = [
        BonusStat::Strength,
        BonusStat::Speed,
        BonusStat::PhysicalDefence,
        BonusStat::MagicalDefence,
        BonusStat::Damage,
        BonusStat::Accuracy,
        BonusStat::Attack,
        BonusStat::MagicPower,
        BonusStat::Hp,
        BonusStat::Stamina,
        BonusStat::Stealth,
        BonusStat::Reach,
        BonusStat::CriticalPercent,
    ];

    /// Matcher fragment for the stat's name in skill text
    fn keywords(&self) -> &'static str {
        match self {
            BonusStat::Strength => r"(?:strength|str)",
            BonusStat::Speed => r"(?:movement\s+)?(?:speed|spd)",
            BonusStat::PhysicalDefence => r"(?:physical\s+defen[cs]e|pdef)",
            BonusStat::MagicalDefence => r"(?:magic(?:al)?\s+defen[cs]e|mdef)",
            BonusStat::Damage => r"(?:bonus\s+)?(?:damage|dmg)",
            BonusStat::Accuracy => r"(?:accuracy|acc)",
            BonusStat::Attack => r"(?:attack|atk)",
            BonusStat::MagicPower => r"(?:magic(?:al)?\s*power|mp)",
            BonusStat::Hp => r"(?:max(?:imum)?\s+)?(?:hp|health|hit\s*points)",
            BonusStat::Stamina => r"(?:max(?:imum)?\s+)?stamina",
            BonusStat::Stealth => r"stealth",
            BonusStat::Reach => r"(?:reach|range)",
            BonusStat::CriticalPercent => r"crit(?:ical)?(?:\s+(?:hit\s+)?chance)?",
        }
    }
}

/// Elements with resistance/weakness ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Water,
    Earth,
    Wind,
    Light,
    Dark,
}

impl Element {
    pub const ALL: [Element; 8] = [
        Element::Fire,
        Element::Ice,
        Element::Lightning,
        Element::Water,
        Element::Earth,
        Element::Wind,
        Element::Light,
        Element::Dark,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Ice => "ice",
            Element::Lightning => "lightning",
            Element::Water => "water",
            Element::Earth => "earth",
            Element::Wind => "wind",
            Element::Light => "light",
            Element::Dark => "dark",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Percentage rating with an optional flat modifier, e.g. "25% (+2)"
///
/// Ratings are not summed; ordering is by percentage, then modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rating {
    pub percentage: i32,
    pub modifier: i32,
}

impl Rating {
    pub fn new(percentage: i32, modifier: i32) -> Self {
        Self { percentage, modifier }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusTarget {
    Stat(BonusStat),
    Resistance(Element),
    Weakness(Element),
}

/// What a matcher's captures mean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// "+N": summed across skills
    Additive,
    /// "N% (±M)": best rating wins
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternValue {
    Flat(i32),
    Rating(Rating),
}

#[derive(Debug, Clone)]
pub struct BonusPattern {
    pub target: BonusTarget,
    pub shape: ValueShape,
    matcher: Regex,
}

impl BonusPattern {
    pub fn new(target: BonusTarget, shape: ValueShape, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            target,
            shape,
            matcher: Regex::new(pattern)?,
        })
    }

    /// "+N <keywords>" for a stat
    pub fn for_stat(stat: BonusStat) -> Result<Self, regex::Error> {
        let percent = if stat == BonusStat::CriticalPercent { r"\s*%?" } else { "" };
        let pattern = format!(r"\+\s*(\d+){}\s*(?:to\s+)?{}\b", percent, stat.keywords());
        Self::new(BonusTarget::Stat(stat), ValueShape::Additive, &pattern)
    }

    /// "<element> resistance N% (±M)"
    pub fn for_resistance(element: Element) -> Result<Self, regex::Error> {
        Self::new(
            BonusTarget::Resistance(element),
            ValueShape::Rating,
            &rating_pattern(element, "resistance"),
        )
    }

    /// "<element> weakness N% (±M)"
    pub fn for_weakness(element: Element) -> Result<Self, regex::Error> {
        Self::new(
            BonusTarget::Weakness(element),
            ValueShape::Rating,
            &rating_pattern(element, "weakness"),
        )
    }

    /// Largest value among all matches in `text` (expects lower-case text)
    pub fn best_match(&self, text: &str) -> Option<PatternValue> {
        match self.shape {
            ValueShape::Additive => self
                .matcher
                .captures_iter(text)
                .filter_map(|caps| caps.get(1)?.as_str().parse::<i32>().ok())
                .max()
                .map(PatternValue::Flat),
            ValueShape::Rating => self
                .matcher
                .captures_iter(text)
                .filter_map(|caps| {
                    let percentage = caps.get(1)?.as_str().parse::<i32>().ok()?;
                    let sign = caps.get(2).or_else(|| caps.get(4));
                    let amount = caps.get(3).or_else(|| caps.get(5));
                    let modifier = match (sign, amount) {
                        (Some(sign), Some(amount)) => {
                            let amount = amount.as_str().parse::<i32>().ok()?;
                            if sign.as_str() == "-" { -amount } else { amount }
                        }
                        _ => 0,
                    };
                    Some(Rating::new(percentage, modifier))
                })
                .max()
                .map(PatternValue::Rating),
        }
    }
}

/// `<element> <kind> N%`, optionally followed by a modifier written either
/// as `(+M)` or as a bare `+M` that ends the clause. A bare sign followed by
/// more words (`25% +2 strength`) belongs to the next bonus, not the rating.
fn rating_pattern(element: Element, kind: &str) -> String {
    format!(
        r"\b{}\s+{}\s*:?\s*(\d+)\s*%(?:\s*\(\s*([+-])\s*(\d+)\s*\)|\s+([+-])(\d+)(?:\s*[.,;]|\s*$|\s+and\b))?",
        element.name(),
        kind
    )
}

/// The full, enumerable set of bonus patterns
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: Vec<BonusPattern>,
}

impl PatternTable {
    /// Thirteen stat patterns plus resistance and weakness for each of eight elements
    pub fn standard() -> Self {
        let stats = BonusStat::ALL.into_iter().map(BonusPattern::for_stat);
        let resistances = Element::ALL.into_iter().map(BonusPattern::for_resistance);
        let weaknesses = Element::ALL.into_iter().map(BonusPattern::for_weakness);

        let patterns = stats
            .chain(resistances)
            .chain(weaknesses)
            .filter_map(|compiled| match compiled {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("Dropping malformed bonus pattern: {}", e);
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn iter(&self) -> impl Iterator<Item = &BonusPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, target: BonusTarget) -> Option<&BonusPattern> {
        self.patterns.iter().find(|p| p.target == target)
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(stat: BonusStat, text: &str) -> Option<i32> {
        match BonusPattern::for_stat(stat).unwrap().best_match(text)? {
            PatternValue::Flat(v) => Some(v),
            PatternValue::Rating(_) => None,
        }
    }

    fn rating(target: BonusTarget, text: &str) -> Option<Rating> {
        let pattern = match target {
            BonusTarget::Resistance(e) => BonusPattern::for_resistance(e),
            BonusTarget::Weakness(e) => BonusPattern::for_weakness(e),
            BonusTarget::Stat(_) => unreachable!(),
        }
        .unwrap();
        match pattern.best_match(text)? {
            PatternValue::Rating(r) => Some(r),
            PatternValue::Flat(_) => None,
        }
    }

    #[test]
    fn test_standard_table_is_complete() {
        let table = PatternTable::standard();
        assert_eq!(table.len(), 13 + 8 + 8);
        assert!(table.get(BonusTarget::Weakness(Element::Dark)).is_some());
    }

    #[test]
    fn test_each_stat_pattern() {
        let cases = [
            (BonusStat::Strength, "passive: +3 strength", 3),
            (BonusStat::Speed, "+1 speed while sprinting", 1),
            (BonusStat::PhysicalDefence, "+2 physical defence", 2),
            (BonusStat::MagicalDefence, "+2 magical defense", 2),
            (BonusStat::Damage, "+4 damage", 4),
            (BonusStat::Accuracy, "+1 accuracy", 1),
            (BonusStat::Attack, "toggle: +2 attack", 2),
            (BonusStat::MagicPower, "+2 magic power", 2),
            (BonusStat::Hp, "+15 max hp", 15),
            (BonusStat::Stamina, "+5 stamina", 5),
            (BonusStat::Stealth, "+2 stealth", 2),
            (BonusStat::Reach, "+1 reach", 1),
            (BonusStat::CriticalPercent, "+10% critical chance", 10),
        ];
        for (stat, text, expected) in cases {
            assert_eq!(flat(stat, text), Some(expected), "{:?} in {:?}", stat, text);
        }
    }

    #[test]
    fn test_patterns_do_not_bleed() {
        assert_eq!(flat(BonusStat::Damage, "+2 attack damage"), None);
        assert_eq!(flat(BonusStat::MagicPower, "+2 magical defence"), None);
        assert_eq!(flat(BonusStat::Strength, "+2 stamina"), None);
        assert_eq!(flat(BonusStat::Strength, "-2 strength"), None);
    }

    #[test]
    fn test_repeated_match_takes_max() {
        assert_eq!(flat(BonusStat::Damage, "+1 damage, rising to +3 damage at dusk"), Some(3));
    }

    #[test]
    fn test_resistance_with_modifier() {
        let fire = BonusTarget::Resistance(Element::Fire);
        assert_eq!(rating(fire, "fire resistance 25% (+2)"), Some(Rating::new(25, 2)));
        assert_eq!(rating(fire, "fire resistance 10%"), Some(Rating::new(10, 0)));
        assert_eq!(
            rating(BonusTarget::Resistance(Element::Water), "water resistance 20% (-5)"),
            Some(Rating::new(20, -5))
        );
    }

    #[test]
    fn test_resistance_with_bare_modifier() {
        let fire = BonusTarget::Resistance(Element::Fire);
        assert_eq!(rating(fire, "fire resistance 25% +2"), Some(Rating::new(25, 2)));
        assert_eq!(rating(fire, "fire resistance 25% -1, ice weakness 5%"), Some(Rating::new(25, -1)));
        assert_eq!(rating(fire, "fire resistance 25% +3 and ice weakness 5%"), Some(Rating::new(25, 3)));
        // A following stat bonus keeps its own sign
        assert_eq!(rating(fire, "fire resistance 25% +2 strength"), Some(Rating::new(25, 0)));
        assert_eq!(flat(BonusStat::Strength, "fire resistance 25% +2 strength"), Some(2));
    }

    #[test]
    fn test_light_does_not_match_lightning() {
        assert_eq!(rating(BonusTarget::Resistance(Element::Light), "lightning resistance 30%"), None);
        assert_eq!(
            rating(BonusTarget::Weakness(Element::Ice), "ice weakness 10%"),
            Some(Rating::new(10, 0))
        );
    }
}
