//! Lumen price of raising a stat by one point

use crate::core::config::ProgressionConfig;
use crate::core::types::{Lumens, Stat};

/// Price of raising `stat` from `current` to `current + 1`
///
/// Pool stats (hp, stamina) cost a flat amount per point. Combat stats look
/// up their cost table by upgrade level (current - start), repeating the
/// last entry once the table runs out. A value below the starting value is
/// never charged.
pub fn cost_to_raise(config: &ProgressionConfig, stat: Stat, current: u32) -> Lumens {
    let def = config.stat(stat);
    if let Some(flat) = def.flat_cost {
        return flat;
    }

    let upgrade_level = i64::from(current) - i64::from(def.start);
    if upgrade_level < 0 {
        return 0;
    }
    let level = upgrade_level as usize;

    if let Some(last) = def.cost_table.last() {
        return def.cost_table.get(level).copied().unwrap_or(*last);
    }

    geometric_cost(config, level)
}

/// floor(base * multiplier ^ level), saturating at u32::MAX
fn geometric_cost(config: &ProgressionConfig, level: usize) -> Lumens {
    let fallback = &config.fallback_cost;
    let exponent = i32::try_from(level).unwrap_or(i32::MAX);
    let raw = f64::from(fallback.base_cost) * fallback.multiplier.powi(exponent);
    if raw >= f64::from(Lumens::MAX) {
        Lumens::MAX
    } else {
        raw.floor() as Lumens
    }
}

/// Lumens returned by undoing the purchase that produced `current`
pub fn refund_value(config: &ProgressionConfig, stat: Stat, current: u32) -> Lumens {
    match current.checked_sub(1) {
        Some(previous) => cost_to_raise(config, stat, previous),
        None => 0,
    }
}

/// Total price of raising a stat from `from` up to `to`, ignoring milestones
pub fn cost_between(config: &ProgressionConfig, stat: Stat, from: u32, to: u32) -> Lumens {
    (from..to)
        .map(|v| cost_to_raise(config, stat, v))
        .fold(0, Lumens::saturating_add)
}
