use serde::{Deserialize, Serialize};

use crate::components::cultivator::StatBlock;
use crate::data::constants::{Realm, SpiritRoot};

/// Identifies one of the five raw stats in data-driven rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Con,
    Root,
    Spirit,
    Luck,
    Speed,
}

impl StatKind {
    /// Player-facing stat name used in log lines.
    pub fn display_name(&self) -> &'static str {
        match self {
            StatKind::Con => "体魄",
            StatKind::Root => "根骨",
            StatKind::Spirit => "灵力",
            StatKind::Luck => "福运",
            StatKind::Speed => "速度",
        }
    }
}

impl StatBlock {
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Con => self.con,
            StatKind::Root => self.root,
            StatKind::Spirit => self.spirit,
            StatKind::Luck => self.luck,
            StatKind::Speed => self.speed,
        }
    }

    /// Applies a delta, never dropping below zero.
    pub fn apply(&mut self, kind: StatKind, amount: i32) {
        let slot = match kind {
            StatKind::Con => &mut self.con,
            StatKind::Root => &mut self.root,
            StatKind::Spirit => &mut self.spirit,
            StatKind::Luck => &mut self.luck,
            StatKind::Speed => &mut self.speed,
        };
        *slot = (*slot + amount).max(0);
    }
}

/// Secondary attributes. Recomputed on demand from the raw stats, the
/// realm multiplier, and the spirit root; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub max_hp: i32,
    pub defense: i32,
    pub attack: i32,
    /// Percentage in [0, 100], one decimal of precision.
    pub crit_rate: f64,
    pub combat_speed: i32,
    pub cultivation_speed: i32,
}

pub fn derived_stats(stats: &StatBlock, realm: &Realm, spirit_root: &SpiritRoot) -> DerivedStats {
    let r_mult = realm.base_mult;
    DerivedStats {
        max_hp: (stats.con as f64 * 10.0 * r_mult).floor() as i32,
        defense: (stats.root as f64 * 2.0 * r_mult).floor() as i32,
        attack: (stats.spirit as f64 * 3.0 * r_mult).floor() as i32,
        crit_rate: (((stats.luck as f64 * 0.1) * 10.0).round() / 10.0).min(100.0),
        combat_speed: (stats.speed as f64 * r_mult).floor() as i32,
        cultivation_speed: ((stats.spirit as f64 * 0.5 + 10.0) * spirit_root.speed_mult * r_mult)
            .floor() as i32,
    }
}
