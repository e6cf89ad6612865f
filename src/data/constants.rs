use bevy_ecs::prelude::*;
use rand::Rng;

/// A cultivation realm. Advancing to the next entry multiplies every
/// derived attribute and raises the qi required for the following step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Realm {
    pub name: &'static str,
    pub base_mult: f64,
    pub max_qi: f64,
}

/// Ordered ladder of realms. The last entry is terminal: its `max_qi`
/// acts as a hard cap instead of a breakthrough threshold.
pub const REALMS: [Realm; 8] = [
    Realm { name: "练气", base_mult: 1.0, max_qi: 100.0 },
    Realm { name: "筑基", base_mult: 1.5, max_qi: 500.0 },
    Realm { name: "金丹", base_mult: 2.2, max_qi: 2000.0 },
    Realm { name: "元婴", base_mult: 3.5, max_qi: 10000.0 },
    Realm { name: "炼虚", base_mult: 5.5, max_qi: 50000.0 },
    Realm { name: "渡劫", base_mult: 9.0, max_qi: 200000.0 },
    Realm { name: "大乘", base_mult: 15.0, max_qi: 1000000.0 },
    Realm { name: "仙人", base_mult: 25.0, max_qi: 999999999.0 },
];

pub fn realm(idx: usize) -> &'static Realm {
    &REALMS[idx.min(REALMS.len() - 1)]
}

pub fn is_terminal_realm(idx: usize) -> bool {
    idx >= REALMS.len() - 1
}

/// Innate aptitude, drawn once at character creation and immutable after.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpiritRoot {
    pub name: &'static str,
    pub speed_mult: f64,
}

pub const SPIRIT_ROOTS: [SpiritRoot; 6] = [
    SpiritRoot { name: "天灵根", speed_mult: 2.0 },
    SpiritRoot { name: "双灵根", speed_mult: 1.5 },
    SpiritRoot { name: "三灵根", speed_mult: 1.2 },
    SpiritRoot { name: "四灵根", speed_mult: 1.0 },
    SpiritRoot { name: "五灵根", speed_mult: 0.8 },
    SpiritRoot { name: "空灵根", speed_mult: 0.5 },
];

/// Draw weights in percent, aligned with `SPIRIT_ROOTS`.
const SPIRIT_ROOT_WEIGHTS: [f64; 6] = [5.0, 15.0, 30.0, 30.0, 15.0, 5.0];

/// Weighted draw over the spirit root table.
pub fn draw_spirit_root(rng: &mut impl Rng) -> SpiritRoot {
    let roll = rng.gen::<f64>() * 100.0;
    let mut cumulative = 0.0;
    for (root, weight) in SPIRIT_ROOTS.iter().zip(SPIRIT_ROOT_WEIGHTS) {
        cumulative += weight;
        if roll < cumulative {
            return *root;
        }
    }
    SPIRIT_ROOTS[SPIRIT_ROOTS.len() - 1]
}

pub const SEASONS: [&str; 4] = ["春", "夏", "秋", "冬"];

/// Beast pool for random encounters.
pub const ENEMY_NAMES: [&str; 7] = [
    "黑风狼",
    "赤炎虎",
    "九头蛇",
    "独角兕",
    "毕方",
    "饕餮幼崽",
    "雷震子残魂",
];

/// Name suggestions offered by the character creation surface.
pub const RANDOM_NAMES: [&str; 10] = [
    "韩立",
    "白小纯",
    "方源",
    "王林",
    "叶凡",
    "萧炎",
    "林动",
    "石昊",
    "东方不败",
    "龙傲天",
];

pub const DEFAULT_PLAYER_NAME: &str = "无名氏";

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn realm_index_is_clamped_to_terminal() {
        assert_eq!(realm(0).name, "练气");
        assert_eq!(realm(99).name, "仙人");
        assert!(is_terminal_realm(REALMS.len() - 1));
        assert!(!is_terminal_realm(0));
    }

    #[test]
    fn spirit_root_draw_covers_weight_extremes() {
        // next_u64 = 0 maps to roll 0.0, the first (rarest-low) bucket.
        let mut low = StepRng::new(0, 0);
        assert_eq!(draw_spirit_root(&mut low).name, "天灵根");

        // A roll just below 100 lands in the last bucket.
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(draw_spirit_root(&mut high).name, "空灵根");
    }

    #[test]
    fn spirit_root_weights_sum_to_one_hundred() {
        let total: f64 = SPIRIT_ROOT_WEIGHTS.iter().sum();
        assert!((total - 100.0).abs() < f64::EPSILON);
    }
}
