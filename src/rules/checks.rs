use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which gate an event option rolls against before its outcome applies.
/// Unrecognised kinds in catalog data collapse into `None`, which always
/// passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Luck,
    Combat,
    Spirit,
    #[default]
    #[serde(other)]
    None,
}

/// Player-side numbers a check can consult.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext {
    pub luck: i32,
    pub spirit: i32,
    pub attack: i32,
    pub defense: i32,
    pub year: u32,
}

/// The spirit gate compares against this fixed floor; the threshold an
/// option declares is carried in the data but not consulted.
const SPIRIT_CHECK_FLOOR: i32 = 5;

pub fn resolve_check(kind: CheckKind, ctx: &CheckContext, rng: &mut impl Rng) -> bool {
    match kind {
        CheckKind::Luck => {
            // Only the player side gets the stat added, so high luck can
            // push the roll past anything the opposing draw produces.
            let player_side = rng.gen::<f64>() * 100.0 + ctx.luck as f64;
            let difficulty = 50.0 + rng.gen::<f64>() * 50.0;
            player_side > difficulty
        }
        CheckKind::Combat => ctx.attack + ctx.defense > (ctx.year as i32) * 10,
        CheckKind::Spirit => ctx.spirit > SPIRIT_CHECK_FLOOR,
        CheckKind::None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ctx(luck: i32, spirit: i32, attack: i32, defense: i32, year: u32) -> CheckContext {
        CheckContext {
            luck,
            spirit,
            attack,
            defense,
            year,
        }
    }

    fn luck_successes(luck: i32, trials: u32) -> u32 {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        (0..trials)
            .filter(|_| resolve_check(CheckKind::Luck, &ctx(luck, 0, 0, 0, 1), &mut rng))
            .count() as u32
    }

    #[test]
    fn luck_check_success_grows_with_luck() {
        let trials = 2000;
        let low = luck_successes(0, trials);
        let mid = luck_successes(50, trials);
        let high = luck_successes(100, trials);
        assert!(low < mid);
        assert!(mid < high);
        // At 100 the player side is at least 100 while the difficulty
        // stays strictly below it.
        assert_eq!(high, trials);
    }

    #[test]
    fn combat_check_compares_power_to_year() {
        assert!(resolve_check(
            CheckKind::Combat,
            &ctx(0, 0, 80, 21, 10),
            &mut ChaCha8Rng::seed_from_u64(0),
        ));
        // Exactly equal power fails.
        assert!(!resolve_check(
            CheckKind::Combat,
            &ctx(0, 0, 80, 20, 10),
            &mut ChaCha8Rng::seed_from_u64(0),
        ));
    }

    #[test]
    fn spirit_check_uses_fixed_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(resolve_check(CheckKind::Spirit, &ctx(0, 6, 0, 0, 1), &mut rng));
        assert!(!resolve_check(CheckKind::Spirit, &ctx(0, 5, 0, 0, 1), &mut rng));
    }

    #[test]
    fn missing_check_always_passes() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(resolve_check(CheckKind::None, &ctx(0, 0, 0, 0, 99), &mut rng));
    }

    #[test]
    fn unknown_check_kind_deserializes_to_none() {
        let kind: CheckKind = serde_json::from_str("\"charisma\"").unwrap();
        assert_eq!(kind, CheckKind::None);
        let kind: CheckKind = serde_json::from_str("\"luck\"").unwrap();
        assert_eq!(kind, CheckKind::Luck);
    }
}
