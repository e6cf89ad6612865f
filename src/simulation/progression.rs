use crate::components::cultivator::{Cultivation, StatBlock};
use crate::data::constants::{is_terminal_realm, realm};

/// Stat bonus granted on every breakthrough, applied to con, root,
/// spirit and speed. Luck is earned, never gifted.
pub const BREAKTHROUGH_BONUS: i32 = 5;

/// What a single qi infusion did to the cultivator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QiGain {
    /// Whole points absorbed.
    pub amount: i64,
    /// Realm indices reached, in order, when the infusion crossed one or
    /// more thresholds.
    pub breakthroughs: Vec<usize>,
    /// True when the terminal realm cap swallowed the remainder.
    pub capped: bool,
}

/// Absorbs `amount` qi, resolving any number of breakthroughs in one
/// pass. Overflow carries into the next realm; in the terminal realm qi
/// clamps to the cap. `current_qi` never goes negative and stays below
/// the threshold of every non-terminal realm on return.
pub fn gain_qi(cultivation: &mut Cultivation, stats: &mut StatBlock, amount: f64) -> QiGain {
    let whole = amount.max(0.0).floor();
    cultivation.current_qi += whole;

    let mut breakthroughs = Vec::new();
    while !is_terminal_realm(cultivation.realm_idx)
        && cultivation.current_qi >= realm(cultivation.realm_idx).max_qi
    {
        cultivation.current_qi -= realm(cultivation.realm_idx).max_qi;
        cultivation.realm_idx += 1;
        stats.con += BREAKTHROUGH_BONUS;
        stats.root += BREAKTHROUGH_BONUS;
        stats.spirit += BREAKTHROUGH_BONUS;
        stats.speed += BREAKTHROUGH_BONUS;
        breakthroughs.push(cultivation.realm_idx);
    }

    let mut capped = false;
    if is_terminal_realm(cultivation.realm_idx) {
        let cap = realm(cultivation.realm_idx).max_qi;
        if cultivation.current_qi >= cap {
            cultivation.current_qi = cap;
            capped = true;
        }
    }

    QiGain {
        amount: whole as i64,
        breakthroughs,
        capped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::constants::REALMS;

    fn fresh() -> (Cultivation, StatBlock) {
        (Cultivation::default(), StatBlock::uniform(10))
    }

    #[test]
    fn gain_floors_fractional_amounts() {
        let (mut cultivation, mut stats) = fresh();
        let report = gain_qi(&mut cultivation, &mut stats, 16.9);
        assert_eq!(report.amount, 16);
        assert_eq!(cultivation.current_qi, 16.0);
        assert!(report.breakthroughs.is_empty());
    }

    #[test]
    fn crossing_one_threshold_breaks_through_once() {
        let (mut cultivation, mut stats) = fresh();
        cultivation.current_qi = 95.0;
        let report = gain_qi(&mut cultivation, &mut stats, 10.0);
        assert_eq!(report.breakthroughs, vec![1]);
        assert_eq!(cultivation.realm_idx, 1);
        assert_eq!(cultivation.current_qi, 5.0);
        // +5 to everything except luck.
        assert_eq!(stats.con, 15);
        assert_eq!(stats.root, 15);
        assert_eq!(stats.spirit, 15);
        assert_eq!(stats.speed, 15);
        assert_eq!(stats.luck, 10);
    }

    #[test]
    fn overflow_spanning_realms_loops() {
        let (mut cultivation, mut stats) = fresh();
        // Enough to clear 练气 (100) and 筑基 (500) with 50 left over.
        let report = gain_qi(&mut cultivation, &mut stats, 650.0);
        assert_eq!(report.breakthroughs, vec![1, 2]);
        assert_eq!(cultivation.realm_idx, 2);
        assert_eq!(cultivation.current_qi, 50.0);
        assert_eq!(stats.con, 20);
        assert_eq!(stats.luck, 10);
    }

    #[test]
    fn terminal_realm_clamps_to_cap() {
        let (mut cultivation, mut stats) = fresh();
        cultivation.realm_idx = REALMS.len() - 1;
        cultivation.current_qi = REALMS[REALMS.len() - 1].max_qi - 1.0;
        let before = stats;
        let report = gain_qi(&mut cultivation, &mut stats, 10.0);
        assert!(report.capped);
        assert!(report.breakthroughs.is_empty());
        assert_eq!(cultivation.current_qi, REALMS[REALMS.len() - 1].max_qi);
        assert_eq!(stats, before);

        // Further gains stay clamped.
        let report = gain_qi(&mut cultivation, &mut stats, 1000.0);
        assert!(report.capped);
        assert_eq!(cultivation.current_qi, REALMS[REALMS.len() - 1].max_qi);
    }

    #[test]
    fn qi_never_goes_negative() {
        let (mut cultivation, mut stats) = fresh();
        let report = gain_qi(&mut cultivation, &mut stats, -25.0);
        assert_eq!(report.amount, 0);
        assert_eq!(cultivation.current_qi, 0.0);
    }

    #[test]
    fn non_terminal_qi_stays_below_threshold() {
        let (mut cultivation, mut stats) = fresh();
        for _ in 0..200 {
            gain_qi(&mut cultivation, &mut stats, 77.0);
            if !is_terminal_realm(cultivation.realm_idx) {
                assert!(cultivation.current_qi < realm(cultivation.realm_idx).max_qi);
            }
            assert!(cultivation.current_qi >= 0.0);
        }
    }
}
