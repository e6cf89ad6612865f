use rand::Rng;

use crate::components::cultivator::StatBlock;
use crate::data::constants::{DEFAULT_PLAYER_NAME, RANDOM_NAMES};
use crate::rules::stats::StatKind;

/// Points to distribute on top of the base line.
pub const CREATION_POINTS: i32 = 20;
pub const CREATION_BASE_STAT: i32 = 10;
pub const CREATION_STAT_MIN: i32 = 1;
pub const CREATION_STAT_MAX: i32 = 20;

const ALL_STATS: [StatKind; 5] = [
    StatKind::Con,
    StatKind::Root,
    StatKind::Spirit,
    StatKind::Luck,
    StatKind::Speed,
];

#[derive(Debug, PartialEq, Eq)]
pub enum CreationError {
    /// The allocation does not spend exactly the budget; positive means
    /// points left over, negative means overspent.
    PointsNotExhausted { remaining: i32 },
    StatOutOfBounds { stat: StatKind, value: i32 },
}

impl std::fmt::Display for CreationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreationError::PointsNotExhausted { remaining } => write!(
                f,
                "allocation must spend exactly {} points ({} remaining)",
                CREATION_POINTS, remaining
            ),
            CreationError::StatOutOfBounds { stat, value } => write!(
                f,
                "stat {} is {} but must lie in [{}, {}]",
                stat.display_name(),
                value,
                CREATION_STAT_MIN,
                CREATION_STAT_MAX
            ),
        }
    }
}

impl std::error::Error for CreationError {}

/// Checks an allocation against the per-stat bounds and the exact point
/// budget. Rejects without touching any state.
pub fn validate_allocation(stats: &StatBlock) -> Result<(), CreationError> {
    for stat in ALL_STATS {
        let value = stats.get(stat);
        if !(CREATION_STAT_MIN..=CREATION_STAT_MAX).contains(&value) {
            return Err(CreationError::StatOutOfBounds { stat, value });
        }
    }
    let budget = CREATION_BASE_STAT * ALL_STATS.len() as i32 + CREATION_POINTS;
    let remaining = budget - stats.total();
    if remaining != 0 {
        return Err(CreationError::PointsNotExhausted { remaining });
    }
    Ok(())
}

/// Distributes the full budget one point at a time, always into a
/// uniformly chosen stat that still has headroom. Terminates because the
/// combined headroom (5 * 10) exceeds the budget.
pub fn randomize_stats(rng: &mut impl Rng) -> StatBlock {
    let mut stats = StatBlock::uniform(CREATION_BASE_STAT);
    for _ in 0..CREATION_POINTS {
        let open: Vec<StatKind> = ALL_STATS
            .iter()
            .copied()
            .filter(|stat| stats.get(*stat) < CREATION_STAT_MAX)
            .collect();
        let pick = open[rng.gen_range(0..open.len())];
        stats.apply(pick, 1);
    }
    stats
}

/// Blank or whitespace names fall back to the nameless default.
pub fn resolve_name(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// A suggestion from the name pool, for the creation surface.
pub fn random_name(rng: &mut impl Rng) -> &'static str {
    RANDOM_NAMES[rng.gen_range(0..RANDOM_NAMES.len())]
}
