use bevy_ecs::prelude::*;

use crate::data::constants::SEASONS;

pub const ACTION_POINTS_PER_QUARTER: u8 = 3;
pub const MAX_RANDOM_EVENTS_PER_YEAR: u8 = 2;

/// Chance that a fresh quarter opens with a random event.
pub const RANDOM_EVENT_CHANCE: f64 = 0.3;

/// Global resource tracking the simulation calendar.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTime {
    pub year: u32,
    /// 0-3, one per season.
    pub quarter: u8,
}

impl Default for GameTime {
    fn default() -> Self {
        Self { year: 1, quarter: 0 }
    }
}

impl GameTime {
    pub fn season(&self) -> &'static str {
        SEASONS[self.quarter as usize % SEASONS.len()]
    }

    /// Moves to the next quarter. Returns true when the year wrapped.
    pub fn advance(&mut self) -> bool {
        self.quarter += 1;
        if self.quarter >= 4 {
            self.quarter = 0;
            self.year += 1;
            return true;
        }
        false
    }
}

/// Per-quarter action budget and the yearly random-event allowance.
#[derive(Resource, Debug, Clone, Copy)]
pub struct TurnState {
    pub action_points: u8,
    pub events_this_year: u8,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            action_points: ACTION_POINTS_PER_QUARTER,
            events_this_year: 0,
        }
    }
}

impl TurnState {
    /// True once every action point of the quarter is spent; the quarter
    /// only advances on an explicit advance command after this.
    pub fn is_turn_over(&self) -> bool {
        self.action_points == 0
    }
}
