use bevy_ecs::prelude::*;

/// Marker component for the sole player-controlled cultivator.
#[derive(Component, Debug)]
pub struct Player;

/// Display name chosen at character creation.
#[derive(Component, Debug, Clone)]
pub struct Name(pub String);

/// The five raw stats. Everything combat- or cultivation-related is
/// derived from these; they never go below zero.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatBlock {
    pub con: i32,
    pub root: i32,
    pub spirit: i32,
    pub luck: i32,
    pub speed: i32,
}

impl StatBlock {
    pub fn uniform(value: i32) -> Self {
        Self {
            con: value,
            root: value,
            spirit: value,
            luck: value,
            speed: value,
        }
    }

    pub fn total(&self) -> i32 {
        self.con + self.root + self.spirit + self.luck + self.speed
    }
}

/// Progress along the realm ladder plus lifetime bookkeeping.
/// `current_qi` stays below the realm threshold except in the terminal
/// realm, where it is clamped to the cap.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Cultivation {
    pub realm_idx: usize,
    pub current_qi: f64,
    pub age_quarters: u32,
}

impl Default for Cultivation {
    fn default() -> Self {
        Self {
            realm_idx: 0,
            current_qi: 0.0,
            age_quarters: 0,
        }
    }
}

impl Cultivation {
    pub fn age_years(&self) -> u32 {
        self.age_quarters / 4
    }
}
