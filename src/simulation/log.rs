use bevy_ecs::prelude::*;

use crate::simulation::time::GameTime;

/// Category of a log entry, used by the presentation layer for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Plain,
    System,
    Gain,
    Event,
    Combat,
}

/// One line of the player-facing chronicle, stamped with game time.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub year: u32,
    pub quarter: u8,
    pub kind: LogKind,
    pub text: String,
}

/// Resource collecting the chronicle in order of occurrence.
#[derive(Resource, Debug, Default)]
pub struct GameLog {
    pub entries: Vec<LogEntry>,
}

impl GameLog {
    pub fn push(&mut self, time: &GameTime, kind: LogKind, text: impl Into<String>) {
        self.entries.push(LogEntry {
            year: time.year,
            quarter: time.quarter,
            kind,
            text: text.into(),
        });
    }
}
