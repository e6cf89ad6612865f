use std::collections::VecDeque;

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::cultivator::StatBlock;
use crate::data::events::{EventDef, EventOutcome, EventOption};
use crate::rules::checks::{resolve_check, CheckContext};
use crate::rules::stats::StatKind;

/// Events waiting for the player's choice, oldest first. Two events
/// triggering on the same boundary both survive; the presentation layer
/// surfaces one at a time.
#[derive(Resource, Debug, Default)]
pub struct PendingEvents {
    queue: VecDeque<EventDef>,
}

impl PendingEvents {
    pub fn push(&mut self, event: EventDef) {
        self.queue.push_back(event);
    }

    pub fn front(&self) -> Option<&EventDef> {
        self.queue.front()
    }

    pub fn pop(&mut self) -> Option<EventDef> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Outcome of resolving one chosen option.
#[derive(Debug, Clone)]
pub struct EventResolution {
    pub success: bool,
    pub outcome: EventOutcome,
}

/// Rolls the option's check and picks the branch. A missing failure
/// branch falls back to the success outcome.
pub fn resolve_option(
    option: &EventOption,
    ctx: &CheckContext,
    rng: &mut impl Rng,
) -> EventResolution {
    let success = resolve_check(option.check, ctx, rng);
    let outcome = if success {
        option.success.clone()
    } else {
        option.fail.clone().unwrap_or_else(|| option.success.clone())
    };
    EventResolution { success, outcome }
}

/// Applies the outcome's stat delta, if any. Returns what was applied
/// for the log line.
pub fn apply_outcome(stats: &mut StatBlock, outcome: &EventOutcome) -> Option<(StatKind, i32)> {
    let stat = outcome.stat?;
    stats.apply(stat, outcome.amount);
    Some((stat, outcome.amount))
}
