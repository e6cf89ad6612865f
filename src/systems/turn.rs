use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::cultivator::{Cultivation, Player, StatBlock};
use crate::core::world::{ActionIntent, ActionQueue};
use crate::data::events::{annual_event, EventLibrary};
use crate::simulation::events::PendingEvents;
use crate::simulation::log::{GameLog, LogKind};
use crate::simulation::rng::GameRng;
use crate::simulation::time::{
    GameTime, TurnState, ACTION_POINTS_PER_QUARTER, MAX_RANDOM_EVENTS_PER_YEAR,
    RANDOM_EVENT_CHANCE,
};

/// System: advances the calendar once the quarter's action points are
/// spent. The advance command is rejected while points remain; turn
/// boundaries belong to the controller, not the caller.
pub fn turn_system(
    intents: Res<ActionQueue>,
    library: Res<EventLibrary>,
    mut time: ResMut<GameTime>,
    mut turn: ResMut<TurnState>,
    mut pending: ResMut<PendingEvents>,
    mut rng: ResMut<GameRng>,
    mut log: ResMut<GameLog>,
    mut query: Query<(&mut Cultivation, &StatBlock), With<Player>>,
) {
    for intent in intents.0.iter() {
        if !matches!(intent, ActionIntent::AdvanceQuarter) {
            continue;
        }
        if turn.action_points > 0 {
            continue;
        }

        let wrapped = time.advance();
        for (mut cultivation, stats) in query.iter_mut() {
            cultivation.age_quarters += 1;
            if wrapped {
                turn.events_this_year = 0;
                log.push(
                    &time,
                    LogKind::System,
                    format!("=== 第{}年到了 ===", time.year),
                );
                if time.year > 1 {
                    pending.push(annual_event(stats.spirit));
                }
            }
        }

        turn.action_points = ACTION_POINTS_PER_QUARTER;

        if turn.events_this_year < MAX_RANDOM_EVENTS_PER_YEAR
            && rng.0.gen::<f64>() < RANDOM_EVENT_CHANCE
        {
            let pool = &library.catalog.events;
            if !pool.is_empty() {
                let event = pool[rng.0.gen_range(0..pool.len())].clone();
                pending.push(event);
                turn.events_this_year += 1;
            }
        }
    }
}
