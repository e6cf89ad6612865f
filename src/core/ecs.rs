use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::core::world::ActionQueue;
use crate::data::events::EventLibrary;
use crate::simulation::events::PendingEvents;
use crate::simulation::log::GameLog;
use crate::simulation::rng::GameRng;
use crate::simulation::time::{GameTime, TurnState};
use crate::systems::{action_system, event_choice_system, turn_system};

/// Canonical tick ordering for the engine.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSet {
    Intake,
    Simulation,
    Time,
}

/// Build the ECS world with baseline resources.
pub fn create_world(seed: u64) -> World {
    let mut world = World::new();
    world.insert_resource(GameTime::default());
    world.insert_resource(TurnState::default());
    world.insert_resource(ActionQueue::default());
    world.insert_resource(GameLog::default());
    world.insert_resource(PendingEvents::default());
    world.insert_resource(GameRng::from_seed(seed));
    world.insert_resource(EventLibrary::load_default());
    world
}

/// Build the system schedule in the canonical order. Event choices
/// settle before fresh activities, and the calendar moves last.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets((TickSet::Intake, TickSet::Simulation, TickSet::Time).chain());

    schedule.add_systems((
        (event_choice_system, action_system)
            .chain()
            .in_set(TickSet::Simulation),
        turn_system.in_set(TickSet::Time),
    ));

    schedule
}
