use bevy_ecs::prelude::*;

use crate::components::cultivator::{Cultivation, Player, StatBlock};
use crate::core::world::{ActionIntent, ActionQueue};
use crate::data::constants::{realm, SpiritRoot};
use crate::rules::checks::CheckContext;
use crate::rules::stats::derived_stats;
use crate::simulation::events::{apply_outcome, resolve_option, PendingEvents};
use crate::simulation::log::{GameLog, LogKind};
use crate::simulation::rng::GameRng;
use crate::simulation::time::GameTime;

/// System: resolves the player's choice for the oldest pending event.
/// A choice with no event pending, or an option index out of range,
/// leaves everything untouched.
pub fn event_choice_system(
    intents: Res<ActionQueue>,
    time: Res<GameTime>,
    mut pending: ResMut<PendingEvents>,
    mut rng: ResMut<GameRng>,
    mut log: ResMut<GameLog>,
    mut query: Query<(&mut StatBlock, &Cultivation, &SpiritRoot), With<Player>>,
) {
    for intent in intents.0.iter() {
        let ActionIntent::ChooseEventOption(choice) = intent else {
            continue;
        };
        let Some(event) = pending.front() else {
            continue;
        };
        if *choice >= event.options.len() {
            continue;
        }

        let Some(event) = pending.pop() else {
            continue;
        };
        let option = &event.options[*choice];

        for (mut stats, cultivation, spirit_root) in query.iter_mut() {
            let derived = derived_stats(&stats, realm(cultivation.realm_idx), spirit_root);
            let ctx = CheckContext {
                luck: stats.luck,
                spirit: stats.spirit,
                attack: derived.attack,
                defense: derived.defense,
                year: time.year,
            };
            let resolution = resolve_option(option, &ctx, &mut rng.0);
            log.push(&time, LogKind::Event, resolution.outcome.msg.clone());
            if let Some((stat, amount)) = apply_outcome(&mut stats, &resolution.outcome) {
                log.push(
                    &time,
                    LogKind::Gain,
                    format!("{}+{}", stat.display_name(), amount),
                );
            }
        }
    }
}
