use bevy_ecs::prelude::*;

use crate::components::cultivator::{Cultivation, Player, StatBlock};
use crate::core::world::{ActionIntent, ActionQueue};
use crate::data::constants::{realm, SpiritRoot};
use crate::rules::stats::derived_stats;
use crate::simulation::actions::roll_action;
use crate::simulation::combat::{resolve_encounter, CombatOutcome};
use crate::simulation::events::PendingEvents;
use crate::simulation::log::{GameLog, LogKind};
use crate::simulation::progression::gain_qi;
use crate::simulation::rng::GameRng;
use crate::simulation::time::{GameTime, TurnState};

/// System: spends action points on activities and settles their yield.
/// Requests with no points left, or while an event awaits a choice, are
/// rejected without touching any state.
pub fn action_system(
    intents: Res<ActionQueue>,
    time: Res<GameTime>,
    pending: Res<PendingEvents>,
    mut turn: ResMut<TurnState>,
    mut rng: ResMut<GameRng>,
    mut log: ResMut<GameLog>,
    mut query: Query<(&mut StatBlock, &mut Cultivation, &SpiritRoot), With<Player>>,
) {
    for intent in intents.0.iter() {
        let ActionIntent::Act(kind) = intent else {
            continue;
        };
        if turn.action_points == 0 || !pending.is_empty() {
            continue;
        }

        for (mut stats, mut cultivation, spirit_root) in query.iter_mut() {
            turn.action_points -= 1;

            // Yield and combat both use the attributes as they stood
            // when the quarter's activity began.
            let derived = derived_stats(&stats, realm(cultivation.realm_idx), spirit_root);
            let base_qi = derived.cultivation_speed as f64;

            let outcome = roll_action(*kind, &mut rng.0);
            for (stat, amount) in &outcome.rewards {
                stats.apply(*stat, *amount);
            }

            if outcome.combat {
                let report = resolve_encounter(
                    &mut stats,
                    &derived,
                    cultivation.realm_idx,
                    time.year,
                    &mut rng.0,
                );
                log.push(
                    &time,
                    LogKind::Combat,
                    format!("遭遇强敌【{}】！战斗一触即发！", report.enemy_name),
                );
                match report.outcome {
                    CombatOutcome::Victory { rounds, con_reward } => {
                        log.push(
                            &time,
                            LogKind::Combat,
                            format!("经过{}回合激战，你战胜了{}！", rounds, report.enemy_name),
                        );
                        log.push(
                            &time,
                            LogKind::Gain,
                            format!("战斗中锤炼了肉身，体魄+{}", con_reward),
                        );
                    }
                    CombatOutcome::Defeat { .. } => {
                        log.push(
                            &time,
                            LogKind::Combat,
                            format!("你不敌{}，重伤逃遁... (全属性小幅下降)", report.enemy_name),
                        );
                    }
                    CombatOutcome::Stalemate => {
                        log.push(
                            &time,
                            LogKind::Combat,
                            format!("你与{}鏖战许久难分胜负，只得各自退去。", report.enemy_name),
                        );
                    }
                }
            }

            let mut line = outcome.narrative.clone();
            if !outcome.rewards.is_empty() {
                let rewards: Vec<String> = outcome
                    .rewards
                    .iter()
                    .map(|(stat, amount)| format!("{}+{}", stat.display_name(), amount))
                    .collect();
                line.push_str(&format!(" ({})", rewards.join(", ")));
            }
            log.push(&time, LogKind::Plain, line);

            let report = gain_qi(&mut cultivation, &mut stats, base_qi * outcome.qi_mult);
            log.push(
                &time,
                LogKind::Gain,
                format!("通过{}获得了 {} 点灵气。", kind.source_name(), report.amount),
            );
            for new_realm in &report.breakthroughs {
                log.push(
                    &time,
                    LogKind::Event,
                    format!(
                        "========== 境界突破！晋升为【{}】！各项属性大幅提升！ ==========",
                        realm(*new_realm).name
                    ),
                );
            }
            if report.capped {
                log.push(&time, LogKind::System, "修为已至化境，无法再提升境界了！");
            }
        }
    }
}
