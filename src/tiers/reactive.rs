//! ReactiveTier: answers every breach in the scored-on history with a turret
//! set back from the edge, and late in the game stages interceptors as well.
//! It can also crowd turrets around last turn's hardest hitters first.

use crate::config::{InterceptorPolicy, ReactiveConfig};
use crate::engine::{Commander, Player, Resource};
use crate::location::*;
use crate::tier::*;
use crate::unit::*;
use log::*;

/// Where to build in response to a breach at `breach`.
///
/// Edge-midpoint exceptions are built on directly. Otherwise the location is
/// pushed `offset` cells towards the centre line: right on the left side,
/// left on the right side. `None` if that lands off the grid.
pub fn reactive_build_location(breach: Location, config: &ReactiveConfig) -> Option<Location> {
    if config.exceptions.contains(&breach) {
        return Some(breach);
    }
    let offset = config.offset as i16;
    match breach.side() {
        Side::Left => breach.offset(offset, 0),
        Side::Right => breach.offset(-offset, 0),
    }
}

pub struct ReactiveTier;

impl ReactiveTier {
    fn answer_breaches(ctx: &TurnContext, commander: &mut Commander, late_game: bool) {
        let config = &ctx.strategy.reactive;
        let per_breach = late_game && config.interceptors == InterceptorPolicy::AfterTurn;

        for &breach in ctx.history.as_slice() {
            match reactive_build_location(breach, config) {
                Some(target) => {
                    let placed = commander.place(StructureKind::Turret, target);
                    if !placed
                        && config.upgrade_when_blocked
                        && commander.engine().is_occupied(target)
                    {
                        commander.upgrade(target);
                    }
                }
                None => trace!("No reactive build cell for breach at {:?}", breach),
            }

            if per_breach && !config.exceptions.contains(&breach) {
                let staging = config.staging(breach.side());
                commander.spawn(MobileKind::Interceptor.into(), staging, 1);
            }
        }
    }

    /// One interceptor on the side of the top turret while the opponent is
    /// banking mobile points.
    fn guard_top_turret(ctx: &TurnContext, commander: &mut Commander, min_opponent_mp: f64) {
        let opponent_mp = commander
            .engine()
            .resource(Resource::MobilePoints, Player::Opponent);
        if opponent_mp < min_opponent_mp {
            return;
        }
        match ctx.top_turret() {
            Some(turret) => {
                let staging = ctx.strategy.reactive.staging(turret.side());
                debug!(
                    "Opponent holds {} MP, staging interceptor at {:?}",
                    opponent_mp, staging
                );
                commander.spawn(MobileKind::Interceptor.into(), staging, 1);
            }
            None => trace!("No turret activity to pick an interceptor side from"),
        }
    }
}

impl BuildTier for ReactiveTier {
    fn name(&self) -> &str {
        "reactive"
    }

    fn is_applicable(&self, ctx: &TurnContext) -> bool {
        let config = &ctx.strategy.reactive;
        !ctx.is_opening()
            && (!ctx.history.is_empty()
                || config.reinforce_top_turrets > 0
                || config.interceptors != InterceptorPolicy::AfterTurn)
    }

    fn execute(&self, ctx: &TurnContext, commander: &mut Commander) {
        let config = &ctx.strategy.reactive;
        let late_game = ctx.turn > config.interceptor_after_turn;

        if config.reinforce_top_turrets > 0 {
            let top = ctx.events.turret_damage.ranked();
            let placed = reinforce_around(
                ctx,
                commander,
                top.into_iter().take(config.reinforce_top_turrets),
            );
            trace!("Reactive: {} turrets around the top hitters", placed);
        }

        Self::answer_breaches(ctx, commander, late_game);

        if let InterceptorPolicy::OpponentMp { min_opponent_mp } = config.interceptors {
            if late_game {
                Self::guard_top_turret(ctx, commander, min_opponent_mp);
            }
        }
    }
}
