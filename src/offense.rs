//! Offense planner: decides when to launch mobile units, from where, and which
//! kind, then nudges support placement towards the side we last attacked.
//!
//! Launch locations are scored by the damage a unit would take walking its
//! predicted path: every path cell contributes the number of opponent turrets
//! in range times a turret's per-hit damage.

use crate::config::*;
use crate::engine::*;
use crate::location::*;
use crate::tier::TurnContext;
use crate::unit::*;
use fnv::FnvHashMap;
use log::*;
use serde::Serialize;

/// Offense bookkeeping carried from turn to turn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OffenseState {
    pub last_offense_turn: u32,
    pub preferred_side: Side,
}

/// A launch the planner issued this turn.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Launch {
    pub location: Location,
    pub kind: MobileKind,
    pub risk: f64,
    pub spawned: u32,
}

impl OffenseState {
    pub fn should_fire(&self, trigger: &TriggerPolicy, turn: u32, opponent_mp: f64) -> bool {
        match *trigger {
            TriggerPolicy::Parity { modulus, remainder } => {
                modulus > 0 && turn % modulus == remainder
            }
            TriggerPolicy::Hysteresis {
                min_cooldown,
                max_cooldown,
                opponent_mp_below,
            } => {
                let elapsed = turn.saturating_sub(self.last_offense_turn);
                (elapsed >= min_cooldown && opponent_mp < opponent_mp_below)
                    || elapsed >= max_cooldown
            }
        }
    }
}

/// The candidate whose predicted path takes the least turret damage, and that
/// damage. Earlier candidates win ties. `None` when there are no candidates.
pub fn least_damage_spawn_location(
    engine: &dyn GameEngine,
    candidates: &[Location],
    turret_damage: f64,
) -> Option<(Location, f64)> {
    let mut attackers: FnvHashMap<Location, usize> = FnvHashMap::default();

    candidates
        .iter()
        .map(|&candidate| {
            let damage: f64 = engine
                .predicted_path(candidate)
                .into_iter()
                .map(|cell| {
                    let count = *attackers
                        .entry(cell)
                        .or_insert_with(|| engine.attackers_of(cell, Player::Own).len());
                    count as f64 * turret_damage
                })
                .sum();
            trace!("Launch candidate {:?}: {} damage", candidate, damage);
            (candidate, damage)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Run the offense planner for one turn. Never fires on turn zero.
pub fn plan_offense(
    state: &mut OffenseState,
    ctx: &TurnContext,
    commander: &mut Commander,
) -> Option<Launch> {
    if ctx.is_opening() {
        return None;
    }

    let offense = &ctx.strategy.offense;
    let opponent_mp = commander
        .engine()
        .resource(Resource::MobilePoints, Player::Opponent);

    let mut launch = None;
    if state.should_fire(&offense.trigger, ctx.turn, opponent_mp) {
        let best = least_damage_spawn_location(
            commander.engine(),
            &offense.candidates,
            ctx.config.turret_damage(),
        );
        if let Some((location, risk)) = best {
            let kind = offense.units.choose(risk);
            let spawned = commander.spawn(kind.into(), location, offense.spawn_count);
            info!(
                "Launching {} {:?} from {:?} (risk {})",
                spawned, kind, location, risk
            );
            state.last_offense_turn = ctx.turn;
            state.preferred_side = location.side();
            launch = Some(Launch {
                location,
                kind,
                risk,
                spawned,
            });
        }
    }

    let supports = ctx.strategy.layout.side_supports(state.preferred_side);
    if let Some(&location) = supports
        .iter()
        .find(|&&location| commander.place(StructureKind::Support, location))
    {
        debug!("Side support placed at {:?}", location);
    }

    launch
}
