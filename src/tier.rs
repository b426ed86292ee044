//! Core types for the tiered build planner.
//!
//! `TurnContext` is the read-only view of one turn passed to every tier.
//! `BuildTier` is the trait that each step of the build planner implements.
//! Tiers issue commands through a shared [`Commander`], so later tiers see the
//! budget earlier tiers left behind.

use crate::board::BoardSnapshot;
use crate::config::*;
use crate::constants::*;
use crate::engine::*;
use crate::events::*;
use crate::location::*;
use crate::unit::*;
use fnv::FnvHashSet;

/// Everything a tier may read while planning one turn.
#[derive(Copy, Clone)]
pub struct TurnContext<'a> {
    pub turn: u32,
    pub config: &'a GameConfig,
    pub strategy: &'a StrategyConfig,
    pub board: &'a BoardSnapshot,
    /// Events aggregated from the previous turn's action frames.
    pub events: &'a TurnEvents,
    pub history: &'a ScoredOnHistory,
}

impl<'a> TurnContext<'a> {
    pub fn is_opening(&self) -> bool {
        self.turn == 0
    }

    /// The turret that dealt the most damage last turn.
    pub fn top_turret(&self) -> Option<Location> {
        self.events.turret_damage.ranked().first().copied()
    }
}

/// A single step of the build planner.
pub trait BuildTier {
    fn name(&self) -> &str;

    /// Every tier except the opening sits out turn zero.
    fn is_applicable(&self, ctx: &TurnContext) -> bool {
        !ctx.is_opening()
    }

    /// Issue this tier's commands. Rejections are tallied by the commander
    /// and never stop the tier.
    fn execute(&self, ctx: &TurnContext, commander: &mut Commander);
}

/// Locations already scrapped by an earlier tier this turn.
pub fn removed_this_turn(commander: &Commander) -> FnvHashSet<Location> {
    commander
        .actions()
        .iter()
        .filter_map(|action| match *action {
            Action::Remove { location } => Some(location),
            _ => None,
        })
        .collect()
}

/// Build turrets on the free neighbours of each of `turrets`, in order.
///
/// Off-arena and reserved cells are skipped. Stops once structure points
/// drop below [`REINFORCE_MIN_BUDGET`]. Returns how many were placed.
pub fn reinforce_around(
    ctx: &TurnContext,
    commander: &mut Commander,
    turrets: impl IntoIterator<Item = Location>,
) -> usize {
    let reserved = ctx.strategy.layout.reserved();
    let mut tried = FnvHashSet::default();
    let mut placed = 0;

    for turret in turrets {
        for neighbour in turret.neighbours() {
            if commander.balance(Resource::StructurePoints) < REINFORCE_MIN_BUDGET {
                return placed;
            }
            if !neighbour.in_arena()
                || reserved.contains(&neighbour)
                || !tried.insert(neighbour)
                || commander.engine().is_occupied(neighbour)
            {
                continue;
            }
            if commander.place(StructureKind::Turret, neighbour) {
                placed += 1;
            }
        }
    }
    placed
}
