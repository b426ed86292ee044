//! SurplusTier: spends structure points still banked after upgrades.

use crate::config::SurplusPolicy;
use crate::engine::{Commander, Resource};
use crate::tier::*;
use crate::unit::*;
use log::*;

pub struct SurplusTier;

impl SurplusTier {
    /// Scrap the weakest wall. The repair tier sees the self-removal next turn
    /// and puts a turret in its place.
    fn swap_wall(ctx: &TurnContext, commander: &mut Commander) {
        let removed = removed_this_turn(commander);
        match ctx.board.weakest(StructureKind::Wall, &removed) {
            Some(wall) => {
                debug!("Surplus: scrapping wall at {:?} ({} hp)", wall.location, wall.health);
                commander.remove(wall.location);
            }
            None => trace!("Surplus: no wall left to scrap"),
        }
    }

    /// Crowd new turrets around the turrets that did the most damage, leaving
    /// out those the reactive tier already reinforced.
    fn reinforce_turrets(ctx: &TurnContext, commander: &mut Commander) {
        let skip = ctx.strategy.reactive.reinforce_top_turrets;
        let ranked = ctx.events.turret_damage.ranked();
        let placed = reinforce_around(ctx, commander, ranked.into_iter().skip(skip));
        debug!("Surplus: {} reinforcing turrets", placed);
    }
}

impl BuildTier for SurplusTier {
    fn name(&self) -> &str {
        "surplus"
    }

    fn execute(&self, ctx: &TurnContext, commander: &mut Commander) {
        let balance = commander.balance(Resource::StructurePoints);
        if balance <= ctx.strategy.surplus_threshold {
            return;
        }
        match ctx.strategy.surplus {
            SurplusPolicy::WallSwap => Self::swap_wall(ctx, commander),
            SurplusPolicy::ReinforceTurrets => Self::reinforce_turrets(ctx, commander),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::*;
    use crate::config::StrategyConfig;
    use crate::engine::{GameEngine, Player, Resource};
    use crate::events::*;
    use crate::fixtures::*;
    use crate::location::Location;
    use crate::offline::OfflineEngine;

    fn loc(x: u8, y: u8) -> Location {
        Location::at(x, y)
    }

    fn wall(x: u8, y: u8, health: f64) -> StructureRecord {
        StructureRecord {
            location: loc(x, y),
            kind: StructureKind::Wall,
            health,
            upgraded: false,
        }
    }

    #[test]
    fn wall_swap_skips_walls_already_removed() {
        let config = game_config();
        let strategy = StrategyConfig::default();
        let board = BoardSnapshot {
            structures: vec![wall(3, 13, 10.0), wall(4, 13, 20.0), wall(5, 13, 30.0)],
            ..BoardSnapshot::default()
        };
        let events = TurnEvents::default();
        let history = ScoredOnHistory::default();
        let ctx = TurnContext {
            turn: 4,
            config: &config,
            strategy: &strategy,
            board: &board,
            events: &events,
            history: &history,
        };

        let mut engine = OfflineEngine::new(game_config());
        engine.set_balance(Resource::StructurePoints, Player::Own, 20.0);
        for s in &board.structures {
            engine.add_structure(s.kind, s.location, false);
        }
        let mut commander = Commander::new(&mut engine);
        commander.remove(loc(3, 13));
        SurplusTier.execute(&ctx, &mut commander);
        let (actions, _) = commander.submit();

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1].location(), loc(4, 13));
    }

    #[test]
    fn reinforcement_stops_when_budget_runs_low() {
        let config = game_config();
        let strategy = StrategyConfig {
            surplus: SurplusPolicy::ReinforceTurrets,
            surplus_threshold: 4.0,
            ..StrategyConfig::default()
        };
        let board = BoardSnapshot::default();
        let mut events = TurnEvents::default();
        events.turret_damage.add(loc(9, 10), 30.0);
        let history = ScoredOnHistory::default();
        let ctx = TurnContext {
            turn: 4,
            config: &config,
            strategy: &strategy,
            board: &board,
            events: &events,
            history: &history,
        };

        let mut engine = OfflineEngine::new(game_config());
        engine.set_balance(Resource::StructurePoints, Player::Own, 5.0);
        engine.add_structure(StructureKind::Turret, loc(9, 10), false);
        let mut commander = Commander::new(&mut engine);
        SurplusTier.execute(&ctx, &mut commander);
        commander.submit();

        let built = |x, y| engine.structure_at(loc(x, y)).map(|s| s.kind);
        assert_eq!(built(9, 11), Some(StructureKind::Turret));
        assert_eq!(built(9, 9), Some(StructureKind::Turret));
        assert_eq!(built(10, 10), None);
        assert_eq!(engine.resource(Resource::StructurePoints, Player::Own), 1.0);
    }

    #[test]
    fn reinforcement_leaves_lanes_and_reactive_turrets_alone() {
        let config = game_config();
        let mut strategy = StrategyConfig::side_steered();
        strategy.reactive.reinforce_top_turrets = 1;
        let board = BoardSnapshot::default();
        let mut events = TurnEvents::default();
        events.turret_damage.add(loc(20, 11), 40.0);
        events.turret_damage.add(loc(5, 11), 10.0);
        let history = ScoredOnHistory::default();
        let ctx = TurnContext {
            turn: 4,
            config: &config,
            strategy: &strategy,
            board: &board,
            events: &events,
            history: &history,
        };

        let mut engine = OfflineEngine::new(game_config());
        engine.set_balance(Resource::StructurePoints, Player::Own, 100.0);
        engine.add_structure(StructureKind::Turret, loc(5, 11), false);
        let mut commander = Commander::new(&mut engine);
        SurplusTier.execute(&ctx, &mut commander);
        commander.submit();

        let built = |x, y| engine.structure_at(loc(x, y)).map(|s| s.kind);
        // (5, 10) and (4, 11) are on the left launch lane.
        assert_eq!(built(5, 10), None);
        assert_eq!(built(4, 11), None);
        assert_eq!(built(5, 12), Some(StructureKind::Turret));
        assert_eq!(built(6, 11), Some(StructureKind::Turret));
        // (20, 11) is the top turret, which the reactive tier covers.
        assert_eq!(built(20, 12), None);
        assert_eq!(built(21, 11), None);
        assert_eq!(engine.structure_count(), 3);
    }

    #[test]
    fn nothing_happens_at_or_below_threshold() {
        let config = game_config();
        let strategy = StrategyConfig::default();
        let board = BoardSnapshot {
            structures: vec![wall(3, 13, 10.0)],
            ..BoardSnapshot::default()
        };
        let events = TurnEvents::default();
        let history = ScoredOnHistory::default();
        let ctx = TurnContext {
            turn: 4,
            config: &config,
            strategy: &strategy,
            board: &board,
            events: &events,
            history: &history,
        };

        let mut engine = OfflineEngine::new(game_config());
        engine.set_balance(Resource::StructurePoints, Player::Own, 10.0);
        engine.add_structure(StructureKind::Wall, loc(3, 13), false);
        let mut commander = Commander::new(&mut engine);
        SurplusTier.execute(&ctx, &mut commander);
        assert!(commander.actions().is_empty());
    }
}
