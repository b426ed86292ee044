//! Whole-turn scenarios driving `AlgoStrategy` against the offline engine.

mod common;

use common::*;
use terminal_foreman::config::*;
use terminal_foreman::engine::*;
use terminal_foreman::layout::PlacementPlan;
use terminal_foreman::location::Side;
use terminal_foreman::planner::BuildPlannerBuilder;
use terminal_foreman::tiers::ReactiveTier;
use terminal_foreman::unit::*;
use terminal_foreman::AlgoStrategy;

fn started() -> AlgoStrategy {
    let mut strategy = AlgoStrategy::default();
    strategy.on_game_start(game_config());
    strategy
}

/// A strategy that only runs the offense planner.
fn offense_only(config: StrategyConfig) -> AlgoStrategy {
    let mut strategy = AlgoStrategy::with_planner(config, BuildPlannerBuilder::new().build());
    strategy.on_game_start(game_config());
    strategy
}

fn turret_at(x: u8, y: u8) -> AttackingUnit {
    AttackingUnit {
        location: loc(x, y),
        kind: StructureKind::Turret,
    }
}

#[test]
fn opening_turn_places_exactly_the_opening_slice() {
    let mut strategy = started();
    let mut engine = engine(0, 40.0, 5.0);
    let snapshot = engine.snapshot_json();

    let report = strategy.on_turn(&snapshot, &mut engine);

    let placed: Vec<_> = report
        .actions
        .iter()
        .map(|action| match *action {
            Action::Place { kind, location, .. } => (kind, location),
            ref other => panic!("unexpected action on turn zero: {:?}", other),
        })
        .collect();

    let turret = UnitKind::Structure(StructureKind::Turret);
    let wall = UnitKind::Structure(StructureKind::Wall);
    assert_eq!(
        placed,
        vec![
            (turret, loc(9, 10)),
            (turret, loc(10, 10)),
            (turret, loc(16, 10)),
            (turret, loc(17, 10)),
            (turret, loc(23, 10)),
            (wall, loc(3, 13)),
            (wall, loc(24, 13)),
            (wall, loc(9, 11)),
            (wall, loc(10, 11)),
            (wall, loc(16, 11)),
            (wall, loc(17, 11)),
        ]
    );
    assert_eq!(report.rejected, 0);
    assert!(report.launch.is_none());
    assert!(engine.spawned().is_empty());
    assert_eq!(engine.resource(Resource::StructurePoints, Player::Own), 24.0);
    assert_eq!(engine.submitted_turns(), 1);
}

#[test]
fn finished_layout_is_not_rebuilt() {
    let layout = StrategyConfig::default().layout;
    let mut engine = engine(2, 100.0, 0.0);
    for (kind, cells) in [
        (StructureKind::Support, &layout.supports),
        (StructureKind::Turret, &layout.turrets),
        (StructureKind::Wall, &layout.walls),
    ] {
        for &cell in cells {
            engine.add_structure(kind, cell, false);
        }
    }
    let before = engine.structure_count();

    let mut strategy = started();
    let snapshot = engine.snapshot_json();
    let report = strategy.on_turn(&snapshot, &mut engine);

    let ideal = report.tiers.iter().find(|t| t.name == "ideal").unwrap();
    assert_eq!((ideal.actions, ideal.rejected), (0, 0));
    assert_eq!(engine.structure_count(), before);
    // Surplus still swaps out the weakest wall; all are at full health so the
    // first one in snapshot order goes.
    assert_eq!(report.actions, vec![Action::Remove { location: loc(9, 11) }]);
    assert_eq!(engine.resource(Resource::StructurePoints, Player::Own), 100.0);
}

#[test]
fn breaches_get_offset_turrets_and_late_interceptors() {
    let planner = BuildPlannerBuilder::new()
        .add_tier(Box::new(ReactiveTier))
        .build();
    let mut strategy = AlgoStrategy::with_planner(StrategyConfig::default(), planner);
    strategy.on_game_start(game_config());
    strategy.on_action_frame(&breach_frame(&[(5, 8), (22, 8), (2, 11)]));

    let mut engine = engine(30, 20.0, 10.0);
    let snapshot = engine.snapshot_json();
    strategy.on_turn(&snapshot, &mut engine);

    for cell in [loc(7, 8), loc(20, 8), loc(2, 11)] {
        let built = engine.structure_at(cell).map(|s| s.kind);
        assert_eq!(built, Some(StructureKind::Turret), "no turret at {:?}", cell);
    }
    let staged: Vec<_> = engine
        .spawned()
        .iter()
        .map(|unit| (unit.kind, unit.location, unit.count))
        .collect();
    assert_eq!(
        staged,
        vec![
            (MobileKind::Interceptor, loc(16, 2), 1),
            (MobileKind::Interceptor, loc(11, 2), 1),
        ]
    );
}

#[test]
fn no_interceptors_before_the_late_game() {
    let planner = BuildPlannerBuilder::new()
        .add_tier(Box::new(ReactiveTier))
        .build();
    let mut strategy = AlgoStrategy::with_planner(StrategyConfig::default(), planner);
    strategy.on_game_start(game_config());
    strategy.on_action_frame(&breach_frame(&[(5, 8)]));

    let mut engine = engine(28, 20.0, 10.0);
    let snapshot = engine.snapshot_json();
    strategy.on_turn(&snapshot, &mut engine);

    assert!(engine.structure_at(loc(7, 8)).is_some());
    assert!(engine.spawned().is_empty());
}

#[test]
fn offense_launches_down_the_unguarded_path() {
    let mut strategy = started();
    let mut engine = engine(1, 0.0, 5.0);
    engine.set_path(loc(13, 0), vec![loc(13, 1), loc(13, 2), loc(13, 3)]);
    engine.set_path(loc(14, 0), vec![loc(14, 1), loc(14, 2), loc(14, 3)]);
    engine.add_threat(
        loc(13, 3),
        AttackingUnit {
            location: loc(12, 16),
            kind: StructureKind::Turret,
        },
    );

    let snapshot = engine.snapshot_json();
    let report = strategy.on_turn(&snapshot, &mut engine);

    let launch = report.launch.unwrap();
    assert_eq!(launch.location, loc(14, 0));
    assert_eq!(launch.kind, MobileKind::Scout);
    assert_eq!(launch.risk, 0.0);
    assert_eq!(launch.spawned, 5);
    assert_eq!(strategy.offense_state().last_offense_turn, 1);
    assert_eq!(engine.resource(Resource::MobilePoints, Player::Own), 0.0);
}

#[test]
fn scored_on_history_only_grows() {
    let mut strategy = started();
    let mut seen = Vec::new();

    for (turn, cells) in [
        (1, vec![(5, 8)]),
        (2, vec![]),
        (3, vec![(22, 8), (5, 8)]),
        (4, vec![(2, 11)]),
    ] {
        strategy.on_action_frame(&breach_frame(&cells));
        let now = strategy.history().as_slice().to_vec();
        assert!(now.starts_with(&seen));
        assert_eq!(now.len(), seen.len() + cells.len());
        seen = now;

        let mut engine = engine(turn, 10.0, 0.0);
        let snapshot = engine.snapshot_json();
        strategy.on_turn(&snapshot, &mut engine);
        assert_eq!(strategy.history().as_slice(), seen.as_slice());
        assert_eq!(engine.submitted_turns(), 1);
    }
}

#[test]
fn scrapped_wall_comes_back_as_a_turret() {
    let mut strategy = started();
    strategy.on_action_frame(
        r#"{"events": {"death": [[[9, 11], 0, "w1", 1, true], [[10, 11], 0, "w2", 1, false]]}}"#,
    );

    let mut engine = engine(3, 100.0, 0.0);
    let snapshot = engine.snapshot_json();
    let report = strategy.on_turn(&snapshot, &mut engine);

    let turret = UnitKind::Structure(StructureKind::Turret);
    let wall = UnitKind::Structure(StructureKind::Wall);
    assert_eq!(
        report.actions[..2],
        [
            Action::Place {
                kind: turret,
                location: loc(9, 11),
                count: 1
            },
            Action::Place {
                kind: wall,
                location: loc(10, 11),
                count: 1
            },
        ]
    );
    let repair = report.tiers.iter().find(|t| t.name == "repair").unwrap();
    assert_eq!((repair.actions, repair.rejected), (2, 0));
}

#[test]
fn launching_right_steers_supports_to_the_right() {
    let mut strategy = offense_only(StrategyConfig {
        layout: PlacementPlan::side_steered(),
        ..StrategyConfig::default()
    });
    let mut engine = engine(1, 8.0, 5.0);
    engine.set_path(loc(13, 0), vec![loc(13, 1), loc(13, 2)]);
    engine.set_path(loc(14, 0), vec![loc(14, 1), loc(14, 2)]);
    engine.add_threat(loc(13, 2), turret_at(12, 16));

    let snapshot = engine.snapshot_json();
    let report = strategy.on_turn(&snapshot, &mut engine);

    assert_eq!(report.launch.unwrap().location, loc(14, 0));
    assert_eq!(strategy.offense_state().preferred_side, Side::Right);
    let support = |engine: &terminal_foreman::offline::OfflineEngine, x, y| {
        engine.structure_at(loc(x, y)).map(|s| s.kind)
    };
    assert_eq!(support(&engine, 16, 4), Some(StructureKind::Support));
    assert_eq!(support(&engine, 11, 4), None);

    // No launch on an even turn, but the side preference sticks and the next
    // free right-hand spot is taken.
    engine.advance_turn(0.0, 0.0);
    let snapshot = engine.snapshot_json();
    let report = strategy.on_turn(&snapshot, &mut engine);
    assert!(report.launch.is_none());
    assert_eq!(support(&engine, 17, 8), Some(StructureKind::Support));
    assert_eq!(engine.resource(Resource::StructurePoints, Player::Own), 0.0);
}

#[test]
fn cooldown_offense_escalates_on_risky_paths() {
    let mut strategy = offense_only(StrategyConfig {
        offense: OffenseConfig {
            trigger: TriggerPolicy::Hysteresis {
                min_cooldown: 3,
                max_cooldown: 4,
                opponent_mp_below: 10.0,
            },
            units: UnitSelection::by_risk(),
            ..OffenseConfig::default()
        },
        ..StrategyConfig::default()
    });

    let mut launches = Vec::new();
    for (turn, opponent_mp, threats) in [
        (1, 5.0, 0),
        (2, 5.0, 0),
        (3, 5.0, 4),
        (4, 0.0, 0),
        (5, 0.0, 0),
        (6, 50.0, 0),
        (7, 50.0, 0),
    ] {
        let mut engine = engine(turn, 0.0, 9.0);
        engine.set_balance(Resource::MobilePoints, Player::Opponent, opponent_mp);
        engine.set_path(loc(13, 0), vec![loc(13, 1)]);
        engine.set_path(loc(14, 0), vec![loc(14, 1)]);
        for i in 0..threats {
            engine.add_threat(loc(13, 1), turret_at(12, 16 + i));
            engine.add_threat(loc(14, 1), turret_at(15, 16 + i));
        }

        let snapshot = engine.snapshot_json();
        let report = strategy.on_turn(&snapshot, &mut engine);
        let launch = report
            .launch
            .map(|l| (l.kind, l.location, l.risk, l.spawned));
        launches.push((turn, launch, strategy.offense_state().last_offense_turn));
    }

    assert_eq!(
        launches,
        vec![
            // Still inside the minimum cooldown.
            (1, None, 0),
            (2, None, 0),
            // Cooldown met and the opponent is short on MP. Four turrets on
            // the path make it risky enough for demolishers.
            (3, Some((MobileKind::Demolisher, loc(13, 0), 20.0, 3)), 3),
            (4, None, 3),
            (5, None, 3),
            // Opponent is holding MP, so wait.
            (6, None, 3),
            // Maximum cooldown forces a launch. Clear path, so scouts.
            (7, Some((MobileKind::Scout, loc(13, 0), 0.0, 9)), 7),
        ]
    );
}

#[test]
fn side_steered_strategy_opens_with_a_full_turret_line() {
    let mut strategy = AlgoStrategy::new(StrategyConfig::side_steered());
    strategy.on_game_start(game_config());
    let mut engine = engine(0, 40.0, 5.0);
    let snapshot = engine.snapshot_json();
    let report = strategy.on_turn(&snapshot, &mut engine);

    assert_eq!(report.actions.len(), 20);
    assert_eq!(engine.structure_count(), 20);
    assert!(engine.structure_at(loc(0, 13)).is_some());
    assert!(engine.structure_at(loc(19, 10)).is_some());
    assert_eq!(engine.resource(Resource::StructurePoints, Player::Own), 0.0);
}
