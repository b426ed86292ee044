//! Shared helpers for integration tests.

#![allow(dead_code)]

use serde_json::json;
use terminal_foreman::config::GameConfig;
use terminal_foreman::engine::*;
use terminal_foreman::location::Location;
use terminal_foreman::offline::OfflineEngine;

pub const GAME_CONFIG_JSON: &str = r#"{
  "unitInformation": [
    {"shorthand": "FF", "startHealth": 60, "cost1": 1, "upgrade": {"startHealth": 120, "cost1": 1}},
    {"shorthand": "EF", "startHealth": 30, "cost1": 4, "upgrade": {"cost1": 4}},
    {"shorthand": "DF", "startHealth": 75, "cost1": 2, "attackDamageWalker": 5,
     "upgrade": {"startHealth": 150, "cost1": 4}},
    {"shorthand": "PI", "startHealth": 15, "cost2": 1},
    {"shorthand": "EI", "startHealth": 5, "cost2": 3},
    {"shorthand": "SI", "startHealth": 40, "cost2": 1}
  ]
}"#;

pub fn game_config() -> GameConfig {
    GameConfig::from_json(GAME_CONFIG_JSON).unwrap()
}

pub fn loc(x: u8, y: u8) -> Location {
    Location::try_from((x, y)).unwrap()
}

pub fn engine(turn: u32, sp: f64, mp: f64) -> OfflineEngine {
    let mut engine = OfflineEngine::new(game_config());
    engine.set_turn(turn);
    engine.set_balance(Resource::StructurePoints, Player::Own, sp);
    engine.set_balance(Resource::MobilePoints, Player::Own, mp);
    engine
}

/// An action frame in which the opponent scored at each of `cells`.
pub fn breach_frame(cells: &[(u8, u8)]) -> String {
    let breaches: Vec<_> = cells
        .iter()
        .map(|&(x, y)| json!([[x, y], 1, 3, "scout", 2]))
        .collect();
    json!({ "events": { "breach": breaches } }).to_string()
}
