//! Shared test data.

use crate::config::GameConfig;

pub const GAME_CONFIG_JSON: &str = r#"{
  "unitInformation": [
    {"shorthand": "FF", "startHealth": 60, "cost1": 1, "upgrade": {"startHealth": 120, "cost1": 1}},
    {"shorthand": "EF", "startHealth": 30, "cost1": 4, "upgrade": {"cost1": 4}},
    {"shorthand": "DF", "startHealth": 75, "cost1": 2, "attackDamageWalker": 5, "attackRange": 2.5,
     "upgrade": {"startHealth": 150, "cost1": 4, "attackDamageWalker": 16}},
    {"shorthand": "PI", "startHealth": 15, "cost2": 1},
    {"shorthand": "EI", "startHealth": 5, "cost2": 3},
    {"shorthand": "SI", "startHealth": 40, "cost2": 1}
  ]
}"#;

pub fn game_config() -> GameConfig {
    GameConfig::from_json(GAME_CONFIG_JSON).unwrap()
}
