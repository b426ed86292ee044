//! Turn orchestration.
//!
//! [`AlgoStrategy`] owns everything that persists between turns and drives the
//! build and offense planners once per turn. Action frames arriving while a
//! turn plays out are folded into a pending [`TurnEvents`] that the next
//! `on_turn` call consumes.

use crate::board::BoardSnapshot;
use crate::config::*;
use crate::engine::*;
use crate::error::*;
use crate::events::*;
use crate::offense::*;
use crate::planner::*;
use crate::tier::TurnContext;
use log::*;
use serde::Serialize;

/// What happened during one `on_turn` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TurnReport {
    pub turn: u32,
    pub actions: Vec<Action>,
    /// Commands the engine refused. Informational only.
    pub rejected: u32,
    pub tiers: Vec<TierSummary>,
    pub launch: Option<Launch>,
}

pub struct AlgoStrategy {
    game: Option<GameConfig>,
    strategy: StrategyConfig,
    planner: BuildPlanner,
    history: ScoredOnHistory,
    pending: TurnEvents,
    offense: OffenseState,
}

impl Default for AlgoStrategy {
    fn default() -> Self {
        AlgoStrategy::new(StrategyConfig::default())
    }
}

impl AlgoStrategy {
    pub fn new(strategy: StrategyConfig) -> Self {
        AlgoStrategy::with_planner(strategy, BuildPlanner::default())
    }

    pub fn with_planner(strategy: StrategyConfig, planner: BuildPlanner) -> Self {
        AlgoStrategy {
            game: None,
            strategy,
            planner,
            history: ScoredOnHistory::default(),
            pending: TurnEvents::default(),
            offense: OffenseState::default(),
        }
    }

    /// Store the game's static config and reset everything persistent.
    pub fn on_game_start(&mut self, config: GameConfig) {
        info!(
            "Game start: planner {:016x}, clearing {} recorded breaches",
            self.planner.fingerprint(),
            self.history.len()
        );
        self.game = Some(config);
        self.history = ScoredOnHistory::default();
        self.pending = TurnEvents::default();
        self.offense = OffenseState::default();
    }

    pub fn on_game_start_json(&mut self, json: &str) -> Result<()> {
        let config = GameConfig::from_json(json)?;
        self.on_game_start(config);
        Ok(())
    }

    /// Fold one action frame into the pending events. Malformed frames are
    /// logged and dropped.
    pub fn on_action_frame(&mut self, json: &str) {
        match parse_frame(json) {
            Ok(events) => self.pending.ingest_all(&events, &mut self.history),
            Err(err) => warn!("Dropping action frame: {}", err),
        }
    }

    /// Plan and submit one turn. The engine's `submit_turn` is called exactly
    /// once, whatever state the inputs are in.
    pub fn on_turn(&mut self, json: &str, engine: &mut dyn GameEngine) -> TurnReport {
        let events = std::mem::take(&mut self.pending);
        let turn = engine.turn_number();

        let board = BoardSnapshot::from_json(json).unwrap_or_else(|err| {
            warn!("Unreadable turn snapshot on turn {}: {}", turn, err);
            BoardSnapshot::default()
        });

        let mut commander = Commander::new(engine);
        let mut report = TurnReport {
            turn,
            ..TurnReport::default()
        };

        match self.game.as_ref() {
            Some(config) => {
                info!(
                    "Turn {}: {} SP, {} MP",
                    turn,
                    commander.balance(Resource::StructurePoints),
                    commander.balance(Resource::MobilePoints)
                );
                let ctx = TurnContext {
                    turn,
                    config,
                    strategy: &self.strategy,
                    board: &board,
                    events: &events,
                    history: &self.history,
                };
                report.tiers = self.planner.run(&ctx, &mut commander);
                report.launch = plan_offense(&mut self.offense, &ctx, &mut commander);
            }
            None => warn!("Turn {} started before the game config arrived", turn),
        }

        let (actions, rejected) = commander.submit();
        info!(
            "Turn {} submitted: {} actions, {} rejected",
            turn,
            actions.len(),
            rejected
        );
        report.actions = actions;
        report.rejected = rejected;
        report
    }

    pub fn history(&self) -> &ScoredOnHistory {
        &self.history
    }

    pub fn pending(&self) -> &TurnEvents {
        &self.pending
    }

    pub fn offense_state(&self) -> &OffenseState {
        &self.offense
    }

    pub fn strategy(&self) -> &StrategyConfig {
        &self.strategy
    }
}
