use crate::location::*;
use crate::unit::*;
use log::*;
use serde::{Deserialize, Serialize};

/// The two independent currencies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Resource {
    /// Spent on walls, supports, turrets and upgrades.
    StructurePoints,
    /// Spent on scouts, demolishers and interceptors.
    MobilePoints,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Player {
    Own,
    Opponent,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::Own => Player::Opponent,
            Player::Opponent => Player::Own,
        }
    }
}

/// A stationary unit able to hit a given cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AttackingUnit {
    pub location: Location,
    pub kind: StructureKind,
}

// ---------------------------------------------------------------------------
// Engine trait (caller-provided)
// ---------------------------------------------------------------------------

/// Queries and commands offered by the game engine.
///
/// The planners never simulate the game themselves: paths, attackers and
/// action legality all come from here. Every `attempt_*` call is checked
/// against the live budget by the engine.
pub trait GameEngine {
    fn turn_number(&self) -> u32;

    fn resource(&self, resource: Resource, player: Player) -> f64;

    /// Cells a mobile unit spawned at `from` is predicted to walk through.
    fn predicted_path(&self, from: Location) -> Vec<Location>;

    /// Stationary units of the other side that can hit a unit of `player`
    /// standing at `location`.
    fn attackers_of(&self, location: Location, player: Player) -> Vec<AttackingUnit>;

    fn is_occupied(&self, location: Location) -> bool;

    /// Place `count` units of `kind` at each location in turn. Returns how
    /// many were actually placed.
    fn attempt_place(&mut self, kind: UnitKind, locations: &[Location], count: u32) -> u32;

    fn attempt_upgrade(&mut self, location: Location) -> bool;

    fn attempt_remove(&mut self, location: Location) -> bool;

    /// Finalize and transmit this turn's actions. Called exactly once per turn.
    fn submit_turn(&mut self);
}

// ---------------------------------------------------------------------------
// Action record
// ---------------------------------------------------------------------------

/// An action the engine accepted this turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Action {
    Place {
        kind: UnitKind,
        location: Location,
        count: u32,
    },
    Upgrade {
        location: Location,
    },
    Remove {
        location: Location,
    },
}

impl Action {
    pub fn location(&self) -> Location {
        match *self {
            Action::Place { location, .. }
            | Action::Upgrade { location }
            | Action::Remove { location } => location,
        }
    }
}

/// Issues commands to the engine one location at a time and records which
/// ones were accepted. Rejections are counted and otherwise ignored.
pub struct Commander<'a> {
    engine: &'a mut dyn GameEngine,
    actions: Vec<Action>,
    rejected: u32,
}

impl<'a> Commander<'a> {
    pub fn new(engine: &'a mut dyn GameEngine) -> Self {
        Commander {
            engine,
            actions: Vec::new(),
            rejected: 0,
        }
    }

    pub fn engine(&self) -> &dyn GameEngine {
        &*self.engine
    }

    /// Our live balance of `resource`.
    pub fn balance(&self, resource: Resource) -> f64 {
        self.engine.resource(resource, Player::Own)
    }

    pub fn place(&mut self, kind: StructureKind, location: Location) -> bool {
        self.spawn(kind.into(), location, 1) > 0
    }

    /// Try each location in order. Occupied or unaffordable cells are skipped.
    pub fn place_all(&mut self, kind: StructureKind, locations: &[Location]) -> u32 {
        locations
            .iter()
            .filter(|&&location| self.place(kind, location))
            .count() as u32
    }

    pub fn spawn(&mut self, kind: UnitKind, location: Location, count: u32) -> u32 {
        let placed = self.engine.attempt_place(kind, &[location], count);
        if placed > 0 {
            self.actions.push(Action::Place {
                kind,
                location,
                count: placed,
            });
        } else {
            self.reject(format_args!("place {kind} at {location:?}"));
        }
        placed
    }

    pub fn upgrade(&mut self, location: Location) -> bool {
        let upgraded = self.engine.attempt_upgrade(location);
        if upgraded {
            self.actions.push(Action::Upgrade { location });
        } else {
            self.reject(format_args!("upgrade at {location:?}"));
        }
        upgraded
    }

    pub fn remove(&mut self, location: Location) -> bool {
        let removed = self.engine.attempt_remove(location);
        if removed {
            self.actions.push(Action::Remove { location });
        } else {
            self.reject(format_args!("remove at {location:?}"));
        }
        removed
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    pub fn submit(self) -> (Vec<Action>, u32) {
        self.engine.submit_turn();
        (self.actions, self.rejected)
    }

    fn reject(&mut self, what: std::fmt::Arguments<'_>) {
        self.rejected += 1;
        trace!("Engine rejected {}", what);
    }
}
