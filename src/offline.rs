//! In-memory engine for offline testing and benchmarking.
//!
//! Tracks our structures, both players' balances and the mobile units spawned
//! this turn. Paths and attackers are scripted by the caller rather than
//! simulated. Placement follows the real rules closely enough for planning:
//! our half of the arena only, one structure per cell, paid up front.

use crate::config::GameConfig;
use crate::engine::*;
use crate::location::*;
use crate::unit::*;
use fnv::{FnvHashMap, FnvHashSet};
use serde_json::json;
use std::cell::Cell;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacedStructure {
    pub kind: StructureKind,
    pub health: f64,
    pub upgraded: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpawnedUnit {
    pub kind: MobileKind,
    pub location: Location,
    pub count: u32,
}

pub struct OfflineEngine {
    config: GameConfig,
    turn: u32,
    balances: FnvHashMap<(Resource, Player), f64>,
    structures: FnvHashMap<Location, PlacedStructure>,
    pending_removal: FnvHashSet<Location>,
    spawned: Vec<SpawnedUnit>,
    paths: FnvHashMap<Location, Vec<Location>>,
    threats: FnvHashMap<Location, Vec<AttackingUnit>>,
    path_queries: Cell<u32>,
    attacker_queries: Cell<u32>,
    submitted_turns: u32,
}

impl OfflineEngine {
    pub fn new(config: GameConfig) -> Self {
        OfflineEngine {
            config,
            turn: 0,
            balances: FnvHashMap::default(),
            structures: FnvHashMap::default(),
            pending_removal: FnvHashSet::default(),
            spawned: Vec::new(),
            paths: FnvHashMap::default(),
            threats: FnvHashMap::default(),
            path_queries: Cell::new(0),
            attacker_queries: Cell::new(0),
            submitted_turns: 0,
        }
    }

    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    pub fn set_balance(&mut self, resource: Resource, player: Player, amount: f64) {
        self.balances.insert((resource, player), amount);
    }

    /// Put a structure on the board without paying for it.
    pub fn add_structure(&mut self, kind: StructureKind, location: Location, upgraded: bool) {
        let health = self.config.max_health(kind, upgraded);
        self.structures.insert(
            location,
            PlacedStructure {
                kind,
                health,
                upgraded,
            },
        );
    }

    pub fn set_health(&mut self, location: Location, health: f64) {
        if let Some(s) = self.structures.get_mut(&location) {
            s.health = health;
        }
    }

    /// Script the path a mobile unit spawned at `from` will take.
    pub fn set_path(&mut self, from: Location, path: Vec<Location>) {
        self.paths.insert(from, path);
    }

    /// Script an opponent structure that can hit our units at `location`.
    pub fn add_threat(&mut self, location: Location, attacker: AttackingUnit) {
        self.threats.entry(location).or_default().push(attacker);
    }

    pub fn structure_at(&self, location: Location) -> Option<&PlacedStructure> {
        self.structures.get(&location)
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    pub fn is_pending_removal(&self, location: Location) -> bool {
        self.pending_removal.contains(&location)
    }

    pub fn spawned(&self) -> &[SpawnedUnit] {
        &self.spawned
    }

    pub fn submitted_turns(&self) -> u32 {
        self.submitted_turns
    }

    pub fn path_queries(&self) -> u32 {
        self.path_queries.get()
    }

    pub fn attacker_queries(&self) -> u32 {
        self.attacker_queries.get()
    }

    /// Resolve the turn: scrapped structures disappear, mobile units leave
    /// the board, income is added and the turn counter advances.
    pub fn advance_turn(&mut self, structure_income: f64, mobile_income: f64) {
        for location in self.pending_removal.drain() {
            self.structures.remove(&location);
        }
        self.spawned.clear();
        for player in [Player::Own, Player::Opponent] {
            *self
                .balances
                .entry((Resource::StructurePoints, player))
                .or_default() += structure_income;
            *self
                .balances
                .entry((Resource::MobilePoints, player))
                .or_default() += mobile_income;
        }
        self.turn += 1;
    }

    /// Render our side of the board in the engine's turn snapshot format.
    pub fn snapshot_json(&self) -> String {
        let mut sorted: Vec<(&Location, &PlacedStructure)> = self.structures.iter().collect();
        sorted.sort_by_key(|(loc, _)| (loc.y(), loc.x()));

        let list = |kind: StructureKind| -> Vec<serde_json::Value> {
            sorted
                .iter()
                .filter(|(_, s)| s.kind == kind)
                .map(|(loc, s)| json!([loc.x(), loc.y(), s.health, ""]))
                .collect()
        };
        let upgrades: Vec<serde_json::Value> = sorted
            .iter()
            .filter(|(_, s)| s.upgraded)
            .map(|(loc, _)| json!([loc.x(), loc.y(), 0, ""]))
            .collect();

        let stats = |player: Player| {
            json!([
                30,
                self.resource(Resource::StructurePoints, player),
                self.resource(Resource::MobilePoints, player),
                0
            ])
        };

        json!({
            "turnInfo": [0, self.turn, 0, 0],
            "p1Stats": stats(Player::Own),
            "p2Stats": stats(Player::Opponent),
            "p1Units": [
                list(StructureKind::Wall),
                list(StructureKind::Support),
                list(StructureKind::Turret),
                [], [], [], [],
                upgrades
            ],
            "p2Units": [[], [], [], [], [], [], [], []]
        })
        .to_string()
    }

    fn charge(&mut self, resource: Resource, amount: f64) -> bool {
        let balance = self.balances.entry((resource, Player::Own)).or_default();
        if *balance >= amount {
            *balance -= amount;
            true
        } else {
            false
        }
    }

    fn place_structure(&mut self, kind: StructureKind, location: Location) -> bool {
        if !is_own_cell(location) || self.structures.contains_key(&location) {
            return false;
        }
        let (resource, cost) = self.config.cost(kind.into());
        if !self.charge(resource, cost) {
            return false;
        }
        self.add_structure(kind, location, false);
        true
    }

    fn spawn_mobile(&mut self, kind: MobileKind, location: Location, count: u32) -> u32 {
        if !is_own_cell(location) || self.structures.contains_key(&location) {
            return 0;
        }
        let (resource, cost) = self.config.cost(kind.into());
        let affordable = if cost > 0.0 {
            (self.resource(resource, Player::Own) / cost).floor() as u32
        } else {
            count
        };
        let placed = count.min(affordable);
        if placed == 0 || !self.charge(resource, cost * placed as f64) {
            return 0;
        }
        self.spawned.push(SpawnedUnit {
            kind,
            location,
            count: placed,
        });
        placed
    }
}

fn is_own_cell(location: Location) -> bool {
    crate::constants::in_own_half(location.x() as i16, location.y() as i16)
}

impl GameEngine for OfflineEngine {
    fn turn_number(&self) -> u32 {
        self.turn
    }

    fn resource(&self, resource: Resource, player: Player) -> f64 {
        self.balances
            .get(&(resource, player))
            .copied()
            .unwrap_or_default()
    }

    fn predicted_path(&self, from: Location) -> Vec<Location> {
        self.path_queries.set(self.path_queries.get() + 1);
        self.paths.get(&from).cloned().unwrap_or_default()
    }

    fn attackers_of(&self, location: Location, player: Player) -> Vec<AttackingUnit> {
        self.attacker_queries.set(self.attacker_queries.get() + 1);
        match player {
            Player::Own => self.threats.get(&location).cloned().unwrap_or_default(),
            Player::Opponent => Vec::new(),
        }
    }

    fn is_occupied(&self, location: Location) -> bool {
        self.structures.contains_key(&location)
    }

    fn attempt_place(&mut self, kind: UnitKind, locations: &[Location], count: u32) -> u32 {
        locations
            .iter()
            .map(|&location| match kind {
                UnitKind::Structure(kind) => self.place_structure(kind, location) as u32,
                UnitKind::Mobile(kind) => self.spawn_mobile(kind, location, count),
            })
            .sum()
    }

    fn attempt_upgrade(&mut self, location: Location) -> bool {
        let Some(&existing) = self.structures.get(&location) else {
            return false;
        };
        if existing.upgraded {
            return false;
        }
        let cost = self.config.upgrade_cost(existing.kind);
        if !self.charge(Resource::StructurePoints, cost) {
            return false;
        }
        let health = self.config.max_health(existing.kind, true);
        self.structures.insert(
            location,
            PlacedStructure {
                kind: existing.kind,
                health,
                upgraded: true,
            },
        );
        true
    }

    fn attempt_remove(&mut self, location: Location) -> bool {
        self.structures.contains_key(&location) && self.pending_removal.insert(location)
    }

    fn submit_turn(&mut self) {
        self.submitted_turns += 1;
    }
}
