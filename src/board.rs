//! Turn snapshot inspection.
//!
//! The snapshot lists our units per type under `p1Units` (walls, supports,
//! turrets, ..., upgrades at index 7) with each entry `[x, y, health, id]`,
//! and our resources under `p1Stats` as `[health, SP, MP, time]`. Missing or
//! malformed sections are read as empty so a turn can always be planned.

use crate::config::GameConfig;
use crate::error::*;
use crate::location::*;
use crate::unit::*;
use fnv::FnvHashSet;
use log::*;
use serde_json::Value;

const UPGRADE_LIST_INDEX: usize = 7;

/// One of our structures as of this turn's snapshot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StructureRecord {
    pub location: Location,
    pub kind: StructureKind,
    pub health: f64,
    pub upgraded: bool,
}

impl StructureRecord {
    /// Current health over full health, against the upgraded baseline when
    /// the structure has been upgraded.
    pub fn health_ratio(&self, config: &GameConfig) -> f64 {
        let max = config.max_health(self.kind, self.upgraded);
        if max > 0.0 {
            self.health / max
        } else {
            1.0
        }
    }

    pub fn needs_repair(&self, config: &GameConfig, threshold: f64) -> bool {
        self.health_ratio(config) <= threshold
    }

    /// Supports are never scrapped for low health.
    pub fn is_removable(&self) -> bool {
        self.kind != StructureKind::Support
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PlayerStats {
    pub health: f64,
    pub structure_points: f64,
    pub mobile_points: f64,
}

/// Our side of the board at the start of a turn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardSnapshot {
    pub turn: u32,
    pub own: PlayerStats,
    pub opponent: PlayerStats,
    /// Walls, then supports, then turrets, each in snapshot order.
    pub structures: Vec<StructureRecord>,
}

impl BoardSnapshot {
    /// Fails only when the text is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: Value = serde_json::from_str(json)?;
        if !state.is_object() {
            return Err(Error::Snapshot("expected a JSON object".to_string()));
        }

        let turn = state
            .get("turnInfo")
            .and_then(|info| info.get(1))
            .and_then(Value::as_u64)
            .and_then(|turn| u32::try_from(turn).ok())
            .unwrap_or_default();

        let units = state.get("p1Units").and_then(Value::as_array);

        let upgraded: FnvHashSet<Location> = unit_list(units, UPGRADE_LIST_INDEX)
            .iter()
            .filter_map(entry_location)
            .collect();

        let mut structures = Vec::new();
        for kind in StructureKind::ALL {
            for entry in unit_list(units, kind.index()) {
                let Some(location) = entry_location(entry) else {
                    trace!("Skipping malformed {:?} entry: {}", kind, entry);
                    continue;
                };
                let health = entry.get(2).and_then(Value::as_f64).unwrap_or(0.0);
                structures.push(StructureRecord {
                    location,
                    kind,
                    health,
                    upgraded: upgraded.contains(&location),
                });
            }
        }

        Ok(BoardSnapshot {
            turn,
            own: player_stats(state.get("p1Stats")),
            opponent: player_stats(state.get("p2Stats")),
            structures,
        })
    }

    pub fn of_kind(&self, kind: StructureKind) -> impl Iterator<Item = &StructureRecord> + '_ {
        self.structures.iter().filter(move |s| s.kind == kind)
    }

    pub fn at(&self, location: Location) -> Option<&StructureRecord> {
        self.structures.iter().find(|s| s.location == location)
    }

    /// Walls and turrets at or below the repair threshold, walls first.
    pub fn repair_candidates(&self, config: &GameConfig, threshold: f64) -> Vec<&StructureRecord> {
        self.structures
            .iter()
            .filter(|s| s.is_removable() && s.needs_repair(config, threshold))
            .collect()
    }

    /// The lowest-health structure of `kind` not in `exclude`; the first one
    /// in snapshot order wins ties.
    pub fn weakest(
        &self,
        kind: StructureKind,
        exclude: &FnvHashSet<Location>,
    ) -> Option<&StructureRecord> {
        self.of_kind(kind)
            .filter(|s| !exclude.contains(&s.location))
            .fold(None, |best: Option<&StructureRecord>, s| match best {
                Some(b) if b.health <= s.health => Some(b),
                _ => Some(s),
            })
    }
}

fn unit_list(units: Option<&Vec<Value>>, index: usize) -> &[Value] {
    units
        .and_then(|lists| lists.get(index))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn entry_location(entry: &Value) -> Option<Location> {
    let x = entry.get(0)?.as_i64()?;
    let y = entry.get(1)?.as_i64()?;
    Location::checked(i16::try_from(x).ok()?, i16::try_from(y).ok()?)
}

fn player_stats(stats: Option<&Value>) -> PlayerStats {
    let field = |i: usize| {
        stats
            .and_then(|s| s.get(i))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    };
    PlayerStats {
        health: field(0),
        structure_points: field(1),
        mobile_points: field(2),
    }
}
