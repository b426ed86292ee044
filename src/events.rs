//! Action-frame parsing and per-turn event aggregation.
//!
//! The engine streams many action frames per turn. Each frame carries an
//! `events` table of sub-logs (`breach`, `death`, `attack`, `shield`,
//! `damage`), every record a loosely typed JSON array. Records are validated
//! into [`FrameEvent`]s here; anything malformed is dropped without failing
//! the frame.

use crate::constants::*;
use crate::error::*;
use crate::importance::ImportanceTally;
use crate::location::*;
use crate::unit::*;
use log::*;
use serde_json::Value;

/// A validated record from one of the frame's event sub-logs.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    /// A mobile unit reached its target edge.
    Breach { location: Location, owner: u8 },
    /// A unit died or was scrapped by its owner.
    Death {
        location: Location,
        kind: UnitKind,
        owner: u8,
        self_removed: bool,
    },
    Attack {
        attacker: Location,
        damage: f64,
        attacker_kind: UnitKind,
        owner: u8,
    },
    Shield {
        support: Location,
        amount: f64,
        owner: u8,
    },
    /// A unit took damage at `location`. `owner` owns the damaged unit.
    Damage {
        location: Location,
        damage: f64,
        kind: UnitKind,
        owner: u8,
    },
}

const SUB_LOGS: [&str; 5] = ["breach", "death", "attack", "shield", "damage"];

/// Parse every well-formed event out of an action frame.
///
/// Fails only when the frame is not JSON or has no `events` table.
pub fn parse_frame(json: &str) -> Result<Vec<FrameEvent>> {
    let frame: Value = serde_json::from_str(json)?;
    let events = frame
        .get("events")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::Frame("missing events table".to_string()))?;

    let mut parsed = Vec::new();
    for sub_log in SUB_LOGS {
        let Some(records) = events.get(sub_log).and_then(Value::as_array) else {
            continue;
        };
        for record in records {
            match parse_record(sub_log, record) {
                Some(event) => parsed.push(event),
                None => trace!("Skipping malformed {} record: {}", sub_log, record),
            }
        }
    }
    Ok(parsed)
}

fn parse_record(sub_log: &str, record: &Value) -> Option<FrameEvent> {
    let fields = record.as_array()?;
    let event = match sub_log {
        "breach" => FrameEvent::Breach {
            location: location_at(fields, 0)?,
            owner: owner_at(fields, 4)?,
        },
        "death" => FrameEvent::Death {
            location: location_at(fields, 0)?,
            kind: kind_at(fields, 1)?,
            owner: owner_at(fields, 3)?,
            self_removed: flag_at(fields, 4)?,
        },
        "attack" => FrameEvent::Attack {
            attacker: location_at(fields, 0)?,
            damage: fields.get(2)?.as_f64()?,
            attacker_kind: kind_at(fields, 3)?,
            owner: owner_at(fields, 6)?,
        },
        "shield" => FrameEvent::Shield {
            support: location_at(fields, 0)?,
            amount: fields.get(2)?.as_f64()?,
            owner: owner_at(fields, 6)?,
        },
        "damage" => FrameEvent::Damage {
            location: location_at(fields, 0)?,
            damage: fields.get(1)?.as_f64()?,
            kind: kind_at(fields, 2)?,
            owner: owner_at(fields, 4)?,
        },
        _ => return None,
    };
    Some(event)
}

fn location_at(fields: &[Value], i: usize) -> Option<Location> {
    let pair = fields.get(i)?.as_array()?;
    let x = pair.first()?.as_i64()?;
    let y = pair.get(1)?.as_i64()?;
    Location::checked(i16::try_from(x).ok()?, i16::try_from(y).ok()?)
}

fn kind_at(fields: &[Value], i: usize) -> Option<UnitKind> {
    UnitKind::from_index(fields.get(i)?.as_u64()?)
}

fn owner_at(fields: &[Value], i: usize) -> Option<u8> {
    u8::try_from(fields.get(i)?.as_u64()?).ok()
}

/// Accepts both JSON booleans and 0/1 integers.
fn flag_at(fields: &[Value], i: usize) -> Option<bool> {
    match fields.get(i)? {
        Value::Bool(flag) => Some(*flag),
        Value::Number(n) => n.as_u64().map(|n| n != 0),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Every location the opponent has scored on us from, for the whole match.
/// Append-only; duplicates are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoredOnHistory {
    breaches: Vec<Location>,
}

impl ScoredOnHistory {
    pub fn push(&mut self, location: Location) {
        self.breaches.push(location);
    }

    pub fn len(&self) -> usize {
        self.breaches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breaches.is_empty()
    }

    pub fn as_slice(&self) -> &[Location] {
        &self.breaches
    }
}

/// One of our structures lost since the previous turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DestructionRecord {
    pub location: Location,
    pub kind: StructureKind,
    /// We scrapped it ourselves rather than losing it to the opponent.
    pub self_removed: bool,
}

/// Everything the build planner learns from one turn's action frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnEvents {
    pub destroyed: Vec<DestructionRecord>,
    /// Damage dealt, keyed by turret location.
    pub turret_damage: ImportanceTally,
    /// Shield granted, keyed by support location.
    pub support_shielding: ImportanceTally,
    /// Damage absorbed, keyed by wall location.
    pub wall_damage: ImportanceTally,
}

impl TurnEvents {
    pub fn ingest(&mut self, event: &FrameEvent, history: &mut ScoredOnHistory) {
        match *event {
            FrameEvent::Breach { location, owner } => {
                if owner != OWNER_SELF {
                    debug!("Scored on at {:?}", location);
                    history.push(location);
                }
            }
            FrameEvent::Death {
                location,
                kind,
                owner,
                self_removed,
            } => {
                if let (OWNER_SELF, Some(kind)) = (owner, kind.structure()) {
                    self.destroyed.push(DestructionRecord {
                        location,
                        kind,
                        self_removed,
                    });
                }
            }
            FrameEvent::Attack {
                attacker,
                damage,
                attacker_kind,
                owner,
            } => {
                if owner == OWNER_SELF
                    && attacker_kind == UnitKind::Structure(StructureKind::Turret)
                {
                    self.turret_damage.add(attacker, damage);
                }
            }
            FrameEvent::Shield {
                support,
                amount,
                owner,
            } => {
                if owner == OWNER_SELF {
                    self.support_shielding.add(support, amount);
                }
            }
            FrameEvent::Damage {
                location,
                damage,
                kind,
                owner,
            } => {
                if owner == OWNER_SELF && kind == UnitKind::Structure(StructureKind::Wall) {
                    self.wall_damage.add(location, damage);
                }
            }
        }
    }

    pub fn ingest_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a FrameEvent>,
        history: &mut ScoredOnHistory,
    ) {
        for event in events {
            self.ingest(event, history);
        }
    }
}
