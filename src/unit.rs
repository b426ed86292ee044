//! Unit kinds and their wire ids.
//!
//! The engine identifies unit types by index into the config's
//! `unitInformation` table: structures first, then mobile units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stationary structures a player can build.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum StructureKind {
    Wall,
    Support,
    Turret,
}

/// Mobile units a player can spawn.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum MobileKind {
    Scout,
    Demolisher,
    Interceptor,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum UnitKind {
    Structure(StructureKind),
    Mobile(MobileKind),
}

impl StructureKind {
    pub const ALL: [StructureKind; 3] = [
        StructureKind::Wall,
        StructureKind::Support,
        StructureKind::Turret,
    ];

    pub fn index(self) -> usize {
        match self {
            StructureKind::Wall => 0,
            StructureKind::Support => 1,
            StructureKind::Turret => 2,
        }
    }
}

impl MobileKind {
    pub fn index(self) -> usize {
        match self {
            MobileKind::Scout => 3,
            MobileKind::Demolisher => 4,
            MobileKind::Interceptor => 5,
        }
    }
}

impl UnitKind {
    /// Decode a unit type id from the frame log. Ids past the mobile units
    /// (removal and upgrade markers) are not units.
    pub fn from_index(index: u64) -> Option<UnitKind> {
        let kind = match index {
            0 => UnitKind::Structure(StructureKind::Wall),
            1 => UnitKind::Structure(StructureKind::Support),
            2 => UnitKind::Structure(StructureKind::Turret),
            3 => UnitKind::Mobile(MobileKind::Scout),
            4 => UnitKind::Mobile(MobileKind::Demolisher),
            5 => UnitKind::Mobile(MobileKind::Interceptor),
            _ => return None,
        };
        Some(kind)
    }

    pub fn index(self) -> usize {
        match self {
            UnitKind::Structure(kind) => kind.index(),
            UnitKind::Mobile(kind) => kind.index(),
        }
    }

    pub fn structure(self) -> Option<StructureKind> {
        match self {
            UnitKind::Structure(kind) => Some(kind),
            UnitKind::Mobile(_) => None,
        }
    }

    pub fn is_structure(self) -> bool {
        self.structure().is_some()
    }
}

impl From<StructureKind> for UnitKind {
    fn from(kind: StructureKind) -> Self {
        UnitKind::Structure(kind)
    }
}

impl From<MobileKind> for UnitKind {
    fn from(kind: MobileKind) -> Self {
        UnitKind::Mobile(kind)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Structure(kind) => write!(f, "{kind:?}"),
            UnitKind::Mobile(kind) => write!(f, "{kind:?}"),
        }
    }
}
