//! Static placement tables.
//!
//! A [`PlacementPlan`] is plain data: ordered target locations per structure
//! kind plus the slice boundaries the build tiers read. Swapping layouts never
//! touches planner code.

use crate::constants::*;
use crate::error::*;
use crate::location::*;
use crate::unit::*;
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

const DEFAULT_SUPPORTS: &[(u8, u8)] = &[(6, 10), (21, 10), (13, 3), (14, 3), (13, 2), (14, 2)];

const DEFAULT_TURRETS: &[(u8, u8)] = &[
    (1, 12),
    (2, 12),
    (6, 12),
    (7, 12),
    (12, 12),
    (13, 12),
    (14, 12),
    (19, 12),
    (20, 12),
    (21, 12),
    (25, 12),
    (26, 12),
    (4, 10),
    (9, 10),
    (10, 10),
    (16, 10),
    (17, 10),
    (23, 10),
];

const DEFAULT_WALLS: &[(u8, u8)] = &[
    (0, 13),
    (1, 13),
    (2, 13),
    (6, 13),
    (7, 13),
    (12, 13),
    (13, 13),
    (14, 13),
    (19, 13),
    (20, 13),
    (21, 13),
    (25, 13),
    (26, 13),
    (27, 13),
    (3, 13),
    (24, 13),
    (9, 11),
    (10, 11),
    (16, 11),
    (17, 11),
];

// Side-steered layout: turrets go up on whichever side last did the most
// damage, supports follow the offense, and the launch lanes stay open.

const STEERED_OPENING_TURRETS: &[(u8, u8)] = &[
    (0, 13),
    (4, 13),
    (5, 13),
    (23, 13),
    (24, 13),
    (27, 13),
    (1, 12),
    (6, 12),
    (22, 12),
    (26, 12),
    (2, 11),
    (7, 11),
    (21, 11),
    (3, 10),
    (9, 10),
    (11, 10),
    (13, 10),
    (15, 10),
    (17, 10),
    (19, 10),
];

const STEERED_LEFT_TURRETS: &[(u8, u8)] = &[
    (3, 13),
    (4, 12),
    (5, 12),
    (5, 11),
    (6, 11),
    (6, 10),
    (7, 10),
    (8, 10),
    (10, 10),
    (12, 10),
    (4, 9),
    (7, 9),
    (8, 9),
    (5, 8),
    (8, 8),
    (6, 7),
    (9, 7),
    (10, 6),
    (11, 5),
];

const STEERED_RIGHT_TURRETS: &[(u8, u8)] = &[
    (22, 13),
    (21, 12),
    (23, 12),
    (20, 11),
    (22, 11),
    (25, 11),
    (14, 10),
    (16, 10),
    (18, 10),
    (20, 10),
    (21, 10),
    (24, 10),
    (19, 9),
    (20, 9),
    (23, 9),
    (19, 8),
    (22, 8),
    (18, 7),
    (21, 7),
    (17, 6),
    (16, 5),
];

const STEERED_LEFT_SUPPORTS: &[(u8, u8)] =
    &[(11, 4), (10, 8), (12, 3), (13, 2), (12, 4), (13, 4), (13, 3)];

const STEERED_RIGHT_SUPPORTS: &[(u8, u8)] =
    &[(16, 4), (17, 8), (15, 3), (14, 2), (14, 4), (15, 4), (14, 3)];

/// The two diagonal launch lanes from the bottom edges up to the front line.
const STEERED_NO_BUILD: &[(u8, u8)] = &[
    (1, 13),
    (2, 13),
    (25, 13),
    (26, 13),
    (2, 12),
    (3, 12),
    (24, 12),
    (25, 12),
    (3, 11),
    (4, 11),
    (23, 11),
    (24, 11),
    (4, 10),
    (5, 10),
    (22, 10),
    (23, 10),
    (5, 9),
    (6, 9),
    (21, 9),
    (22, 9),
    (6, 8),
    (7, 8),
    (20, 8),
    (21, 8),
    (7, 7),
    (8, 7),
    (19, 7),
    (20, 7),
    (7, 6),
    (8, 6),
    (9, 6),
    (19, 6),
    (20, 6),
    (8, 5),
    (9, 5),
    (18, 5),
    (19, 5),
    (9, 4),
    (10, 4),
    (17, 4),
    (18, 4),
    (10, 3),
    (11, 3),
    (16, 3),
    (17, 3),
    (11, 2),
    (12, 2),
    (15, 2),
    (16, 2),
    (12, 1),
    (13, 1),
    (14, 1),
    (15, 1),
    (13, 0),
    (14, 0),
];

fn locations(coords: &[(u8, u8)]) -> Vec<Location> {
    coords.iter().map(|&(x, y)| Location::at(x, y)).collect()
}

/// One `attempt_place` batch: a kind and the locations to try, in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlacementBatch<'a> {
    pub kind: StructureKind,
    pub locations: &'a [Location],
}

impl<'a> PlacementBatch<'a> {
    fn new(kind: StructureKind, locations: &'a [Location]) -> Self {
        PlacementBatch { kind, locations }
    }
}

/// Target layout for the bot's half of the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementPlan {
    pub supports: Vec<Location>,
    pub turrets: Vec<Location>,
    pub walls: Vec<Location>,
    /// Supports placed ahead of the turret line in the ideal layout.
    pub priority_supports: usize,
    /// Turn-zero turrets are `turrets[opening_turrets_from..]`.
    pub opening_turrets_from: usize,
    /// Turn-zero walls are `walls[opening_walls_from..]`.
    pub opening_walls_from: usize,
    /// Explicit turn-zero turrets, used instead of the `turrets` tail.
    pub opening_turrets: Option<Vec<Location>>,
    /// Explicit turn-zero walls, used instead of the `walls` tail.
    pub opening_walls: Option<Vec<Location>>,
    /// Ideal-layout turrets while the left side does the most damage.
    /// Empty means `turrets` is used on both sides.
    pub left_turrets: Vec<Location>,
    pub right_turrets: Vec<Location>,
    /// Support spots steered to by the offense planner after attacking left.
    pub left_supports: Vec<Location>,
    /// Support spots steered to by the offense planner after attacking right.
    pub right_supports: Vec<Location>,
    /// Cells kept clear so our own mobile units can path through.
    pub no_build: Vec<Location>,
}

impl Default for PlacementPlan {
    fn default() -> Self {
        PlacementPlan {
            supports: locations(DEFAULT_SUPPORTS),
            turrets: locations(DEFAULT_TURRETS),
            walls: locations(DEFAULT_WALLS),
            priority_supports: 2,
            opening_turrets_from: 13,
            opening_walls_from: 14,
            opening_turrets: None,
            opening_walls: None,
            left_turrets: Vec::new(),
            right_turrets: Vec::new(),
            left_supports: Vec::new(),
            right_supports: Vec::new(),
            no_build: Vec::new(),
        }
    }
}

impl PlacementPlan {
    /// Turrets laid out per side with supports steered by the offense and
    /// the launch lanes kept clear. Opens with a full turret line.
    pub fn side_steered() -> Self {
        PlacementPlan {
            supports: Vec::new(),
            turrets: Vec::new(),
            walls: Vec::new(),
            priority_supports: 0,
            opening_turrets_from: 0,
            opening_walls_from: 0,
            opening_turrets: Some(locations(STEERED_OPENING_TURRETS)),
            opening_walls: Some(Vec::new()),
            left_turrets: locations(STEERED_LEFT_TURRETS),
            right_turrets: locations(STEERED_RIGHT_TURRETS),
            left_supports: locations(STEERED_LEFT_SUPPORTS),
            right_supports: locations(STEERED_RIGHT_SUPPORTS),
            no_build: locations(STEERED_NO_BUILD),
        }
    }

    /// The turn-zero first line of defence: turrets, then walls.
    pub fn opening_batches(&self) -> Vec<PlacementBatch<'_>> {
        let turrets = match &self.opening_turrets {
            Some(turrets) => turrets.as_slice(),
            None => tail(&self.turrets, self.opening_turrets_from),
        };
        let walls = match &self.opening_walls {
            Some(walls) => walls.as_slice(),
            None => tail(&self.walls, self.opening_walls_from),
        };
        vec![
            PlacementBatch::new(StructureKind::Turret, turrets),
            PlacementBatch::new(StructureKind::Wall, walls),
        ]
    }

    /// The steady-state layout in build order: priority supports, the
    /// turrets for `turret_side`, the remaining supports, all walls.
    pub fn ideal_batches(&self, turret_side: Side) -> Vec<PlacementBatch<'_>> {
        let split = self.priority_supports.min(self.supports.len());
        let (first, rest) = self.supports.split_at(split);
        vec![
            PlacementBatch::new(StructureKind::Support, first),
            PlacementBatch::new(StructureKind::Turret, self.ideal_turrets(turret_side)),
            PlacementBatch::new(StructureKind::Support, rest),
            PlacementBatch::new(StructureKind::Wall, &self.walls),
        ]
    }

    pub fn ideal_turrets(&self, side: Side) -> &[Location] {
        let steered = match side {
            Side::Left => &self.left_turrets,
            Side::Right => &self.right_turrets,
        };
        if steered.is_empty() {
            &self.turrets
        } else {
            steered
        }
    }

    pub fn side_supports(&self, side: Side) -> &[Location] {
        match side {
            Side::Left => &self.left_supports,
            Side::Right => &self.right_supports,
        }
    }

    /// Cells that surplus turret reinforcement must leave empty.
    pub fn reserved(&self) -> FnvHashSet<Location> {
        self.no_build
            .iter()
            .chain(&self.left_supports)
            .chain(&self.right_supports)
            .copied()
            .collect()
    }

    /// Every target must be a buildable cell on our half of the arena.
    pub fn validate(&self) -> Result<()> {
        let all = self
            .supports
            .iter()
            .chain(&self.turrets)
            .chain(&self.walls)
            .chain(&self.left_supports)
            .chain(&self.right_supports)
            .chain(&self.left_turrets)
            .chain(&self.right_turrets)
            .chain(self.opening_turrets.iter().flatten())
            .chain(self.opening_walls.iter().flatten())
            .chain(&self.no_build);
        for loc in all {
            if !in_own_half(loc.x() as i16, loc.y() as i16) {
                return Err(Error::Config(format!(
                    "layout location [{}, {}] is outside our half of the arena",
                    loc.x(),
                    loc.y()
                )));
            }
        }
        Ok(())
    }
}

fn tail(locations: &[Location], from: usize) -> &[Location] {
    locations.get(from..).unwrap_or(&[])
}
