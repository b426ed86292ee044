use crate::constants::*;
use crate::error::Error;
use serde::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct Location {
    packed: u16,
}

impl Location {
    pub(crate) fn from_coords(x: u32, y: u32) -> Self {
        Location {
            packed: ((x << 8) | y) as u16,
        }
    }

    /// Build a location from signed coordinates, rejecting anything off the board grid.
    pub fn checked(x: i16, y: i16) -> Option<Self> {
        let size = BOARD_SIZE as i16;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Location::from_coords(x as u32, y as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        self.packed
    }

    #[inline]
    pub(crate) fn from_packed(packed: u16) -> Self {
        Location { packed }
    }

    pub fn offset(self, dx: i16, dy: i16) -> Option<Self> {
        Location::checked(self.x() as i16 + dx, self.y() as i16 + dy)
    }

    /// Which half of the board, split down the vertical centre line.
    pub fn side(self) -> Side {
        if self.x() < HALF_BOARD {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn in_arena(self) -> bool {
        in_arena(self.x() as i16, self.y() as i16)
    }

    /// The four orthogonal neighbours that are still on the board grid.
    pub fn neighbours(self) -> impl Iterator<Item = Location> {
        [(0, 1), (0, -1), (1, 0), (-1, 0)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Unchecked constructor for the built-in placement tables.
    pub(crate) fn at(x: u8, y: u8) -> Self {
        debug_assert!(x < BOARD_SIZE && y < BOARD_SIZE, "({x}, {y}) is off the grid");
        Location::from_coords(x as u32, y as u32)
    }
}

impl TryFrom<(u8, u8)> for Location {
    type Error = Error;

    fn try_from((x, y): (u8, u8)) -> Result<Self, Error> {
        Location::checked(x as i16, y as i16).ok_or(Error::OffBoard { x, y })
    }
}

/// Board halves, used for reactive staging and offensive side preference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Left,
    Right,
}

/// Locations travel as `[x, y]` pairs, matching the engine's frame format.
impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.x(), self.y()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (x, y) = <(i16, i16)>::deserialize(deserializer)?;
        Location::checked(x, y)
            .ok_or_else(|| de::Error::custom(format!("location [{x}, {y}] is off the board")))
    }
}
