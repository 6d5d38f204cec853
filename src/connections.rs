use std::fmt::{Display, Formatter};
use std::ops::Index;

use itertools::Itertools;
use strum::VariantArray;

use crate::direction::Direction;

/// Number of quarter turns making up a full turn.
pub const FULL_TURN: u8 = 4;

/// Which sides of a piece carry a wire stub, indexed by [`Direction`].
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Connections([bool; 4]);

impl Connections {
    /// A mask with no wires at all.
    pub const NONE: Self = Self([false; 4]);

    /// Build a mask from `[north, east, south, west]`.
    pub const fn from_array(mask: [bool; 4]) -> Self {
        Self(mask)
    }

    /// The mask as `[north, east, south, west]`.
    pub fn as_array(&self) -> [bool; 4] {
        self.0
    }

    /// Whether `side` carries a wire.
    pub fn has(&self, side: Direction) -> bool {
        self.0[side.index()]
    }

    /// Every wired side, in compass order.
    pub fn wired(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::VARIANTS.iter().copied().filter(|side| self.has(*side))
    }

    /// Number of wired sides.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|wired| **wired).count()
    }

    /// Encode as a nibble: north is bit 0, east bit 1, south bit 2, west bit 3.
    pub fn bits(&self) -> u8 {
        self.0.iter()
            .enumerate()
            .fold(0, |acc, (i, wired)| if *wired { acc | 1 << i } else { acc })
    }

    /// Rotate clockwise by `turns` quarter turns.
    ///
    /// One quarter turn moves the west stub to the north, north to east, east to south and south to west,
    /// i.e. the array is shifted right by one. Any multiple of [`FULL_TURN`] is the identity.
    pub fn rotated(&self, turns: u8) -> Self {
        let mut mask = self.0;
        mask.rotate_right((turns % FULL_TURN) as usize);
        Self(mask)
    }

    /// Same result as [`Self::rotated`], one quarter turn at a time.
    pub(crate) fn rotated_stepwise(&self, turns: u8) -> Self {
        (0..turns).fold(*self, |mask, _| {
            let [n, e, s, w] = mask.0;
            Self([w, n, e, s])
        })
    }

    /// A box-drawing character depicting this mask.
    pub fn glyph(&self) -> char {
        match self.wired().collect_vec().as_slice() {
            [] => ' ',
            [Direction::North] => '╵',
            [Direction::East] => '╶',
            [Direction::South] => '╷',
            [Direction::West] => '╴',
            [Direction::North, Direction::South] => '│',
            [Direction::East, Direction::West] => '─',
            [Direction::North, Direction::East] => '└',
            [Direction::East, Direction::South] => '┌',
            [Direction::South, Direction::West] => '┐',
            [Direction::North, Direction::West] => '┘',
            [Direction::North, Direction::East, Direction::South] => '├',
            [Direction::East, Direction::South, Direction::West] => '┬',
            [Direction::North, Direction::South, Direction::West] => '┤',
            [Direction::North, Direction::East, Direction::West] => '┴',
            _ => '┼',
        }
    }
}

/// Rotate `mask` clockwise by `turns` quarter turns.
pub fn rotate(mask: Connections, turns: u8) -> Connections {
    mask.rotated(turns)
}

impl Index<Direction> for Connections {
    type Output = bool;

    fn index(&self, side: Direction) -> &Self::Output {
        &self.0[side.index()]
    }
}

impl From<[bool; 4]> for Connections {
    fn from(value: [bool; 4]) -> Self {
        Self(value)
    }
}

impl Display for Connections {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
