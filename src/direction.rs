use strum::VariantArray;

use crate::location::Location;

/// A compass side of a cell.
///
/// Variants are declared in mask order, so `direction as usize` indexes a [`Connections`](crate::Connections) mask.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Towards row 0.
    North = 0,
    /// Towards the last column.
    East = 1,
    /// Towards the last row.
    South = 2,
    /// Towards column 0.
    West = 3,
}

impl Direction {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// Stepping off the top or left edge wraps around to a huge coordinate, so bounds must be checked by the caller.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::North => location.offset_by((-1, 0)),
            Self::East => location.offset_by((0, 1)),
            Self::South => location.offset_by((1, 0)),
            Self::West => location.offset_by((0, -1)),
        }
    }

    /// The opposite side.
    pub fn invert(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Determine the direction from `a` to `b`, if they are adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}
