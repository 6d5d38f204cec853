use crate::connections::{Connections, FULL_TURN};
use crate::piece::PieceType;

/// Quarter turns clockwise applied to a piece, always in `0..4`.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub struct Rotation(u8);

impl Rotation {
    /// The piece as drawn in the catalog.
    pub const ZERO: Self = Self(0);

    /// Build a rotation from any number of quarter turns, reducing it to `0..4`.
    pub fn new(turns: u8) -> Self {
        Self(turns % FULL_TURN)
    }

    /// Number of quarter turns, in `0..4`.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// One more quarter turn clockwise.
    pub fn turned(&self) -> Self {
        Self::new(self.0 + 1)
    }
}

/// A piece as it sits on the board.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Cell {
    pub(crate) piece: PieceType,
    pub(crate) rotation: Rotation,
}

impl Cell {
    /// A `piece` turned `rotation` quarter turns clockwise.
    pub fn new(piece: PieceType, rotation: Rotation) -> Self {
        Self { piece, rotation }
    }

    /// The catalog entry this cell holds.
    pub fn piece(&self) -> PieceType {
        self.piece
    }

    /// Current orientation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The wiring of this cell after its rotation is applied.
    pub fn connections(&self) -> Connections {
        self.piece.connections().rotated(self.rotation.get())
    }

    pub(crate) fn rotate(&mut self) {
        self.rotation = self.rotation.turned();
    }
}
