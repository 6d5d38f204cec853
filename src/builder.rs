//! Putting boards together by hand.

use ndarray::AssignElem;
use rand::Rng;

use crate::board::Board;
use crate::cell::{Cell, Rotation};
use crate::location::{Dimension, Location};
use crate::piece::PieceType;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A piece was placed outside the bounds of the board.
    OutOfBounds,
    /// A piece was placed over the entry or exit, whose wiring is fixed.
    FixedCell,
}

/// Assembles a [`Board`] piece by piece, mostly for setting up known layouts.
///
/// Every cell starts as the default [`Cell`], an upright [`PieceType::StraightV`].
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
///
/// ```
/// # use std::num::NonZero;
/// # use data_connector::builder::BoardBuilder;
/// # use data_connector::{Location, PieceType, Rotation};
/// let board = BoardBuilder::with_size(NonZero::new(3).unwrap())
///     .place(Location(1, 1), PieceType::StraightH, Rotation::ZERO)
///     .build()
///     .unwrap();
///
/// assert_eq!(format!("{}", board), "│││\n───\n│││\n");
/// ```
#[derive(Clone)]
pub struct BoardBuilder {
    board: Board,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_size(crate::config::DEFAULT_SIZE)
    }
}

impl BoardBuilder {
    /// Construct a new [`Self`] for a `size` by `size` board.
    pub fn with_size(size: Dimension) -> Self {
        Self {
            board: Board::filled(size, Cell::default()),
            invalid_reasons: Default::default(),
        }
    }

    /// Put `piece`, turned `rotation`, at `location`.
    ///
    /// May cause the builder to enter an [`OutOfBounds`](BuilderInvalidReason::OutOfBounds) invalid state if `location` is off the board,
    /// or a [`FixedCell`](BuilderInvalidReason::FixedCell) invalid state if `location` is the entry or exit.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn place(&mut self, location: Location, piece: PieceType, rotation: Rotation) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if self.board.is_fixed(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FixedCell);
            return self;
        }

        match self.board.cells.get_mut(location.as_index()) {
            Some(cell) => cell.assign_elem(Cell::new(piece, rotation)),
            None => self.invalid_reasons.push(BuilderInvalidReason::OutOfBounds),
        }

        self
    }

    /// Shorthand for [`Self::place`] across every cell of `row` except the entry and exit.
    pub fn fill_row(&mut self, row: usize, piece: PieceType, rotation: Rotation) -> &mut Self {
        if row >= self.board.size.get() {
            if self.invalid_reasons.is_empty() {
                self.invalid_reasons.push(BuilderInvalidReason::OutOfBounds);
            }
            return self;
        }

        for col in 0..self.board.size.get() {
            let location = Location(row, col);
            if !self.board.is_fixed(location) {
                self.place(location, piece, rotation);
            }
        }

        self
    }

    /// Replace every cell with a random draw, exactly as [`Board::generate`] would.
    ///
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.board = Board::generate(self.board.size, rng);
        }

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut board = self.board.clone();
        board.fix_terminals();
        Ok(board)
    }
}
