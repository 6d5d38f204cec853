use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::debug;
use ndarray::{Array2, AssignElem};
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use rand::Rng;
use strum::VariantArray;

use crate::cell::{Cell, Rotation};
use crate::connections::{Connections, FULL_TURN};
use crate::direction::Direction;
use crate::error::{EngineError, Result};
use crate::location::{Dimension, Location};
use crate::piece::PieceType;

/// Directions which, from a cell, lead to a cell later in row-major order.
const FORWARD_DIRECTIONS: [Direction; 2] = [Direction::East, Direction::South];

/// Piece and orientation forced onto both the entry and the exit.
pub(crate) const TERMINAL: Cell = Cell {
    piece: PieceType::StraightH,
    rotation: Rotation::ZERO,
};

/// A square grid of rotatable pieces with a fixed entry on the left edge and a fixed exit on the right edge.
///
/// Cells are stored row-major in a single [`Array2`], so `cells[(row, col)]` lives at `row * size + col`.
/// [`Board`]s come from [`Board::generate`] or from a [`BoardBuilder`](crate::builder::BoardBuilder).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    pub(crate) cells: Array2<Cell>,
    pub(crate) size: Dimension,
}

impl Board {
    /// A board with every cell drawn uniformly from the catalog and from the four rotations.
    ///
    /// Cells are drawn in row-major order, piece first, so a seeded `rng` always yields the same board.
    /// Nothing guarantees the result is solvable.
    pub fn generate<R: Rng + ?Sized>(size: Dimension, rng: &mut R) -> Self {
        let cells = Array2::from_shape_simple_fn((size.get(), size.get()), || {
            let piece = PieceType::VARIANTS[rng.gen_range(0..PieceType::VARIANTS.len())];
            let rotation = Rotation::new(rng.gen_range(0..FULL_TURN));
            Cell::new(piece, rotation)
        });

        let mut board = Self { cells, size };
        board.fix_terminals();
        debug!("generated {}x{} board", size, size);
        board
    }

    pub(crate) fn filled(size: Dimension, cell: Cell) -> Self {
        let mut board = Self {
            cells: Array2::from_elem((size.get(), size.get()), cell),
            size,
        };
        board.fix_terminals();
        board
    }

    pub(crate) fn fix_terminals(&mut self) {
        for location in [self.entry(), self.exit()] {
            if let Some(cell) = self.cells.get_mut(location.as_index()) {
                cell.assign_elem(TERMINAL);
            }
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> Dimension {
        self.size
    }

    /// Where current enters the board: the middle row (lower middle for even sizes), first column.
    pub fn entry(&self) -> Location {
        Location(self.size.get() / 2, 0)
    }

    /// Where current must leave the board: the entry's row, last column.
    pub fn exit(&self) -> Location {
        Location(self.size.get() / 2, self.size.get() - 1)
    }

    /// Whether `location` is the entry or the exit, which cannot be rotated.
    pub fn is_fixed(&self, location: Location) -> bool {
        location == self.entry() || location == self.exit()
    }

    /// The cell at `location`, if it is on the board.
    pub fn get(&self, location: Location) -> Option<&Cell> {
        self.cells.get(location.as_index())
    }

    fn checked(&self, location: Location) -> Result<&Cell> {
        self.get(location).ok_or(EngineError::OutOfRange { location, size: self.size.get() })
    }

    /// Every cell with its location, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Location, &Cell)> {
        self.cells.indexed_iter().map(|(index, cell)| (Location::from(index), cell))
    }

    /// The rotated wiring of the cell at `location`.
    pub fn connections_at(&self, location: Location) -> Result<Connections> {
        self.checked(location).map(Cell::connections)
    }

    /// Turn the piece at `location` a quarter turn clockwise.
    ///
    /// Fails with [`EngineError::OutOfRange`] off the board and [`EngineError::FixedCell`] on the entry or exit,
    /// leaving the board untouched in both cases.
    pub fn rotate_cell(&mut self, location: Location) -> Result<()> {
        self.checked(location)?;
        if self.is_fixed(location) {
            return Err(EngineError::FixedCell(location));
        }

        if let Some(cell) = self.cells.get_mut(location.as_index()) {
            cell.rotate();
            debug!("rotated {} at {} to {} quarter turns", cell.piece, location, cell.rotation.get());
        }

        Ok(())
    }

    /// The in-bounds neighbor of `location` towards `direction`.
    pub(crate) fn neighbor(&self, location: Location, direction: Direction) -> Option<Location> {
        let candidate = direction.attempt_from(location);
        candidate.within(self.size).then_some(candidate)
    }

    /// The graph of wires that actually meet: one node per cell, and an edge between two adjacent cells whose facing sides are both wired.
    ///
    /// Each edge carries the direction leading from the earlier cell (in row-major order) to the later one.
    pub fn wiring(&self) -> UnGraphMap<Location, Direction> {
        let mut graph = UnGraphMap::with_capacity(
            self.cells.len(),
            // every horizontal and vertical link, which is the most there can be
            2 * self.size.get() * (self.size.get() - 1),
        );

        for (location, cell) in self.cells() {
            graph.add_node(location);
            let connections = cell.connections();

            for direction in FORWARD_DIRECTIONS {
                let Some(other) = self.neighbor(location, direction) else { continue };
                let meets = self.get(other).is_some_and(|c| c.connections().has(direction.invert()));

                if connections.has(direction) && meets {
                    graph.add_edge(location, other, direction);
                }
            }
        }

        graph
    }

    /// Every cell wired to the entry, the entry included.
    pub fn energized(&self) -> HashSet<Location> {
        let graph = self.wiring();
        let mut bfs = Bfs::new(&graph, self.entry());
        let mut reached = HashSet::with_capacity(graph.node_count());
        while let Some(location) = bfs.next(&graph) {
            reached.insert(location);
        }

        reached
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let out = self.cells.rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.connections().glyph()).collect::<String>())
            .join("\n");

        writeln!(f, "{}", out)
    }
}
