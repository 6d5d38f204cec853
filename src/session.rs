use std::fmt::{Display, Formatter};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::cell::Rotation;
use crate::config::Settings;
use crate::connections::Connections;
use crate::error::Result;
use crate::location::{Dimension, Location};
use crate::piece::PieceType;
use crate::solver::Path;
use crate::traversal::{Traversal, TraversalStep};

/// Result of testing the circuit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TestOutcome {
    /// Current flows from the entry to the exit along this path.
    PathFound(Path),
    /// The circuit is broken somewhere.
    PathNotFound,
}

impl Display for TestOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PathFound(_) => write!(f, "Circuit complete! Data flowing..."),
            Self::PathNotFound => write!(f, "Circuit incomplete! Rotate pieces to connect."),
        }
    }
}

/// Everything a renderer needs to know about one cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CellView {
    /// Where the cell is.
    pub location: Location,
    /// Which catalog piece it holds.
    pub piece: PieceType,
    /// How far the piece is turned.
    pub rotation: Rotation,
    /// The wiring after rotation.
    pub connections: Connections,
}

/// A copy of the board taken for rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    /// Side length of the board.
    pub size: Dimension,
    /// The fixed entry cell.
    pub entry: Location,
    /// The fixed exit cell.
    pub exit: Location,
    /// Every cell, row-major.
    pub cells: Vec<CellView>,
}

/// One puzzle being played: the board, the packet animation and the random source feeding new boards.
///
/// All commands run to completion on the caller's thread.
/// Share a session between threads behind a single [`Mutex`](std::sync::Mutex) if at all.
pub struct Session {
    settings: Settings,
    board: Board,
    traversal: Traversal,
    rng: StdRng,
}

impl Session {
    /// Start a session with a freshly generated board.
    pub fn new(settings: Settings) -> Self {
        let mut rng = Self::rng_for(&settings);
        let board = Board::generate(settings.size, &mut rng);

        Self {
            settings,
            board,
            traversal: Traversal::new(),
            rng,
        }
    }

    /// Start a session on a prepared `board`; later boards use the board's size.
    pub fn with_board(settings: Settings, board: Board) -> Self {
        let settings = Settings { size: board.size(), ..settings };

        Self {
            rng: Self::rng_for(&settings),
            settings,
            board,
            traversal: Traversal::new(),
        }
    }

    fn rng_for(settings: &Settings) -> StdRng {
        match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Replace the board with a new random one, dropping any packet in flight.
    ///
    /// `Some(seed)` reseeds the random source first, so the same seed always gives the same board.
    pub fn generate(&mut self, seed: Option<u64>) -> &Board {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        self.board = Board::generate(self.settings.size, &mut self.rng);
        self.traversal = Traversal::new();
        debug!("new puzzle (seed {:?})", seed);
        &self.board
    }

    /// Turn the piece at `location` a quarter turn clockwise, dropping any packet in flight.
    ///
    /// Fails with [`EngineError::OutOfRange`](crate::EngineError::OutOfRange) off the board
    /// and [`EngineError::FixedCell`](crate::EngineError::FixedCell) on the entry or exit.
    /// On error nothing changes, including the traversal.
    pub fn rotate_cell(&mut self, location: Location) -> Result<&Board> {
        self.board.rotate_cell(location)?;
        self.traversal = Traversal::new();
        Ok(&self.board)
    }

    /// Search the current board for a path and, if there is one, send a packet down it.
    ///
    /// Any earlier packet is dropped either way.
    pub fn test_circuit(&mut self) -> TestOutcome {
        match self.board.find_path() {
            Ok(path) => {
                info!("circuit complete: {}", path);
                self.traversal.start(path.clone());
                TestOutcome::PathFound(path)
            }
            Err(failure) => {
                info!("circuit incomplete: {}", failure);
                self.traversal = Traversal::new();
                TestOutcome::PathNotFound
            }
        }
    }

    /// Move the packet one cell; call once per [`Settings::tick`].
    pub fn advance_traversal(&mut self) -> TraversalStep {
        self.traversal.advance()
    }

    /// Drop the packet. Harmless when none is in flight, though reported as [`EngineError::InvalidState`](crate::EngineError::InvalidState).
    pub fn cancel_traversal(&mut self) -> Result<()> {
        self.traversal.cancel()
    }

    /// The board as it stands.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The packet animation.
    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    /// The settings this session was started with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Where current enters.
    pub fn entry(&self) -> Location {
        self.board.entry()
    }

    /// Where current must leave.
    pub fn exit(&self) -> Location {
        self.board.exit()
    }

    /// Copy out the board for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.board.size(),
            entry: self.board.entry(),
            exit: self.board.exit(),
            cells: self.board.cells()
                .map(|(location, cell)| CellView {
                    location,
                    piece: cell.piece(),
                    rotation: cell.rotation(),
                    connections: cell.connections(),
                })
                .collect(),
        }
    }
}
