#![warn(missing_docs)]

//! # `data-connector`
//!
//! The engine behind a circuit puzzle: pieces with fixed wiring are scattered over a square board,
//! and the player turns them in place until current can run from the entry on the left edge to the exit on the right edge.
//!
//! Start a [`Session`], which deals a random [`Board`] according to its [`Settings`].
//! Feed it the player's commands ([`rotate_cell`](Session::rotate_cell), [`test_circuit`](Session::test_circuit),
//! [`generate`](Session::generate)) and draw whatever [`snapshot`](Session::snapshot) returns.
//! When a test succeeds, call [`advance_traversal`](Session::advance_traversal) on a timer to animate the packet along the path.
//!
//! Fixed layouts, for tests or puzzles designed by hand, are put together with a [`BoardBuilder`](builder::BoardBuilder).
//!
//! # Internals
//! Each of the eleven [`PieceType`]s has a four-sided wiring mask ([`Connections`]) which is turned clockwise by the cell's [`Rotation`].
//! Current flows between two neighbors when both facing sides are wired.
//! The [`PathSolver`] runs a breadth-first search whose states are a cell plus the heading it was entered with,
//! since a piece may take current from one side and not another; the first path reaching the exit is a shortest one.

pub use board::Board;
pub use cell::{Cell, Rotation};
pub use config::Settings;
pub use connections::{rotate, Connections};
pub use direction::Direction;
pub use error::{EngineError, Result};
pub use location::{Dimension, Location};
pub use piece::{connections_of, PieceType};
pub use session::{CellView, Session, Snapshot, TestOutcome};
pub use solver::{Path, PathSolver, SolverFailure};
pub use traversal::{Traversal, TraversalState, TraversalStep};

pub(crate) mod board;
mod tests;
pub(crate) mod cell;
pub mod config;
pub(crate) mod connections;
pub(crate) mod direction;
pub(crate) mod error;
pub(crate) mod location;
pub(crate) mod piece;
pub mod builder;
pub(crate) mod session;
pub(crate) mod solver;
pub(crate) mod traversal;
#[cfg(feature = "wasm")]
pub mod wasm;
