use thiserror::Error;

use crate::location::Location;

/// Result type for engine commands.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Recoverable failures of engine commands. None of them alter the board or traversal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum EngineError {
    /// A command targeted a coordinate outside the board.
    #[error("location {location} is outside the {size}x{size} board")]
    OutOfRange {
        /// The offending coordinate.
        location: Location,
        /// Side length of the board.
        size: usize,
    },

    /// The entry and exit cells keep their wiring for the lifetime of a board.
    #[error("cell {0} is fixed and cannot be rotated")]
    FixedCell(Location),

    /// The traversal has nothing to act on.
    #[error("no packet traversal is in progress")]
    InvalidState,
}
