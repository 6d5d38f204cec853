//! Session tunables and their defaults.

use std::num::NonZero;
use std::time::Duration;

use crate::location::Dimension;

/// Board side length used when nothing else is asked for.
pub const DEFAULT_SIZE: Dimension = match NonZero::new(6) {
    Some(size) => size,
    None => panic!("board size must be non-zero"),
};

/// Time between two packet traversal steps.
pub const DEFAULT_TICK: Duration = Duration::from_millis(300);

/// Tunables of a puzzle [`Session`](crate::Session).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Side length of every generated board.
    pub size: Dimension,
    /// How often the presentation layer should call [`Session::advance_traversal`](crate::Session::advance_traversal).
    /// The engine never sleeps on its own.
    pub tick: Duration,
    /// Seed for the session's random source; `None` draws one from the operating system.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            tick: DEFAULT_TICK,
            seed: None,
        }
    }
}

impl Settings {
    /// Default settings for a `size` by `size` board.
    pub fn with_size(size: Dimension) -> Self {
        Self { size, ..Default::default() }
    }

    /// Same settings with a fixed seed, for reproducible boards.
    pub fn seeded(self, seed: u64) -> Self {
        Self { seed: Some(seed), ..self }
    }
}
