use std::fmt::{Display, Formatter};
use std::mem;

use log::trace;

use crate::error::{EngineError, Result};
use crate::location::Location;
use crate::solver::Path;

/// Where a packet replaying a [`Path`] currently is.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum TraversalState {
    /// No packet in flight.
    #[default]
    Idle,
    /// The packet will next report `path[index]`.
    Running {
        /// The path being replayed.
        path: Path,
        /// Position of the next cell to report.
        index: usize,
    },
    /// The packet reached the exit. Stays here until restarted or cancelled.
    Delivered {
        /// The path that was replayed.
        path: Path,
    },
}

/// What a single [`Traversal::advance`] reports back to the presentation layer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TraversalStep {
    /// Draw the packet at `location`, the `index`-th cell of the path.
    Frame {
        /// Position along the path.
        index: usize,
        /// The cell itself.
        location: Location,
    },
    /// The packet arrived at the exit `location`.
    Delivered {
        /// The exit cell.
        location: Location,
    },
    /// Nothing to animate.
    Idle,
}

impl Display for TraversalStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Frame { location, .. } => write!(f, "Data packet at {}", location),
            Self::Delivered { .. } => write!(f, "Data packet delivered successfully!"),
            Self::Idle => write!(f, "No data packet in flight"),
        }
    }
}

/// Steps a packet along a path, one cell per call to [`Self::advance`].
///
/// The caller owns the clock: it calls [`Self::advance`] on whatever cadence it animates at
/// and [`Self::cancel`] to drop a packet early.
#[derive(Clone, Debug, Default)]
pub struct Traversal {
    state: TraversalState,
    cursor: Option<Location>,
}

impl Traversal {
    /// An idle traversal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is in flight with a fresh packet at the start of `path`.
    ///
    /// An empty path leaves the traversal idle.
    pub fn start(&mut self, path: Path) {
        self.cursor = None;
        self.state = if path.is_empty() {
            TraversalState::Idle
        } else {
            TraversalState::Running { path, index: 0 }
        };
    }

    /// Move the packet one cell forward and report it.
    ///
    /// Every cell but the last is reported as a [`TraversalStep::Frame`]; the last one as [`TraversalStep::Delivered`],
    /// which is repeated on every later call.
    pub fn advance(&mut self) -> TraversalStep {
        let (state, step) = match mem::take(&mut self.state) {
            TraversalState::Idle => (TraversalState::Idle, TraversalStep::Idle),
            TraversalState::Running { path, index } => match path.get(index) {
                Some(location) if index + 1 < path.len() => {
                    (TraversalState::Running { path, index: index + 1 }, TraversalStep::Frame { index, location })
                }
                Some(location) => (TraversalState::Delivered { path }, TraversalStep::Delivered { location }),
                None => (TraversalState::Idle, TraversalStep::Idle),
            },
            TraversalState::Delivered { path } => match path.last() {
                Some(location) => (TraversalState::Delivered { path }, TraversalStep::Delivered { location }),
                None => (TraversalState::Idle, TraversalStep::Idle),
            },
        };

        self.state = state;
        self.cursor = match step {
            TraversalStep::Frame { location, .. } | TraversalStep::Delivered { location } => Some(location),
            TraversalStep::Idle => None,
        };
        trace!("traversal step: {:?}", step);
        step
    }

    /// Drop the packet in flight, or the delivered one.
    ///
    /// Fails with [`EngineError::InvalidState`] if already idle, which callers may ignore.
    pub fn cancel(&mut self) -> Result<()> {
        if self.state == TraversalState::Idle {
            return Err(EngineError::InvalidState);
        }

        self.state = TraversalState::Idle;
        self.cursor = None;
        Ok(())
    }

    /// Send a new packet down the same path from its start.
    ///
    /// Fails with [`EngineError::InvalidState`] if idle, since there is no path to replay.
    pub fn restart(&mut self) -> Result<()> {
        match mem::take(&mut self.state) {
            TraversalState::Idle => Err(EngineError::InvalidState),
            TraversalState::Running { path, .. } | TraversalState::Delivered { path } => {
                self.start(path);
                Ok(())
            }
        }
    }

    /// The current state.
    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    /// The cell reported by the most recent step, if any.
    pub fn cursor(&self) -> Option<Location> {
        self.cursor
    }

    /// Whether a packet is still on its way.
    pub fn is_running(&self) -> bool {
        matches!(self.state, TraversalState::Running { .. })
    }

    /// Whether the packet arrived at the exit.
    pub fn is_delivered(&self) -> bool {
        matches!(self.state, TraversalState::Delivered { .. })
    }

    /// The cells still to be reported, lazily, without moving the packet.
    pub fn frames(&self) -> impl Iterator<Item = Location> + '_ {
        let remaining: &[Location] = match &self.state {
            TraversalState::Running { path, index } => &path.locations()[*index..],
            _ => &[],
        };

        remaining.iter().copied()
    }
}
