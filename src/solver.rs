use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::board::Board;
use crate::direction::Direction;
use crate::location::Location;

/// Reasons a [`PathSolver`] may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// Every reachable approach was explored without arriving at the exit.
    /// This is an ordinary outcome for an unsolved board.
    #[error("no wired path leads from the entry to the exit")]
    NotFound,
}

/// An ordered run of grid-adjacent cells from the entry to the exit, both included.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path(Vec<Location>);

impl Path {
    /// Every cell on the path, entry first.
    pub fn locations(&self) -> &[Location] {
        &self.0
    }

    /// The entry cell.
    pub fn first(&self) -> Option<Location> {
        self.0.first().copied()
    }

    /// The exit cell.
    pub fn last(&self) -> Option<Location> {
        self.0.last().copied()
    }

    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no cells. Paths found by a [`PathSolver`] never are.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The cell at position `index`.
    pub fn get(&self, index: usize) -> Option<Location> {
        self.0.get(index).copied()
    }

    /// Iterate the cells in order, entry first.
    pub fn iter(&self) -> impl Iterator<Item = Location> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Location>> for Path {
    fn from(value: Vec<Location>) -> Self {
        Self(value)
    }
}

impl IntoIterator for Path {
    type Item = Location;
    type IntoIter = std::vec::IntoIter<Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" -> "))
    }
}

/// A cell together with the heading travelled to arrive there.
///
/// The same cell may accept current from one side and refuse it from another, so it is explored once per heading.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
struct State {
    location: Location,
    heading: Direction,
}

/// Breadth-first search for a wired path across a [`Board`].
/// Use [`Self::solve`] to look for one.
pub struct PathSolver<'a> {
    board: &'a Board,
}

impl<'a> From<&'a Board> for PathSolver<'a> {
    fn from(board: &'a Board) -> Self {
        Self { board }
    }
}

impl PathSolver<'_> {
    /// Find a shortest wired path from the entry to the exit, returning [`Ok`] with the [`Path`] or [`Err`] with [`SolverFailure::NotFound`].
    ///
    /// # Search
    /// Current may flow from cell A to its neighbor B in direction D if and only if A is wired on side D
    /// and B is wired on the side opposite D.
    ///
    /// The search starts at the entry heading east, as if current arrived from beyond the west edge.
    /// Taking the exit off the queue ends the search, whichever side it was entered from.
    /// Any other cell must be wired on the side it was entered from, otherwise the state is a dead end.
    /// From a live state, every other wired side leading to an in-bounds neighbor yields a new state.
    ///
    /// Each state is queued at most once and remembers the state it was discovered from,
    /// so following those links back from the exit reproduces a path whose every step passed the wiring check at both ends,
    /// save the last one, which only the cell before the exit has to be wired for.
    /// At most four states exist per cell, so the search is linear in the board area.
    pub fn solve(&self) -> Result<Path, SolverFailure> {
        let exit = self.board.exit();
        let start = State { location: self.board.entry(), heading: Direction::East };

        let mut frontier = VecDeque::from([start]);
        let mut discovered = HashSet::from([start]);
        let mut parents: HashMap<State, State> = HashMap::new();
        let mut explored = 0usize;

        while let Some(state) = frontier.pop_front() {
            explored += 1;

            if state.location == exit {
                let path = Self::reconstruct(&parents, state);
                debug!("found a {} cell path after exploring {} states", path.len(), explored);
                return Ok(path);
            }

            let Some(cell) = self.board.get(state.location) else { continue };
            let connections = cell.connections();
            let incoming = state.heading.invert();
            if !connections.has(incoming) {
                continue;
            }

            for heading in connections.wired().filter(|side| *side != incoming) {
                let Some(location) = self.board.neighbor(state.location, heading) else { continue };
                let next = State { location, heading };

                if discovered.insert(next) {
                    parents.insert(next, state);
                    frontier.push_back(next);
                }
            }
        }

        debug!("no path after exploring {} states", explored);
        Err(SolverFailure::NotFound)
    }

    fn reconstruct(parents: &HashMap<State, State>, end: State) -> Path {
        let mut locations = vec![end.location];
        let mut current = end;
        while let Some(parent) = parents.get(&current) {
            locations.push(parent.location);
            current = *parent;
        }

        locations.reverse();
        Path(locations)
    }
}

impl Board {
    /// Look for a wired path from the entry to the exit, deferring to a [`PathSolver`].
    pub fn find_path(&self) -> Result<Path, SolverFailure> {
        PathSolver::from(self).solve()
    }
}
