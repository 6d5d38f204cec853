//! Bindings for driving a [`Session`] from JavaScript.

use std::num::NonZero;

use itertools::Itertools;
use js_sys::Uint32Array;
use wasm_bindgen::prelude::*;

use crate::config::Settings;
use crate::location::Location;
use crate::session::{Session, TestOutcome};
use crate::traversal::TraversalStep;

/// What the last [`Game::advance`] did.
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StepKind {
    /// No packet in flight.
    Idle,
    /// The packet moved to the cursor.
    Frame,
    /// The packet sits on the exit.
    Delivered,
}

/// A puzzle session exposed to JavaScript.
#[wasm_bindgen]
pub struct Game {
    session: Session,
    path: Vec<u32>,
    energized: Vec<u32>,
}

fn to_js(err: impl ToString) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn flatten(locations: impl IntoIterator<Item = Location>) -> Vec<u32> {
    locations.into_iter().flat_map(|l| [l.row() as u32, l.col() as u32]).collect()
}

#[wasm_bindgen]
impl Game {
    /// A new game on a `size` by `size` board.
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize) -> Result<Game, JsValue> {
        let size = NonZero::new(size).ok_or_else(|| to_js("board size must be positive"))?;
        Ok(Self::from_session(Session::new(Settings::with_size(size))))
    }

    /// Deal a new board, reproducibly if `seed` is given.
    pub fn generate(&mut self, seed: Option<u64>) {
        self.session.generate(seed);
        self.path.clear();
        self.refresh();
    }

    /// Turn the piece at `(row, col)` clockwise.
    pub fn rotate(&mut self, row: usize, col: usize) -> Result<(), JsValue> {
        self.session.rotate_cell(Location(row, col)).map_err(to_js)?;
        self.path.clear();
        self.refresh();
        Ok(())
    }

    /// Test the circuit; on success the packet is ready to [`advance`](Self::advance).
    pub fn test(&mut self) -> bool {
        match self.session.test_circuit() {
            TestOutcome::PathFound(path) => {
                self.path = flatten(path.iter());
                true
            }
            TestOutcome::PathNotFound => {
                self.path.clear();
                false
            }
        }
    }

    /// The last path found, as flattened `[row, col, row, col, ...]` pairs.
    pub fn path(&self) -> Uint32Array {
        Uint32Array::from(self.path.as_slice())
    }

    /// Move the packet; read its position with [`cursor_row`](Self::cursor_row) and [`cursor_col`](Self::cursor_col).
    pub fn advance(&mut self) -> StepKind {
        match self.session.advance_traversal() {
            TraversalStep::Frame { .. } => StepKind::Frame,
            TraversalStep::Delivered { .. } => StepKind::Delivered,
            TraversalStep::Idle => StepKind::Idle,
        }
    }

    /// Drop the packet, if any.
    pub fn cancel(&mut self) {
        // idle already is fine here
        let _ = self.session.cancel_traversal();
    }

    /// Row of the packet, if one has been reported.
    #[wasm_bindgen(js_name = cursorRow)]
    pub fn cursor_row(&self) -> Option<usize> {
        self.session.traversal().cursor().map(|l| l.row())
    }

    /// Column of the packet, if one has been reported.
    #[wasm_bindgen(js_name = cursorCol)]
    pub fn cursor_col(&self) -> Option<usize> {
        self.session.traversal().cursor().map(|l| l.col())
    }

    /// Wiring at `(row, col)` as bits: north 1, east 2, south 4, west 8.
    pub fn connections(&self, row: usize, col: usize) -> Result<u8, JsValue> {
        self.session.board().connections_at(Location(row, col)).map(|c| c.bits()).map_err(to_js)
    }

    /// Catalog name of the piece at `(row, col)`.
    pub fn piece(&self, row: usize, col: usize) -> Result<String, JsValue> {
        self.cell(row, col).map(|cell| cell.piece().name().to_string())
    }

    /// Quarter turns of the piece at `(row, col)`.
    pub fn rotation(&self, row: usize, col: usize) -> Result<u8, JsValue> {
        self.cell(row, col).map(|cell| cell.rotation().get())
    }

    /// Every cell wired to the entry already, as flattened `[row, col, ...]` pairs in row-major order.
    pub fn energized(&self) -> Uint32Array {
        Uint32Array::from(self.energized.as_slice())
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.session.board().size().get()
    }

    /// Row holding both the entry and the exit.
    #[wasm_bindgen(js_name = entryRow)]
    pub fn entry_row(&self) -> usize {
        self.session.entry().row()
    }

    /// Same as [`entry_row`](Self::entry_row) on every board.
    #[wasm_bindgen(js_name = exitRow)]
    pub fn exit_row(&self) -> usize {
        self.session.exit().row()
    }
}

impl Game {
    pub(crate) fn from_session(session: Session) -> Self {
        let mut game = Self {
            session,
            path: Vec::new(),
            energized: Vec::new(),
        };
        game.refresh();
        game
    }

    /// Recompute the energized cells; only board changes move them.
    fn refresh(&mut self) {
        self.energized = flatten(self.session.board().energized().into_iter().sorted());
    }

    pub(crate) fn energized_cells(&self) -> &[u32] {
        &self.energized
    }

    fn cell(&self, row: usize, col: usize) -> Result<crate::Cell, JsValue> {
        let location = Location(row, col);
        self.session.board().get(location).copied().ok_or_else(|| {
            to_js(crate::EngineError::OutOfRange { location, size: self.size() })
        })
    }
}
