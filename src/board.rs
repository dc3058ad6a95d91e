use bitvec::prelude::*;
use thiserror::Error;

// The 8 knight jumps, applied as offsets to the current tile.
// Move enumeration follows this order, which pins which tour the solver finds
// when several candidates tie.
const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("({row}, {col}) is off the board or already visited")]
    InvalidPosition { row: usize, col: usize },

    #[error("({row}, {col}) is not one knight move away from the current position")]
    InvalidKnightMove { row: usize, col: usize },

    #[error("Cannot backtrack, no knight has been placed")]
    BacktrackOnEmptyBoard,
}

/// A [Board] is a `rows x cols` grid a knight walks across, together with the
/// partial tour built so far.
pub struct Board {
    rows: usize,
    cols: usize,
    // One bit per tile, ordered by rows, first left-to-right, then top-to-bottom.
    // `visited` answers membership in O(1) while `move_stack` keeps the
    // placement order for undo and for reporting the tour.
    // Invariant: the stack elements are exactly the set bits of `visited`.
    visited: BitVec,
    move_stack: Vec<(usize, usize)>,
}

impl Board {
    /// Creates an empty board. Both dimensions must be positive.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be positive");
        Board {
            rows,
            cols,
            visited: bitvec![0; rows * cols],
            move_stack: Vec::with_capacity(rows * cols),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The tour built so far, in placement order.
    #[inline]
    pub fn move_stack(&self) -> &[(usize, usize)] {
        &self.move_stack
    }

    /// The knight's current tile, or [None] if no knight has been placed
    /// (or every placement has been undone).
    #[inline]
    pub fn knight_position(&self) -> Option<(usize, usize)> {
        self.move_stack.last().copied()
    }

    #[inline]
    fn tile_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Returns true iff `(row, col)` is on the board and not visited yet.
    /// Out-of-range coordinates are reported as invalid, not as an error.
    #[inline]
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && !self.visited[self.tile_index(row, col)]
    }

    /// All tiles reachable from `(row, col)` with a single knight move,
    /// skipping tiles that are off the board or already visited.
    ///
    /// The result is collected eagerly: it reflects `visited` at call time
    /// and must not be reused across placements.
    pub fn possible_moves(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(row_offset, col_offset)| {
                let target_row = row.checked_add_signed(row_offset)?;
                let target_col = col.checked_add_signed(col_offset)?;
                self.is_valid(target_row, target_col)
                    .then_some((target_row, target_col))
            })
            .collect()
    }

    /// Places the knight on `(row, col)`.
    ///
    /// On an empty board this is the initial placement and any valid tile is
    /// allowed. Once a knight is present, the same call moves it instead and
    /// the target must additionally be one knight jump from the current tile.
    /// On error the board is left untouched.
    pub fn place_knight(&mut self, row: usize, col: usize) -> Result<(), BoardError> {
        if !self.is_valid(row, col) {
            return Err(BoardError::InvalidPosition { row, col });
        }
        if let Some(current) = self.knight_position() {
            if !is_knight_jump(current, (row, col)) {
                return Err(BoardError::InvalidKnightMove { row, col });
            }
        }
        self.push_move(row, col);
        Ok(())
    }

    /// Undoes the most recent placement, restoring the knight to where it was
    /// before (or to the empty state if that was the only placement).
    pub fn backtrack(&mut self) -> Result<(), BoardError> {
        if self.move_stack.is_empty() {
            return Err(BoardError::BacktrackOnEmptyBoard);
        }
        self.pop_move();
        Ok(())
    }

    /// Returns true iff every tile has been visited. Pure query.
    #[inline]
    pub fn solved(&self) -> bool {
        self.move_stack.len() == self.rows * self.cols
    }

    // Callers must have checked validity (and reachability for moves) already.
    // The solver goes through here after filtering against `possible_moves`,
    // so it can never trip the public error paths.
    pub(crate) fn push_move(&mut self, row: usize, col: usize) {
        debug_assert!(self.is_valid(row, col));
        let index = self.tile_index(row, col);
        self.visited.set(index, true);
        self.move_stack.push((row, col));
    }

    // Exactly inverts the most recent `push_move`.
    pub(crate) fn pop_move(&mut self) {
        let (row, col) = self
            .move_stack
            .pop()
            .expect("pop_move called on an empty move stack");
        let index = self.tile_index(row, col);
        debug_assert!(self.visited[index]);
        self.visited.set(index, false);
    }
}

fn is_knight_jump(from: (usize, usize), to: (usize, usize)) -> bool {
    let row_dist = from.0.abs_diff(to.0);
    let col_dist = from.1.abs_diff(to.1);
    (row_dist == 1 && col_dist == 2) || (row_dist == 2 && col_dist == 1)
}
