use itertools::Itertools;

use crate::board::Board;

impl Board {
    /// Candidate tiles for the next placement, ordered by Warnsdorff's rule:
    /// tiles with the fewest onward moves come first, so the search fills in
    /// constrained tiles before they can get stranded.
    ///
    /// With no knight placed yet, every tile is a candidate (enumerated
    /// row-major); this is what lets [Board::solve] pick its own starting
    /// tile. Ties keep their enumeration order, so the tour found is
    /// deterministic.
    pub fn ordered_candidates(&self) -> Vec<(usize, usize)> {
        let mut candidates = match self.knight_position() {
            Some((row, col)) => self.possible_moves(row, col),
            None => (0..self.rows()).cartesian_product(0..self.cols()).collect(),
        };
        // sort_by_key is stable, which keeps the tie-break deterministic
        candidates.sort_by_key(|&(row, col)| self.possible_moves(row, col).len());
        candidates
    }

    /// Searches for a knight's tour covering every tile, extending whatever
    /// partial tour is already on the board (including none, in which case
    /// the starting tile is chosen by the search).
    ///
    /// Returns true if a full tour was found; the tour stays on the board for
    /// the caller to read back through [Board::move_stack]. Returns false if
    /// no tour exists from the current state.
    ///
    /// Recursion depth is bounded by `rows * cols`, one frame per tile.
    // Invariant:
    //  - When `solve` returns false, the board is unchanged. Every placement
    //    made during the call has been undone.
    pub fn solve(&mut self) -> bool {
        if self.solved() {
            return true;
        }
        // TODO An explicit work stack instead of recursion would keep very
        // large boards from running into the thread stack limit.
        for (row, col) in self.ordered_candidates() {
            // candidates are pre-validated, so the unchecked mutators apply
            self.push_move(row, col);
            if self.solved() || self.solve() {
                return true;
            }
            self.pop_move();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn is_knight_jump(from: (usize, usize), to: (usize, usize)) -> bool {
        let row_dist = from.0.abs_diff(to.0);
        let col_dist = from.1.abs_diff(to.1);
        (row_dist == 1 && col_dist == 2) || (row_dist == 2 && col_dist == 1)
    }

    fn assert_is_full_tour(board: &Board) {
        let tour = board.move_stack();
        assert_eq!(board.rows() * board.cols(), tour.len());
        assert!(tour.iter().all_unique());
        for (from, to) in tour.iter().tuple_windows() {
            assert!(is_knight_jump(*from, *to));
        }
    }

    #[test]
    fn empty_board_candidates_are_all_tiles() {
        let board = Board::new(5, 5);
        let candidates = board.ordered_candidates();
        assert_eq!(25, candidates.len());
        assert!(candidates.iter().all_unique());
        // all four corners tie at two onward moves; row-major order breaks the tie
        assert_eq!((0, 0), candidates[0]);
    }

    #[test]
    fn corner_is_tried_first_when_most_constrained() {
        let mut board = Board::new(5, 5);
        board.place_knight(2, 1).unwrap();
        assert_eq!((0, 0), board.ordered_candidates()[0]);
    }

    #[test]
    fn candidates_come_from_current_position() {
        let mut board = Board::new(5, 5);
        board.place_knight(2, 2).unwrap();
        let candidates = board.ordered_candidates();
        assert_eq!(8, candidates.len());
        for &(row, col) in &candidates {
            assert!(is_knight_jump((2, 2), (row, col)));
        }
    }

    #[test]
    fn solve_5x5() {
        let mut board = Board::new(5, 5);
        assert!(board.solve());
        assert_is_full_tour(&board);
    }

    #[test]
    fn solve_5x5_from_fixed_start() {
        let mut board = Board::new(5, 5);
        board.place_knight(0, 0).unwrap();
        assert!(board.solve());
        assert_is_full_tour(&board);
        assert_eq!((0, 0), board.move_stack()[0]);
    }

    #[test]
    fn solve_3x4() {
        let mut board = Board::new(3, 4);
        assert!(board.solve());
        assert_is_full_tour(&board);
    }

    #[test]
    fn solve_3x5_has_no_tour() {
        let mut board = Board::new(3, 5);
        assert!(!board.solve());
        // the failed search must unwind back to the empty board
        assert!(board.move_stack().is_empty());
        assert_eq!(None, board.knight_position());
        for row in 0..3 {
            for col in 0..5 {
                assert!(board.is_valid(row, col));
            }
        }
    }

    #[test]
    fn failed_solve_keeps_preplaced_start() {
        let mut board = Board::new(3, 5);
        board.place_knight(0, 0).unwrap();
        assert!(!board.solve());
        assert_eq!(&[(0, 0)], board.move_stack());
        assert_eq!(Some((0, 0)), board.knight_position());
    }

    #[test]
    fn solve_1x1() {
        let mut board = Board::new(1, 1);
        assert!(board.solve());
        assert_eq!(&[(0, 0)], board.move_stack());
    }

    #[test]
    fn solve_on_solved_board() {
        let mut board = Board::new(1, 1);
        board.place_knight(0, 0).unwrap();
        assert!(board.solve());
        assert_eq!(&[(0, 0)], board.move_stack());
    }

    #[test]
    fn solve_is_deterministic() {
        let mut first = Board::new(5, 5);
        let mut second = Board::new(5, 5);
        assert!(first.solve());
        assert!(second.solve());
        assert_eq!(first.move_stack(), second.move_stack());
    }
}
