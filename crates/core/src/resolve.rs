//! Resolution cycle - one placement, resolved to a stable board
//!
//! ```text
//! place piece ─► scan ─► removals? ──no──► finalize ─► stable
//!                  ▲          │yes
//!                  └─ scan ◄─ gravity
//! ```
//!
//! The loop is iterative: cascade depth never grows the call stack.
//! Finalizing reclaims emptied columns (except the origin), shrinks columns
//! whose utilization dropped under 25%, clears every dirty mark and empties
//! the change set.

use tracing::{debug, trace};

use crate::board::Board;
use crate::error::BoardError;
use crate::types::{Piece, GROW_FACTOR, MIN_COLUMN_CAPACITY, SHRINK_DIVISOR};

/// Outcome of a single placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Row the placed piece landed on before any clearing
    pub row: usize,
    /// Line scanner passes, including the final pass that found nothing
    pub scan_passes: u32,
    /// Gravity rounds, i.e. cascade depth
    pub gravity_rounds: u32,
    /// Cells cleared over the whole cascade
    pub removed: usize,
    /// Columns released during finalization
    pub reclaimed: usize,
}

impl Resolution {
    pub fn cleared(&self) -> bool {
        self.removed > 0
    }
}

/// Running totals over the board's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    pub placements: u64,
    pub pieces_removed: u64,
    /// Placements that needed more than one gravity round
    pub cascades: u64,
    pub columns_reclaimed: u64,
}

impl Board {
    /// Drop `piece` into column `x` and resolve every resulting clear
    pub fn place_piece(&mut self, x: i64, piece: Piece) -> Result<Resolution, BoardError> {
        if piece.is_empty() {
            return Err(BoardError::EmptyPiece { x });
        }
        let id = self.get_or_create_column(x)?;
        let column = self.columns.get_mut(id);
        let requested = column.capacity() * GROW_FACTOR;
        let row = column
            .push(piece)
            .map_err(|_| BoardError::Allocation { x, requested })?;
        self.track_change(id, row);

        let mut resolution = Resolution {
            row,
            ..Resolution::default()
        };

        self.scan_changed();
        resolution.scan_passes += 1;
        while !self.removals.is_empty() {
            let removed = self.apply_gravity();
            resolution.removed += removed;
            resolution.gravity_rounds += 1;
            trace!(x, round = resolution.gravity_rounds, removed, "gravity round");
            self.scan_changed();
            resolution.scan_passes += 1;
        }
        resolution.reclaimed = self.finalize()?;

        self.stats.placements += 1;
        self.stats.pieces_removed += resolution.removed as u64;
        self.stats.columns_reclaimed += resolution.reclaimed as u64;
        if resolution.gravity_rounds > 1 {
            self.stats.cascades += 1;
        }

        debug_assert!(self.check_invariants().is_ok());

        if resolution.cleared() {
            debug!(
                x,
                color = piece.color(),
                removed = resolution.removed,
                rounds = resolution.gravity_rounds,
                reclaimed = resolution.reclaimed,
                "placement cleared lines"
            );
        }
        Ok(resolution)
    }

    /// Reclaim memory over the change set and return to the stable state
    ///
    /// Returns the number of columns removed.
    fn finalize(&mut self) -> Result<usize, BoardError> {
        let mut changed = std::mem::take(&mut self.changed);
        let origin = self.origin();
        let mut reclaimed = 0;

        for &id in &changed {
            let column = self.columns.get_mut(id);
            if column.is_empty() && id != origin {
                self.remove_column(id)?;
                reclaimed += 1;
                continue;
            }
            if column.capacity() > MIN_COLUMN_CAPACITY
                && column.height() * SHRINK_DIVISOR < column.capacity()
            {
                let capacity = column.capacity() / SHRINK_DIVISOR;
                column.shrink(capacity);
            }
            column.settle();
        }

        changed.clear();
        self.changed = changed;
        Ok(reclaimed)
    }

    /// Lifetime totals
    pub fn stats(&self) -> BoardStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellRecord;

    fn piece(color: u8) -> Piece {
        Piece::new(color).unwrap()
    }

    fn place_all(board: &mut Board, moves: &[(u8, i64)]) {
        for &(color, x) in moves {
            board.place_piece(x, piece(color)).unwrap();
            board.check_invariants().unwrap();
        }
    }

    fn records(board: &Board) -> Vec<(u8, i64, usize)> {
        board
            .cells()
            .map(|CellRecord { piece, x, row }| (piece.color(), x, row))
            .collect()
    }

    #[test]
    fn test_single_placement_without_clear() {
        let mut board = Board::new();
        let res = board.place_piece(3, piece(1)).unwrap();
        assert_eq!(res.row, 0);
        assert_eq!(res.scan_passes, 1);
        assert_eq!(res.gravity_rounds, 0);
        assert!(!res.cleared());
        assert_eq!(records(&board), vec![(1, 3, 0)]);
        assert_eq!(board.changed_columns(), 0);
    }

    #[test]
    fn test_horizontal_clear_empties_row() {
        let mut board = Board::new();
        place_all(&mut board, &[(1, 0), (1, 1), (1, 2)]);
        let res = board.place_piece(3, piece(1)).unwrap();
        assert_eq!(res.removed, 4);
        assert_eq!(res.reclaimed, 3);
        assert_eq!(board.piece_count(), 0);
        assert_eq!(board.column_count(), 1);
        board.check_invariants().unwrap();
    }

    #[test]
    fn test_five_in_a_row_clears_all_five() {
        let mut board = Board::new();
        place_all(&mut board, &[(6, 0), (6, 1), (6, 3), (6, 4)]);
        let res = board.place_piece(2, piece(6)).unwrap();
        assert_eq!(res.removed, 5);
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_finalize_shrinks_underused_column() {
        let mut board = Board::new();
        let id = board.origin();
        for i in 0..17u8 {
            board.columns.get_mut(id).push(piece(i % 2)).unwrap();
        }
        assert_eq!(board.column(id).capacity(), 32);

        for row in 7..17 {
            board.mark_removal(id, row);
        }
        assert_eq!(board.apply_gravity(), 10);
        assert_eq!(board.finalize().unwrap(), 0);

        let column = board.column(id);
        assert_eq!(column.height(), 7);
        assert_eq!(column.capacity(), 8);
        assert!(!column.is_dirty());
        board.check_invariants().unwrap();
    }

    #[test]
    fn test_finalize_keeps_capacity_at_floor() {
        let mut board = Board::new();
        board.place_piece(0, piece(1)).unwrap();
        assert_eq!(board.column_at(0).unwrap().capacity(), MIN_COLUMN_CAPACITY);
    }

    #[test]
    fn test_sentinel_piece_is_rejected() {
        let mut board = Board::new();
        assert_eq!(
            board.place_piece(1, Piece::EMPTY),
            Err(BoardError::EmptyPiece { x: 1 })
        );
        assert_eq!(board.column_count(), 1);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut board = Board::new();
        place_all(&mut board, &[(2, 5), (2, 5), (2, 5), (2, 5), (4, 1)]);
        let stats = board.stats();
        assert_eq!(stats.placements, 5);
        assert_eq!(stats.pieces_removed, 4);
        assert_eq!(stats.columns_reclaimed, 1);
        assert_eq!(stats.cascades, 0);
    }
}
