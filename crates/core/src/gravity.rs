//! Removal & gravity - turns marked cells into gaps and closes them
//!
//! Marking a cell queues it for removal and records the column in the change
//! set with its dirty mark lowered to the marked row. Gravity then writes the
//! empty sentinel into every queued cell and compacts each changed column
//! from its dirty mark upward.

use crate::arena::ColumnId;
use crate::board::Board;

impl Board {
    /// Record that `row` of column `id` changed in this round
    pub(crate) fn track_change(&mut self, id: ColumnId, row: usize) {
        if self.columns.get_mut(id).touch(row) {
            self.changed.push(id);
        }
    }

    /// Queue a cell for removal
    ///
    /// Returns false if the cell was already queued.
    pub(crate) fn mark_removal(&mut self, id: ColumnId, row: usize) -> bool {
        if !self.columns.get_mut(id).mark(row) {
            return false;
        }
        self.removals.push((id, row));
        self.track_change(id, row);
        true
    }

    /// Empty every queued cell and compact the changed columns
    ///
    /// Returns the number of cells removed.
    pub(crate) fn apply_gravity(&mut self) -> usize {
        for (id, row) in self.removals.drain(..) {
            self.columns.get_mut(id).clear(row);
        }

        let mut removed = 0;
        for &id in &self.changed {
            removed += self.columns.get_mut(id).compact();
        }
        removed
    }

    /// Cells currently queued for removal
    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    /// Columns in the current change set
    pub fn changed_columns(&self) -> usize {
        self.changed.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::types::Piece;

    fn piece(color: u8) -> Piece {
        Piece::new(color).unwrap()
    }

    #[test]
    fn test_mark_removal_tracks_change_once() {
        let mut board = Board::new();
        let id = board.origin();
        for c in [1, 2, 3] {
            board.columns.get_mut(id).push(piece(c)).unwrap();
        }

        assert!(board.mark_removal(id, 2));
        assert!(board.mark_removal(id, 0));
        assert!(!board.mark_removal(id, 2));

        assert_eq!(board.pending_removals(), 2);
        assert_eq!(board.changed_columns(), 1);
        assert_eq!(board.column(id).dirty_mark(), 0);
    }

    #[test]
    fn test_gravity_compacts_and_drains_queue() {
        let mut board = Board::new();
        let id = board.get_or_create_column(2).unwrap();
        for c in [1, 2, 3, 4, 5, 6] {
            board.columns.get_mut(id).push(piece(c)).unwrap();
        }
        board.mark_removal(id, 1);
        board.mark_removal(id, 2);
        board.mark_removal(id, 4);

        assert_eq!(board.apply_gravity(), 3);
        assert_eq!(board.pending_removals(), 0);

        let column = board.column(id);
        assert_eq!(
            column.pieces().collect::<Vec<_>>(),
            vec![piece(1), piece(4), piece(6)]
        );
        assert!(column.is_settled());
        // dirty mark survives gravity so the next scan starts at the gap
        assert_eq!(column.dirty_mark(), 1);
    }
}
