//! Line scanner - detects runs of equal pieces around touched cells
//!
//! Only columns in the change set are examined, and only from their dirty
//! mark upward. Lateral axes (horizontal and both diagonals) are measured by
//! walking outward from each touched cell through neighbouring columns; the
//! vertical axis is handled by a single top-down pass per column.
//!
//! Cells marked during a pass keep their color until gravity runs, so the
//! set of marked cells does not depend on the order columns are visited in.

use crate::arena::ColumnId;
use crate::board::Board;
use crate::types::{Piece, MIN_LINE_LENGTH};

/// Direction a run extends in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// (±1, 0)
    Horizontal,
    /// (±1, ∓1), falling to the right
    DiagonalDown,
    /// (±1, ±1), climbing to the right
    DiagonalUp,
    /// (0, ±1), within one column
    Vertical,
}

impl Axis {
    /// Axes that cross column boundaries
    pub const LATERAL: [Axis; 3] = [Axis::DiagonalDown, Axis::Horizontal, Axis::DiagonalUp];

    /// Row step per column step to the right
    #[inline(always)]
    pub fn dy(self) -> isize {
        match self {
            Axis::Horizontal => 0,
            Axis::DiagonalDown => -1,
            Axis::DiagonalUp => 1,
            Axis::Vertical => 0,
        }
    }
}

/// A maximal lateral run, described from its leftmost cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: i64,
    pub row: usize,
    pub len: usize,
    pub axis: Axis,
}

impl Board {
    /// Scan every column in the change set; returns newly marked cells
    pub(crate) fn scan_changed(&mut self) -> usize {
        // columns that join the set during this pass are scanned next pass
        let count = self.changed.len();
        let mut marked = 0;
        for i in 0..count {
            let id = self.changed[i];
            marked += self.scan_column(id);
        }
        marked
    }

    /// Scan one column from its dirty mark upward on all four axes
    pub(crate) fn scan_column(&mut self, id: ColumnId) -> usize {
        let column = self.columns.get(id);
        let x = column.x();
        let from = column.dirty_mark();
        let height = column.height();

        let mut marked = 0;
        for row in from..height {
            let Some(piece) = self.columns.get(id).get(row) else {
                break;
            };
            if piece.is_empty() {
                continue;
            }
            for axis in Axis::LATERAL {
                let run = self.measure_run(x, row, piece, axis);
                if run.len >= MIN_LINE_LENGTH {
                    marked += self.mark_run(run);
                }
            }
        }
        marked + self.scan_vertical(id)
    }

    /// Maximal run of `piece` through (`x`, `row`) along a lateral axis
    pub fn measure_run(&self, x: i64, row: usize, piece: Piece, axis: Axis) -> Run {
        let dy = axis.dy();
        let forward = self.extent(x, row, piece, 1, dy);
        let backward = self.extent(x, row, piece, -1, -dy);
        let start_row = offset_row(row, -dy * backward as isize).unwrap_or(row);
        Run {
            x: x - backward as i64,
            row: start_row,
            len: 1 + forward + backward,
            axis,
        }
    }

    /// Number of cells equal to `piece` after (`x`, `row`) stepping (`dx`, `dy`)
    ///
    /// Missing columns, paddings, rows out of range and other colors stop the walk.
    fn extent(&self, x: i64, row: usize, piece: Piece, dx: i64, dy: isize) -> usize {
        let mut len = 0;
        let mut cx = x + dx;
        let mut cy = offset_row(row, dy);
        while let (Some(id), Some(y)) = (self.column_id_at(cx), cy) {
            if self.columns.get(id).get(y) != Some(piece) {
                break;
            }
            len += 1;
            cx += dx;
            cy = offset_row(y, dy);
        }
        len
    }

    fn mark_run(&mut self, run: Run) -> usize {
        let dy = run.axis.dy();
        let mut marked = 0;
        let mut row = Some(run.row);
        for step in 0..run.len {
            let (Some(id), Some(y)) = (self.column_id_at(run.x + step as i64), row) else {
                break;
            };
            if self.mark_removal(id, y) {
                marked += 1;
            }
            row = offset_row(y, dy);
        }
        marked
    }

    /// Top-down pass over one column
    ///
    /// Runs may extend below the dirty mark; the pass stops once it is below
    /// the mark and the current run is broken.
    fn scan_vertical(&mut self, id: ColumnId) -> usize {
        let column = self.columns.get(id);
        let from = column.dirty_mark();
        let height = column.height();

        let mut marked = 0;
        let mut line: Option<Piece> = None;
        let mut len = 0;

        for row in (0..height).rev() {
            let piece = self.columns.get(id).get(row);
            if piece.is_some() && piece == line {
                len += 1;
                if len == MIN_LINE_LENGTH {
                    for y in row..row + MIN_LINE_LENGTH {
                        marked += self.mark_removal(id, y) as usize;
                    }
                } else if len > MIN_LINE_LENGTH {
                    marked += self.mark_removal(id, row) as usize;
                }
            } else if row >= from {
                line = piece;
                len = 1;
            } else {
                break;
            }
        }
        marked
    }
}

#[inline(always)]
fn offset_row(row: usize, dy: isize) -> Option<usize> {
    row.checked_add_signed(dy)
}
