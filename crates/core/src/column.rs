//! Column module - growable piece buffer for one x coordinate
//!
//! A column stores its pieces bottom-up (`row 0` is the bottom). Capacity is
//! managed explicitly with a geometric policy: it doubles when a full column
//! receives a piece and is divided by four when utilization drops under 25%
//! (never below [`MIN_COLUMN_CAPACITY`]).
//!
//! During stabilization a column also carries a dirty mark, the lowest row
//! touched since the board last settled, and per-cell removal flags.

use std::collections::TryReserveError;

use crate::types::{Piece, GROW_FACTOR, MIN_COLUMN_CAPACITY};

/// One cell of a column buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    piece: Piece,
    /// Queued for removal in the current scan pass
    pending: bool,
}

impl Slot {
    fn new(piece: Piece) -> Self {
        Self {
            piece,
            pending: false,
        }
    }
}

/// Vertical stack of pieces at one x coordinate
#[derive(Debug, Clone)]
pub struct Column {
    x: i64,
    slots: Vec<Slot>,
    capacity: usize,
    /// Lowest touched row, `None` when the column is clean
    dirty: Option<usize>,
}

impl Column {
    /// Create an empty column with the minimum capacity
    pub fn new(x: i64) -> Self {
        Self::with_slots(x, Vec::with_capacity(MIN_COLUMN_CAPACITY))
    }

    /// Like [`Column::new`], reporting allocation failure instead of aborting
    pub fn try_new(x: i64) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(MIN_COLUMN_CAPACITY)?;
        Ok(Self::with_slots(x, slots))
    }

    fn with_slots(x: i64, slots: Vec<Slot>) -> Self {
        Self {
            x,
            slots,
            capacity: MIN_COLUMN_CAPACITY,
            dirty: None,
        }
    }

    /// Column coordinate
    #[inline(always)]
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Number of occupied rows
    #[inline(always)]
    pub fn height(&self) -> usize {
        self.slots.len()
    }

    /// Logical buffer capacity
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Lowest row touched since the last stabilization, or the height when clean
    #[inline(always)]
    pub fn dirty_mark(&self) -> usize {
        self.dirty.unwrap_or(self.slots.len())
    }

    /// Whether the column was touched in the current stabilization round
    #[inline(always)]
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    /// Piece at `row`, if the row is occupied
    #[inline(always)]
    pub fn get(&self, row: usize) -> Option<Piece> {
        self.slots.get(row).map(|slot| slot.piece)
    }

    /// Iterate pieces bottom-up
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.slots.iter().map(|slot| slot.piece)
    }

    /// Whether `row` is queued for removal
    pub fn is_pending(&self, row: usize) -> bool {
        self.slots.get(row).map(|slot| slot.pending).unwrap_or(false)
    }

    /// Append a piece on top, growing the buffer if it is full
    ///
    /// Returns the row the piece landed on.
    pub fn push(&mut self, piece: Piece) -> Result<usize, TryReserveError> {
        if self.slots.len() == self.capacity {
            self.resize(self.capacity * GROW_FACTOR)?;
        }
        self.slots.push(Slot::new(piece));
        Ok(self.slots.len() - 1)
    }

    /// Resize the buffer to `capacity` (clamped to the minimum and to the height)
    ///
    /// The dirty mark keeps pointing at the same row.
    pub fn resize(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        let capacity = capacity.max(MIN_COLUMN_CAPACITY).max(self.slots.len());
        if capacity == self.capacity {
            return Ok(());
        }
        if capacity < self.capacity {
            self.shrink(capacity);
            return Ok(());
        }
        self.slots
            .try_reserve_exact(capacity - self.slots.len())?;
        self.capacity = capacity;
        Ok(())
    }

    /// Lower the capacity to `capacity` (clamped to the minimum and to the height)
    ///
    /// Never allocates; a larger `capacity` leaves the buffer untouched.
    pub fn shrink(&mut self, capacity: usize) {
        let capacity = capacity.max(MIN_COLUMN_CAPACITY).max(self.slots.len());
        if capacity >= self.capacity {
            return;
        }
        self.slots.shrink_to(capacity);
        self.capacity = capacity;
    }

    /// Lower the dirty mark to `row`
    ///
    /// Returns true if the column was clean before, i.e. it just joined the
    /// change set.
    pub(crate) fn touch(&mut self, row: usize) -> bool {
        match self.dirty {
            None => {
                self.dirty = Some(row);
                true
            }
            Some(mark) => {
                if row < mark {
                    self.dirty = Some(row);
                }
                false
            }
        }
    }

    /// Flag `row` for removal; false if it was already flagged
    pub(crate) fn mark(&mut self, row: usize) -> bool {
        match self.slots.get_mut(row) {
            Some(slot) if !slot.pending => {
                slot.pending = true;
                true
            }
            _ => false,
        }
    }

    /// Replace the piece at `row` with the empty sentinel
    pub(crate) fn clear(&mut self, row: usize) {
        if let Some(slot) = self.slots.get_mut(row) {
            *slot = Slot {
                piece: Piece::EMPTY,
                pending: false,
            };
        }
    }

    /// Drop empty sentinels at or above the dirty mark, pulling pieces down
    ///
    /// Returns the number of cells removed.
    pub(crate) fn compact(&mut self) -> usize {
        let from = self.dirty_mark();
        let mut removed = 0;
        for row in from..self.slots.len() {
            let slot = self.slots[row];
            if slot.piece.is_empty() {
                removed += 1;
            } else if removed > 0 {
                self.slots[row - removed] = slot;
            }
        }
        let height = self.slots.len() - removed;
        self.slots.truncate(height);
        removed
    }

    /// Forget the dirty mark once the board is stable again
    pub(crate) fn settle(&mut self) {
        self.dirty = None;
    }

    /// True when no sentinel or pending flag is left in the buffer
    pub fn is_settled(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| !slot.piece.is_empty() && !slot.pending)
    }
}
