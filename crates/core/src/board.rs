//! Board module - sparse, unbounded sequence of columns
//!
//! The board is an ordered map from x coordinate to node. A node is either a
//! materialized [`Column`] (stored in the arena, referenced by a `ColumnId`)
//! or a padding run standing in for `span` consecutive columns that never
//! received a piece. Nodes tile the range `[start_x, end_x]` without gaps.
//!
//! Structural invariants:
//! - the origin (x = 0) is always a column and is never removed
//! - the first and last nodes are columns
//! - two paddings are never adjacent
//!
//! A cursor remembers the last accessed column so repeated lookups of the
//! same coordinate are O(1); everything else is a single ordered-map lookup.

use std::collections::BTreeMap;

use tracing::trace;

use crate::arena::{ColumnArena, ColumnId};
use crate::column::Column;
use crate::error::{BoardError, MAX_ADDRESSABLE_X};
use crate::resolve::BoardStats;
use crate::types::{CellRecord, MIN_COLUMN_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Node {
    Column(ColumnId),
    Padding { span: u64 },
}

/// Read-only view of a board node
#[derive(Debug, Clone, Copy)]
pub enum NodeView<'a> {
    Column(&'a Column),
    Padding { span: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    x: i64,
    id: ColumnId,
}

/// The game board
#[derive(Debug)]
pub struct Board {
    pub(crate) nodes: BTreeMap<i64, Node>,
    pub(crate) columns: ColumnArena,
    origin: ColumnId,
    start: Anchor,
    end: Anchor,
    cursor: Anchor,
    /// Columns touched in the current stabilization round
    pub(crate) changed: Vec<ColumnId>,
    /// Cells queued for the next gravity step
    pub(crate) removals: Vec<(ColumnId, usize)>,
    pub(crate) stats: BoardStats,
}

impl Board {
    /// Create a board holding only the empty origin column
    pub fn new() -> Self {
        let mut columns = ColumnArena::new();
        let origin = columns.insert(Column::new(0));
        let anchor = Anchor { x: 0, id: origin };

        let mut nodes = BTreeMap::new();
        nodes.insert(0, Node::Column(origin));

        Self {
            nodes,
            columns,
            origin,
            start: anchor,
            end: anchor,
            cursor: anchor,
            changed: Vec::new(),
            removals: Vec::new(),
            stats: BoardStats::default(),
        }
    }

    /// Lowest materialized x
    pub fn start_x(&self) -> i64 {
        self.start.x
    }

    /// Highest materialized x
    pub fn end_x(&self) -> i64 {
        self.end.x
    }

    /// Coordinate of the last accessed column
    pub fn cursor_x(&self) -> i64 {
        self.cursor.x
    }

    pub(crate) fn origin(&self) -> ColumnId {
        self.origin
    }

    /// Column behind a handle returned by this board
    pub(crate) fn column(&self, id: ColumnId) -> &Column {
        self.columns.get(id)
    }

    /// Column at `x`, without materializing anything
    pub fn column_at(&self, x: i64) -> Option<&Column> {
        self.column_id_at(x).map(|id| self.column(id))
    }

    /// Handle of the column at exactly `x`; paddings and gaps yield `None`
    #[inline]
    pub(crate) fn column_id_at(&self, x: i64) -> Option<ColumnId> {
        match self.nodes.get(&x) {
            Some(Node::Column(id)) => Some(*id),
            _ => None,
        }
    }

    /// Number of materialized columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of padding nodes
    pub fn padding_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|node| matches!(node, Node::Padding { .. }))
            .count()
    }

    /// Total occupied cells
    pub fn piece_count(&self) -> usize {
        self.nodes
            .values()
            .filter_map(|node| match node {
                Node::Column(id) => Some(self.columns.get(*id).height()),
                Node::Padding { .. } => None,
            })
            .sum()
    }

    /// Nodes in ascending x, keyed by the first coordinate they cover
    pub fn nodes(&self) -> impl Iterator<Item = (i64, NodeView<'_>)> + '_ {
        self.nodes.iter().map(move |(&x, node)| match *node {
            Node::Column(id) => (x, NodeView::Column(self.columns.get(id))),
            Node::Padding { span } => (x, NodeView::Padding { span }),
        })
    }

    /// Every occupied cell, ascending x then ascending row
    pub fn cells(&self) -> impl Iterator<Item = CellRecord> + '_ {
        self.nodes
            .values()
            .filter_map(|node| match node {
                Node::Column(id) => Some(self.columns.get(*id)),
                Node::Padding { .. } => None,
            })
            .flat_map(|column| {
                column
                    .pieces()
                    .enumerate()
                    .map(move |(row, piece)| CellRecord::new(piece, column.x(), row))
            })
    }

    /// Return the column at `x`, materializing it if necessary
    ///
    /// Growing past either extreme appends a column (plus a padding for the
    /// gap); an interior coordinate inside a padding splits that padding.
    pub(crate) fn get_or_create_column(&mut self, x: i64) -> Result<ColumnId, BoardError> {
        if x.unsigned_abs() > MAX_ADDRESSABLE_X as u64 {
            return Err(BoardError::OutOfRange { x });
        }
        if x == 0 {
            return Ok(self.origin);
        }
        if x == self.cursor.x {
            return Ok(self.cursor.id);
        }

        let id = if x == self.end.x {
            self.end.id
        } else if x > self.end.x {
            self.append_column(x)?
        } else if x == self.start.x {
            self.start.id
        } else if x < self.start.x {
            self.prepend_column(x)?
        } else {
            self.locate_or_split(x)?
        };

        self.cursor = Anchor { x, id };
        Ok(id)
    }

    fn materialize(&mut self, x: i64) -> Result<ColumnId, BoardError> {
        let column = Column::try_new(x).map_err(|_| BoardError::Allocation {
            x,
            requested: MIN_COLUMN_CAPACITY,
        })?;
        trace!(x, "materialized column");
        Ok(self.columns.insert(column))
    }

    fn append_column(&mut self, x: i64) -> Result<ColumnId, BoardError> {
        let id = self.materialize(x)?;
        let gap = (x - self.end.x - 1) as u64;
        if gap > 0 {
            self.nodes
                .insert(self.end.x + 1, Node::Padding { span: gap });
        }
        self.nodes.insert(x, Node::Column(id));
        self.end = Anchor { x, id };
        Ok(id)
    }

    fn prepend_column(&mut self, x: i64) -> Result<ColumnId, BoardError> {
        let id = self.materialize(x)?;
        let gap = (self.start.x - x - 1) as u64;
        if gap > 0 {
            self.nodes.insert(x + 1, Node::Padding { span: gap });
        }
        self.nodes.insert(x, Node::Column(id));
        self.start = Anchor { x, id };
        Ok(id)
    }

    /// Find the node covering an interior `x`, splitting a padding if needed
    fn locate_or_split(&mut self, x: i64) -> Result<ColumnId, BoardError> {
        let Some((&key, &node)) = self.nodes.range(..=x).next_back() else {
            return Err(BoardError::Corrupt {
                x,
                reason: "interior coordinate has no covering node",
            });
        };

        match node {
            Node::Column(id) if key == x => Ok(id),
            Node::Column(_) => Err(BoardError::Corrupt {
                x,
                reason: "gap between nodes",
            }),
            Node::Padding { span } => {
                let offset = (x - key) as u64;
                if offset >= span {
                    return Err(BoardError::Corrupt {
                        x,
                        reason: "gap between nodes",
                    });
                }

                let id = self.materialize(x)?;
                if offset > 0 {
                    self.nodes.insert(key, Node::Padding { span: offset });
                }
                let rest = span - offset - 1;
                if rest > 0 {
                    self.nodes.insert(x + 1, Node::Padding { span: rest });
                }
                self.nodes.insert(x, Node::Column(id));
                trace!(x, lower = offset, upper = rest, "split padding");
                Ok(id)
            }
        }
    }

    /// Nearest column strictly left of `x`, skipping at most one padding
    fn column_before(&self, x: i64) -> Option<Anchor> {
        let (&key, node) = self.nodes.range(..x).next_back()?;
        match *node {
            Node::Column(id) => Some(Anchor { x: key, id }),
            Node::Padding { .. } => match self.nodes.range(..key).next_back() {
                Some((&x, Node::Column(id))) => Some(Anchor { x, id: *id }),
                _ => None,
            },
        }
    }

    /// Nearest column strictly right of `x`, skipping at most one padding
    fn column_after(&self, x: i64) -> Option<Anchor> {
        let (&key, node) = self.nodes.range(x + 1..).next()?;
        match *node {
            Node::Column(id) => Some(Anchor { x: key, id }),
            Node::Padding { span } => {
                let x = key + span as i64;
                match self.nodes.get(&x) {
                    Some(Node::Column(id)) => Some(Anchor { x, id: *id }),
                    _ => None,
                }
            }
        }
    }

    /// Unlink an empty, non-origin column and release its slot
    ///
    /// Neighbouring paddings absorb the freed coordinate; a column between two
    /// columns turns into a one-wide padding; a column at either extreme is
    /// dropped together with the padding next to it.
    pub(crate) fn remove_column(&mut self, id: ColumnId) -> Result<(), BoardError> {
        let column = self.columns.get(id);
        let x = column.x();
        if id == self.origin || !column.is_empty() {
            return Err(BoardError::NotRemovable { x });
        }

        let prev = self.nodes.range(..x).next_back().map(|(&k, &n)| (k, n));
        let next = self.nodes.range(x + 1..).next().map(|(&k, &n)| (k, n));

        match (prev, next) {
            (Some((low_x, Node::Padding { span: low })), Some((high_x, Node::Padding { span: high }))) => {
                self.nodes.remove(&x);
                self.nodes.remove(&high_x);
                self.nodes.insert(
                    low_x,
                    Node::Padding {
                        span: low + 1 + high,
                    },
                );
            }
            (Some((low_x, Node::Padding { span })), Some(_)) => {
                self.nodes.remove(&x);
                self.nodes.insert(low_x, Node::Padding { span: span + 1 });
            }
            (Some(_), Some((high_x, Node::Padding { span }))) => {
                self.nodes.remove(&high_x);
                self.nodes.insert(x, Node::Padding { span: span + 1 });
            }
            (Some(_), Some(_)) => {
                self.nodes.insert(x, Node::Padding { span: 1 });
            }
            (None, Some(_)) => {
                let new_start = self.column_after(x).ok_or(BoardError::Corrupt {
                    x,
                    reason: "start column has no column to its right",
                })?;
                self.nodes.remove(&x);
                if new_start.x != x + 1 {
                    self.nodes.remove(&(x + 1));
                }
                self.start = new_start;
            }
            (Some(_), None) => {
                let new_end = self.column_before(x).ok_or(BoardError::Corrupt {
                    x,
                    reason: "end column has no column to its left",
                })?;
                self.nodes.remove(&x);
                if new_end.x != x - 1 {
                    self.nodes.remove(&(new_end.x + 1));
                }
                self.end = new_end;
            }
            (None, None) => {
                return Err(BoardError::Corrupt {
                    x,
                    reason: "non-origin column without neighbours",
                });
            }
        }

        self.columns.remove(id);
        if self.cursor.id == id {
            self.cursor = self
                .column_before(x)
                .or_else(|| self.column_after(x))
                .unwrap_or(Anchor {
                    x: 0,
                    id: self.origin,
                });
        }
        trace!(x, "removed column");
        Ok(())
    }

    /// Verify the structural invariants of the node sequence
    ///
    /// On a stable board this also checks that no column carries a dirty
    /// mark, a pending removal or an empty sentinel.
    pub fn check_invariants(&self) -> Result<(), BoardError> {
        let corrupt = |x, reason| BoardError::Corrupt { x, reason };

        if self.nodes.get(&0) != Some(&Node::Column(self.origin)) {
            return Err(corrupt(0, "origin is not a column"));
        }
        match self.nodes.first_key_value() {
            Some((&x, &Node::Column(id))) if x == self.start.x && id == self.start.id => {}
            _ => return Err(corrupt(self.start.x, "start is not the first column")),
        }
        match self.nodes.last_key_value() {
            Some((&x, &Node::Column(id))) if x == self.end.x && id == self.end.id => {}
            _ => return Err(corrupt(self.end.x, "end is not the last column")),
        }
        if self.nodes.get(&self.cursor.x) != Some(&Node::Column(self.cursor.id)) {
            return Err(corrupt(self.cursor.x, "cursor does not point at a column"));
        }

        let stable = self.changed.is_empty() && self.removals.is_empty();
        let mut expected = self.start.x;
        let mut after_padding = false;
        let mut linked = 0;

        for (&x, node) in &self.nodes {
            if x != expected {
                return Err(corrupt(x, "nodes are not contiguous"));
            }
            match *node {
                Node::Column(id) => {
                    if !self.columns.contains(id) {
                        return Err(corrupt(x, "dangling column handle"));
                    }
                    let column = self.columns.get(id);
                    if column.x() != x {
                        return Err(corrupt(x, "column coordinate mismatch"));
                    }
                    if column.dirty_mark() > column.height() {
                        return Err(corrupt(x, "dirty mark above height"));
                    }
                    if column.capacity() < column.height() {
                        return Err(corrupt(x, "height exceeds capacity"));
                    }
                    if stable && (column.is_dirty() || !column.is_settled()) {
                        return Err(corrupt(x, "unsettled column on a stable board"));
                    }
                    linked += 1;
                    after_padding = false;
                    expected = x + 1;
                }
                Node::Padding { span } => {
                    if span == 0 {
                        return Err(corrupt(x, "empty padding"));
                    }
                    if after_padding {
                        return Err(corrupt(x, "adjacent paddings"));
                    }
                    after_padding = true;
                    expected = x + span as i64;
                }
            }
        }

        if linked != self.columns.len() {
            return Err(corrupt(self.end.x, "arena holds unlinked columns"));
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
