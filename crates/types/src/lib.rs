//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! used by the board engine, the line reader and the record writer alike.
//!
//! # Board Geometry
//!
//! The board is unbounded in both x directions and grows upward:
//!
//! - **x**: signed column coordinate, `0` is the origin column
//! - **row**: `0` is the bottom of a column, rows grow upward
//!
//! # Engine Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_COLUMN_CAPACITY` | 4 | Initial and minimum column buffer size |
//! | `GROW_FACTOR` | 2 | Capacity multiplier when a full column receives a piece |
//! | `SHRINK_DIVISOR` | 4 | Capacity divisor when utilization drops under 1/4 |
//! | `MIN_LINE_LENGTH` | 4 | Shortest run that gets cleared |
//! | `DEFAULT_MAX_ABS_X` | 999999999 | Default bound on `|x|` accepted from input |
//!
//! # Examples
//!
//! ```
//! use sparse_stack_types::{Piece, MAX_COLOR};
//!
//! let piece = Piece::new(7).unwrap();
//! assert_eq!(piece.color(), 7);
//!
//! // 255 is reserved for the empty sentinel
//! assert!(Piece::new(255).is_none());
//! assert!(Piece::new(MAX_COLOR).is_some());
//! ```

use std::fmt;

/// Initial and minimum capacity of a column buffer
pub const MIN_COLUMN_CAPACITY: usize = 4;

/// Capacity multiplier applied when a full column receives a piece
pub const GROW_FACTOR: usize = 2;

/// Capacity divisor applied when a column is less than 1/SHRINK_DIVISOR full
pub const SHRINK_DIVISOR: usize = 4;

/// Minimum number of equal pieces forming a clearable line
pub const MIN_LINE_LENGTH: usize = 4;

/// Largest legal piece color
pub const MAX_COLOR: u8 = 254;

/// Default bound on the absolute x coordinate accepted by the reader
pub const DEFAULT_MAX_ABS_X: i64 = 999_999_999;

/// A colored piece occupying one board cell
///
/// Colors range over `[0, 254]`. The value `255` is reserved as the internal
/// empty sentinel used between marking a cell for removal and compacting its
/// column; it is never a valid piece color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece(u8);

impl Piece {
    /// Empty sentinel, only ever present inside a column during gravity
    pub const EMPTY: Piece = Piece(u8::MAX);

    /// Create a piece from a color value
    ///
    /// Returns `None` for the reserved sentinel value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_stack_types::Piece;
    ///
    /// assert_eq!(Piece::new(0).map(|p| p.color()), Some(0));
    /// assert_eq!(Piece::new(255), None);
    /// ```
    pub fn new(color: u8) -> Option<Self> {
        if color > MAX_COLOR {
            None
        } else {
            Some(Piece(color))
        }
    }

    /// Raw color value
    #[inline(always)]
    pub fn color(self) -> u8 {
        self.0
    }

    /// Whether this is the empty sentinel
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == u8::MAX
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One occupied cell in canonical output form
///
/// Records are emitted in ascending `x`, then ascending `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRecord {
    pub piece: Piece,
    pub x: i64,
    pub row: usize,
}

impl CellRecord {
    pub fn new(piece: Piece, x: i64, row: usize) -> Self {
        Self { piece, x, row }
    }
}

/// A validated request to drop `piece` into column `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub piece: Piece,
    pub x: i64,
}

impl Placement {
    pub fn new(piece: Piece, x: i64) -> Self {
        Self { piece, x }
    }
}
