//! Core board engine - pure, deterministic, and testable
//!
//! This crate contains the sparse board and the rules that resolve a
//! placement. It has **no dependencies** on input parsing or output
//! formatting, and logs through `tracing` only.
//!
//! # Module Structure
//!
//! - [`column`]: growable piece buffer for one x coordinate
//! - [`board`]: sparse ordered map of columns and padding runs
//! - [`scan`]: detection of runs of 4+ along four axes
//! - [`gravity`]: removal queue and column compaction
//! - [`resolve`]: the placement cycle and memory reclamation
//!
//! # Rules
//!
//! - Pieces are dropped into a column and land on top of it
//! - Any run of at least 4 equal pieces horizontally, vertically or
//!   diagonally is cleared, all its cells at once
//! - Pieces above a cleared cell fall down, which may form new runs
//! - The cascade repeats until a scan finds nothing
//!
//! # Example
//!
//! ```
//! use sparse_stack_core::Board;
//! use sparse_stack_types::Piece;
//!
//! let mut board = Board::new();
//! let red = Piece::new(1).unwrap();
//!
//! for x in 0..3 {
//!     board.place_piece(x, red).unwrap();
//! }
//! let res = board.place_piece(3, red).unwrap();
//!
//! assert_eq!(res.removed, 4);
//! assert_eq!(board.piece_count(), 0);
//! ```
//!
//! Column handles and the individual resolution steps stay inside the
//! crate; a caller only ever observes a stable board.
//!
//! ```compile_fail
//! let mut board = sparse_stack_core::Board::new();
//! board.apply_gravity();
//! ```
//!
//! ```compile_fail
//! let mut board = sparse_stack_core::Board::new();
//! let id = board.get_or_create_column(5).unwrap();
//! ```

mod arena;
pub mod board;
pub mod column;
pub mod error;
pub mod gravity;
pub mod resolve;
pub mod scan;

pub use sparse_stack_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, NodeView};
pub use column::Column;
pub use error::BoardError;
pub use resolve::{BoardStats, Resolution};
pub use scan::{Axis, Run};
