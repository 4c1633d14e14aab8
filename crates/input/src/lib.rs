//! Placement input module.
//!
//! Turns a line-oriented text stream into validated [`Placement`]s. Each line
//! must read `<color> <x>` with `color` in `[0, 254]` and `|x|` within the
//! configured bound. Validation happens here so the board never sees a
//! request it cannot honour.
//!
//! ```
//! use std::io::Cursor;
//! use sparse_stack_input::PlacementReader;
//!
//! let mut reader = PlacementReader::new(Cursor::new("4 -12\n"));
//! let placement = reader.next().unwrap().unwrap();
//! assert_eq!((placement.piece.color(), placement.x), (4, -12));
//! ```

pub mod error;
pub mod parse;
pub mod reader;

pub use sparse_stack_types as types;

pub use error::InputError;
pub use parse::parse_line;
pub use reader::PlacementReader;
pub use types::Placement;
