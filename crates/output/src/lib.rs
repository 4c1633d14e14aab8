//! Output module - final record listing and debug dumps
//!
//! | Writer | Produces |
//! |---|---|
//! | [`write_records`] | `<color> <x> <row>` lines, or a JSON array of records |
//! | [`write_dump`] | human-readable node-by-node view of the board |
//!
//! Writers take any `std::io::Write` and never flush; buffering is the
//! caller's business.

pub mod dump;
pub mod records;

pub use sparse_stack_core as core;

pub use dump::{write_dump, BoardDump};
pub use records::{write_board, write_records, JsonRecord, RecordFormat};
