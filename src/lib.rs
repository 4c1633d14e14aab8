//! Sparse stack (workspace facade crate).
//!
//! Re-exports the member crates under short names so integration tests and
//! benches can write `sparse_stack::core::Board` and friends.

pub use sparse_stack_core as core;
pub use sparse_stack_engine as engine;
pub use sparse_stack_input as input;
pub use sparse_stack_output as output;
pub use sparse_stack_types as types;
