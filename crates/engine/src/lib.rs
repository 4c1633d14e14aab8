//! Engine module - drives placements from a reader into a board
//!
//! | Stage | Crate |
//! |---|---|
//! | parse `<color> <x>` lines | `sparse-stack-input` |
//! | place and resolve | `sparse-stack-core` |
//! | records / debug dumps | `sparse-stack-output` |

pub mod config;
pub mod pipeline;

pub use sparse_stack_core as core;
pub use sparse_stack_input as input;
pub use sparse_stack_output as output;

pub use config::EngineConfig;
pub use pipeline::{run, Engine, RunSummary};
