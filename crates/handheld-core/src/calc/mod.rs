//! Basic arithmetic / scientific calculator
//!
//! - `evaluator.rs`: binary operators and unary functions with domain checks
//! - `format.rs`: display parsing and number rendering
//! - `engine.rs`: the entry buffer driven by key presses
//! - `key.rs`: key tokens shared by the terminal keymap and the CLI

mod engine;
mod evaluator;
mod format;
mod key;

pub use engine::Calculator;
pub use evaluator::{apply, compute, BinaryOp, UnaryFn};
pub use format::{format_number, parse_display, ERROR_TOKEN};
pub use key::{Key, MemoryCommand, ParseKeyError};
