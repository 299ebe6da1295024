//! Generic utility primitives with zero domain knowledge.
//!
//! - `input` - JSON spec resolution (inline, `@file`, `-` for stdin)
//! - `io` - File I/O with consistent error handling

pub mod input;
pub mod io;
