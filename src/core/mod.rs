// Public modules
pub mod demo;
pub mod error;
pub mod keymap;
pub mod schema;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use keymap::{transform, CompiledSchema};
pub use schema::{Schema, SchemaFormat};
