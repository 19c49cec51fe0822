//! Declaration handling
//!
//! This module covers everything between a declaration on disk and an
//! immutable command tree in memory: YAML loading, structural validation
//! and tree construction.

pub mod parse;
pub mod tree;
pub mod types;
pub mod validate;

// Re-export main types
pub use parse::*;
pub use tree::*;
pub use types::*;
pub use validate::*;
