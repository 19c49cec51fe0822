//! Invocation engine
//!
//! This module handles a single invocation against a built command tree:
//! keyword routing, argument resolution, help rendering and handler
//! dispatch.

pub mod help;
pub mod registry;
pub mod resolve;
pub mod route;

// Re-export main types
pub use help::*;
pub use registry::*;
pub use resolve::*;
pub use route::*;
