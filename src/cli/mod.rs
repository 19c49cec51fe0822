//! CLI interface for the inspector binary

pub mod app;

// Re-export main types
pub use app::*;
