//! decli - a declarative command-line dispatch engine
//!
//! decli turns a declarative description of a hierarchical CLI (a tree of
//! commands with typed arguments, loaded from YAML) plus raw process
//! arguments into a validated, typed invocation of application code:
//!
//! 1. the declaration is structurally validated ([`decl::validate`]),
//! 2. compiled into an immutable command tree ([`decl::tree`]),
//! 3. invocation tokens are routed through the tree and resolved against
//!    the reached node's declared arguments ([`engine`]),
//! 4. and the handler registered for the node's command is invoked with
//!    the resolved argument mapping.
//!
//! The tree is read-only after compilation, so one [`engine::Dispatcher`]
//! can serve concurrent invocations as long as the registered handlers are
//! reentrant.

// Public modules
pub mod cli;
pub mod decl;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use error::{DecliError, Result};

/// Current version of decli
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
